use crate::ast::Term;
use std::collections::HashMap;

/// Variable bindings accumulated along one resolution branch
pub type Subst = HashMap<String, Term>;

/// Follow variable bindings until an unbound variable or a non-variable
/// term is reached. Shallow: sub-terms are not resolved.
pub fn walk<'a>(subst: &'a Subst, term: &'a Term) -> &'a Term {
    let mut current = term;
    while let Term::Var(name) = current {
        match subst.get(name) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

/// Fully apply the substitution to a term, resolving sub-terms recursively
pub fn resolve(subst: &Subst, term: &Term) -> Term {
    match walk(subst, term).clone() {
        Term::Cons(head, tail) => Term::Cons(
            Box::new(resolve(subst, &head)),
            Box::new(resolve(subst, &tail)),
        ),
        Term::Compound(functor, args) => Term::Compound(
            functor,
            args.iter().map(|arg| resolve(subst, arg)).collect(),
        ),
        other => other,
    }
}

/// Unify two terms under the substitution, extending it in place.
///
/// On failure the substitution may hold partial bindings; callers clone
/// before attempting and discard the clone when unification fails. No
/// occurs check, as is conventional.
pub fn unify(a: &Term, b: &Term, subst: &mut Subst) -> bool {
    let ta = walk(subst, a).clone();
    let tb = walk(subst, b).clone();
    match (ta, tb) {
        (Term::Var(x), Term::Var(y)) if x == y => true,
        (Term::Var(x), t) => {
            subst.insert(x, t);
            true
        }
        (t, Term::Var(y)) => {
            subst.insert(y, t);
            true
        }
        (Term::Atom(x), Term::Atom(y)) => x == y,
        (Term::Number(x), Term::Number(y)) => x == y,
        (Term::Nil, Term::Nil) => true,
        (Term::Cons(h1, t1), Term::Cons(h2, t2)) => {
            unify(&h1, &h2, subst) && unify(&t1, &t2, subst)
        }
        (Term::Compound(f, args1), Term::Compound(g, args2)) => {
            f == g
                && args1.len() == args2.len()
                && args1
                    .iter()
                    .zip(args2.iter())
                    .all(|(x, y)| unify(x, y, subst))
        }
        _ => false,
    }
}
