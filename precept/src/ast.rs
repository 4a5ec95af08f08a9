use rust_decimal::Decimal;
use std::fmt;

/// Source location for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

/// A logic term: the value language of the clause subset.
///
/// Lists are cons cells (`Cons`/`Nil`) so that `[H|T]` patterns unify
/// structurally; `Term::list` builds a proper list from a vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Atom(String),
    Var(String),
    Number(Decimal),
    Nil,
    Cons(Box<Term>, Box<Term>),
    Compound(String, Vec<Term>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound(functor.into(), args)
    }

    /// Build a proper list, optionally ending in `tail` instead of nil
    pub fn list(items: Vec<Term>, tail: Option<Term>) -> Self {
        let mut acc = tail.unwrap_or(Term::Nil);
        for item in items.into_iter().rev() {
            acc = Term::Cons(Box::new(item), Box::new(acc));
        }
        acc
    }

    /// Functor name and arity when the term is callable
    pub fn functor(&self) -> Option<(&str, usize)> {
        match self {
            Term::Atom(name) => Some((name, 0)),
            Term::Compound(name, args) => Some((name, args.len())),
            _ => None,
        }
    }

    /// Append the names of all variables, in first-occurrence order
    pub fn collect_vars(&self, out: &mut Vec<String>) {
        match self {
            Term::Var(name) => {
                if !out.iter().any(|v| v == name) {
                    out.push(name.clone());
                }
            }
            Term::Cons(head, tail) => {
                head.collect_vars(out);
                tail.collect_vars(out);
            }
            Term::Compound(_, args) => {
                for arg in args {
                    arg.collect_vars(out);
                }
            }
            _ => {}
        }
    }

    /// Maximum nesting depth, used to enforce the parser's depth limit
    pub fn depth(&self) -> usize {
        match self {
            Term::Cons(head, tail) => 1 + head.depth().max(tail.depth()),
            Term::Compound(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
            _ => 1,
        }
    }

    /// Rebuild the term with every variable occurrence renamed through `f`.
    ///
    /// `f` is called once per occurrence, so it can hand out fresh names for
    /// anonymous variables as well as stable renamings for named ones.
    pub fn map_vars(&self, f: &mut impl FnMut(&str) -> String) -> Term {
        match self {
            Term::Var(name) => Term::Var(f(name)),
            Term::Cons(head, tail) => {
                Term::Cons(Box::new(head.map_vars(f)), Box::new(tail.map_vars(f)))
            }
            Term::Compound(functor, args) => Term::Compound(
                functor.clone(),
                args.iter().map(|arg| arg.map_vars(f)).collect(),
            ),
            other => other.clone(),
        }
    }
}

fn atom_needs_quotes(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {
            chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
        }
        _ => true,
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => {
                if atom_needs_quotes(name) {
                    write!(f, "'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
                } else {
                    write!(f, "{}", name)
                }
            }
            Term::Var(name) => write!(f, "{}", name),
            Term::Number(n) => write!(f, "{}", n),
            Term::Nil => write!(f, "[]"),
            Term::Cons(head, tail) => {
                write!(f, "[{}", head)?;
                let mut rest: &Term = tail;
                loop {
                    match rest {
                        Term::Cons(h, t) => {
                            write!(f, ",{}", h)?;
                            rest = t.as_ref();
                        }
                        Term::Nil => break,
                        other => {
                            write!(f, "|{}", other)?;
                            break;
                        }
                    }
                }
                write!(f, "]")
            }
            Term::Compound(functor, args) => {
                write!(f, "{}(", functor)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Arithmetic comparison operators of the clause subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    NumEq,
    NumNe,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "=<",
            CompareOp::Ge => ">=",
            CompareOp::NumEq => "=:=",
            CompareOp::NumNe => "=\\=",
        };
        write!(f, "{}", symbol)
    }
}

/// A body goal: a callable term, negation-as-failure over a conjunction,
/// an arithmetic comparison, or explicit unification
#[derive(Debug, Clone, PartialEq)]
pub enum Goal {
    Call(Term),
    Not(Vec<Goal>),
    Comparison {
        op: CompareOp,
        lhs: Term,
        rhs: Term,
    },
    Unify(Term, Term),
    True,
}

impl Goal {
    /// Append the names of all variables, in first-occurrence order
    pub fn collect_vars(&self, out: &mut Vec<String>) {
        match self {
            Goal::Call(term) => term.collect_vars(out),
            Goal::Not(goals) => {
                for goal in goals {
                    goal.collect_vars(out);
                }
            }
            Goal::Comparison { lhs, rhs, .. } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Goal::Unify(a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
            Goal::True => {}
        }
    }

    /// Rebuild the goal with every variable occurrence renamed through `f`
    pub fn map_vars(&self, f: &mut impl FnMut(&str) -> String) -> Goal {
        match self {
            Goal::Call(term) => Goal::Call(term.map_vars(f)),
            Goal::Not(goals) => Goal::Not(goals.iter().map(|g| g.map_vars(f)).collect()),
            Goal::Comparison { op, lhs, rhs } => Goal::Comparison {
                op: *op,
                lhs: lhs.map_vars(f),
                rhs: rhs.map_vars(f),
            },
            Goal::Unify(a, b) => Goal::Unify(a.map_vars(f), b.map_vars(f)),
            Goal::True => Goal::True,
        }
    }

    /// Maximum term nesting depth appearing anywhere in the goal
    pub fn depth(&self) -> usize {
        match self {
            Goal::Call(term) => term.depth(),
            Goal::Not(goals) => goals.iter().map(Goal::depth).max().unwrap_or(0),
            Goal::Comparison { lhs, rhs, .. } => lhs.depth().max(rhs.depth()),
            Goal::Unify(a, b) => a.depth().max(b.depth()),
            Goal::True => 0,
        }
    }
}

/// One Horn clause: a fact (empty body) or a rule
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub head: Term,
    pub body: Vec<Goal>,
}

/// A parsed logic program: directives in source order, then clauses
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub directives: Vec<Term>,
    pub clauses: Vec<Clause>,
}
