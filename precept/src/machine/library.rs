//! Embedded library sources, consulted when a program's `use_module`
//! directive names them.

/// `library(lists)`: the list predicates the query subset relies on
pub const LISTS: &str = "\
member(X, [X|_]).
member(X, [_|T]) :- member(X, T).
";

/// Resolve a library name to its embedded source
pub fn source_for(name: &str) -> Option<&'static str> {
    match name {
        "lists" => Some(LISTS),
        _ => None,
    }
}
