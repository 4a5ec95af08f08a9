//! Maps typed questionnaire answers into logic-literal syntax.
//!
//! Encoding is total over any input string: malformed downstream syntax is
//! the template compiler's concern, not the encoder's.

use crate::form::QuestionKind;

/// Encode a raw answer as a logic literal according to its declared kind.
///
/// - `BOOLEAN` answers become the bare atom `true` or `false` (raw compared
///   case-insensitively against `"true"`).
/// - `NUMERIC` answers pass through verbatim; callers are responsible for
///   keeping them syntactically numeric.
/// - `SELECT` and `TEXT` answers become single-quoted atoms with embedded
///   quotes escaped.
/// - `CHECKBOX` answers are split on commas into a bracketed list of quoted
///   atoms; an empty answer encodes as the empty list.
pub fn encode(raw: &str, kind: QuestionKind) -> String {
    match kind {
        QuestionKind::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        QuestionKind::Numeric => raw.to_string(),
        QuestionKind::Checkbox => {
            if raw.trim().is_empty() {
                return "[]".to_string();
            }
            let items: Vec<String> = raw.split(',').map(|s| quote_atom(s.trim())).collect();
            format!("[{}]", items.join(","))
        }
        QuestionKind::Select | QuestionKind::Text => quote_atom(raw),
    }
}

/// Wrap a raw value in single quotes, escaping embedded quotes with a
/// backslash
pub fn quote_atom(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "\\'"))
}
