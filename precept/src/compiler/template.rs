//! Placeholder substitution as a tagged token-stream transform.
//!
//! A template is scanned into text and `{i}` placeholder tokens; each token
//! either resolves to an encoded literal or is carried through verbatim.
//! Making the unresolved branch an explicit segment kind keeps the
//! degrade-to-inert-syntax policy visible and testable.

use crate::encode::encode;
use crate::form::{Form, Responses};

/// One piece of a resolved template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain template text, or a placeholder resolved to an encoded literal
    Literal(String),
    /// A placeholder token left untouched: out of range, or unanswered
    Verbatim(String),
}

enum Piece {
    Text(String),
    /// The digits of a `{digits}` token, as written
    Placeholder(String),
}

fn scan(template: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '{' {
            text.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() {
                digits.push(d);
                chars.next();
            } else {
                break;
            }
        }
        if !digits.is_empty() && chars.peek() == Some(&'}') {
            chars.next();
            if !text.is_empty() {
                pieces.push(Piece::Text(std::mem::take(&mut text)));
            }
            pieces.push(Piece::Placeholder(digits));
        } else {
            // not a placeholder token after all
            text.push('{');
            text.push_str(&digits);
        }
    }
    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    pieces
}

/// Normalize template escapes ahead of substitution: the `{\}` token
/// becomes a literal backslash, and double quotes become single quotes
/// (templates are authored with double quotes for editing convenience,
/// but the literal syntax wants single-quoted atoms).
pub fn normalize_escapes(template: &str) -> String {
    template.replace("{\\}", "\\").replace('"', "'")
}

/// Resolve a template against a form and its responses.
///
/// A `{i}` token referencing an in-range question with a present answer
/// becomes the encoded literal; anything else stays verbatim, so a
/// partially specified template degrades to inert syntax instead of
/// raising.
pub fn segments(template: &str, form: &Form, responses: &Responses) -> Vec<Segment> {
    scan(template)
        .into_iter()
        .map(|piece| match piece {
            Piece::Text(text) => Segment::Literal(text),
            Piece::Placeholder(digits) => {
                let resolved = digits
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| form.question_at(index))
                    .and_then(|question| {
                        responses
                            .get(&question.id)
                            .map(|answer| encode(answer, question.kind))
                    });
                match resolved {
                    Some(literal) => Segment::Literal(literal),
                    None => Segment::Verbatim(format!("{{{}}}", digits)),
                }
            }
        })
        .collect()
}

/// Join the resolved segments back into template text
pub fn substitute(template: &str, form: &Form, responses: &Responses) -> String {
    segments(template, form, responses)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) | Segment::Verbatim(text) => text,
        })
        .collect()
}

/// Zero-based question indices referenced by a template's placeholder
/// tokens, first occurrence order, deduplicated. Out-of-range indices are
/// included; callers decide what absence means.
pub fn referenced_questions(template: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    for piece in scan(template) {
        if let Piece::Placeholder(digits) = piece {
            if let Some(index) = digits.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
        }
    }
    indices
}
