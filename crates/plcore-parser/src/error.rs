//! Parse failures and the error bundle returned by the driver.

use plcore_ast::span::{line_col, SourcePos, Span};
use plcore_lexer::{LexError, LexErrorKind};
use std::cmp::Ordering;

fn expecting(expected: &[String]) -> String {
    match expected {
        [] => String::new(),
        [one] => format!(", expected {one}"),
        [init @ .., last] => format!(", expected {} or {}", init.join(", "), last),
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Lex(LexErrorKind),
    #[error("unexpected {found}{}", expecting(.expected))]
    Unexpected { found: String, expected: Vec<String> },
    #[error("unexpected end of input{}", expecting(.expected))]
    UnexpectedEof { expected: Vec<String> },
    #[error("rule succeeded without consuming input")]
    ZeroWidth,
    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("number `{text}` is out of range")]
    NumberOutOfRange { text: String },
}

/// A single failure inside the grammar, before positions are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub span: Span,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(span: Span, kind: ParseErrorKind) -> Self {
        Self { span, kind }
    }

    pub fn is_too_deep(&self) -> bool {
        matches!(self.kind, ParseErrorKind::TooDeep { .. })
    }

    /// Keep the failure that got furthest; at the same offset, union the
    /// expected sets.
    pub fn merge(self, other: ParseError) -> ParseError {
        match self.span.offset.cmp(&other.span.offset) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => {
                let ParseError { span, kind } = self;
                let kind = match (kind, other.kind) {
                    (
                        ParseErrorKind::Unexpected { found, expected: a },
                        ParseErrorKind::Unexpected { expected: b, .. },
                    ) => ParseErrorKind::Unexpected { found, expected: union(a, b) },
                    (
                        ParseErrorKind::UnexpectedEof { expected: a },
                        ParseErrorKind::UnexpectedEof { expected: b },
                    ) => ParseErrorKind::UnexpectedEof { expected: union(a, b) },
                    (_, deep @ ParseErrorKind::TooDeep { .. }) => deep,
                    (kind, _) => kind,
                };
                ParseError { span, kind }
            }
        }
    }
}

fn union(mut a: Vec<String>, b: Vec<String>) -> Vec<String> {
    a.extend(b);
    a.sort();
    a.dedup();
    a
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{pos}: {kind}")]
pub struct PositionedError {
    pub span: Span,
    pub pos: SourcePos,
    pub kind: ParseErrorKind,
}

fn render(label: &str, errors: &[PositionedError]) -> String {
    errors
        .iter()
        .map(|e| format!("{label}:{e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every error from one failed parse, each with its source position.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.label, .errors))]
pub struct ParseErrorBundle {
    pub label: String,
    pub errors: Vec<PositionedError>,
}

impl ParseErrorBundle {
    pub(crate) fn from_lex(label: &str, src: &str, errors: Vec<LexError>) -> Self {
        let errors = errors
            .into_iter()
            .map(|e| PositionedError {
                span: e.span,
                pos: line_col(src, e.span.offset),
                kind: ParseErrorKind::Lex(e.kind),
            })
            .collect();
        Self { label: label.to_string(), errors }
    }

    pub(crate) fn single(label: &str, src: &str, err: ParseError) -> Self {
        Self {
            label: label.to_string(),
            errors: vec![PositionedError {
                span: err.span,
                pos: line_col(src, err.span.offset),
                kind: err.kind,
            }],
        }
    }

    pub fn first(&self) -> Option<&PositionedError> {
        self.errors.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unexpected(offset: usize, expected: &[&str]) -> ParseError {
        ParseError::new(
            Span::new(offset, 1),
            ParseErrorKind::Unexpected {
                found: "`)`".into(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    #[test]
    fn merge_prefers_furthest() {
        let near = unexpected(2, &["`lam`"]);
        let far = unexpected(9, &["term"]);
        assert_eq!(near.clone().merge(far.clone()), far);
        assert_eq!(far.clone().merge(near), far);
    }

    #[test]
    fn merge_unions_expected_at_same_offset() {
        let a = unexpected(4, &["`lam`", "`abs`"]);
        let b = unexpected(4, &["`abs`", "`con`"]);
        assert_eq!(
            a.merge(b).kind,
            ParseErrorKind::Unexpected {
                found: "`)`".into(),
                expected: vec!["`abs`".into(), "`con`".into(), "`lam`".into()],
            }
        );
    }

    #[test]
    fn messages_list_expectations() {
        let e = unexpected(0, &["`(`", "`[`", "name"]);
        assert_eq!(e.kind.to_string(), "unexpected `)`, expected `(`, `[` or name");
        let eof = ParseErrorKind::UnexpectedEof { expected: vec!["`)`".into()] };
        assert_eq!(eof.to_string(), "unexpected end of input, expected `)`");
    }

    #[test]
    fn bundle_renders_label_and_position() {
        let src = "(lam\n  x )";
        let bundle = ParseErrorBundle::single("demo.plc", src, unexpected(9, &["type"]));
        assert_eq!(
            bundle.to_string(),
            "demo.plc:2:5: unexpected `)`, expected type"
        );
    }

    #[test]
    fn bundle_is_an_error_with_one_line_per_failure() {
        let src = "#\n  $";
        let lexed = plcore_lexer::lex(src).1;
        let bundle = ParseErrorBundle::from_lex("stray.plc", src, lexed);
        let err: &dyn std::error::Error = &bundle;
        let text = err.to_string();
        assert_eq!(text.lines().count(), bundle.errors.len());
        assert!(text.lines().all(|l| l.starts_with("stray.plc:")));
        assert!(text.lines().nth(1).is_some_and(|l| l.starts_with("stray.plc:2:3:")));
    }

    #[test]
    fn nesting_limit_wins_a_tie() {
        let deep = ParseError::new(Span::new(4, 1), ParseErrorKind::TooDeep { limit: 8 });
        assert_eq!(unexpected(4, &["`)`"]).merge(deep.clone()), deep);
        assert_eq!(deep.clone().merge(unexpected(4, &["`)`"])), deep);
    }
}
