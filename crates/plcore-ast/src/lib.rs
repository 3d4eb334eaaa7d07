//! plcore-ast: names, annotations and the annotated AST of the core language.

pub mod ast;
pub mod constant;
pub mod name;

pub mod span {
    use serde::{Deserialize, Serialize};

    #[derive(
        Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
    )]
    pub struct Span {
        pub offset: usize,
        pub len: usize,
    }
    impl Span {
        pub fn new(offset: usize, len: usize) -> Self {
            Self { offset, len }
        }

        /// Span running from the start of `self` to the end of `other`.
        pub fn to(self, other: Span) -> Self {
            let end = (other.offset + other.len).max(self.offset);
            Self::new(self.offset, end - self.offset)
        }

        pub fn end(self) -> usize {
            self.offset + self.len
        }
    }

    /// 1-based line/column, columns counted in chars.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourcePos {
        pub line: usize,
        pub column: usize,
    }

    impl std::fmt::Display for SourcePos {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}:{}", self.line, self.column)
        }
    }

    pub fn line_col(src: &str, offset: usize) -> SourcePos {
        let mut line = 1;
        let mut column = 1;
        for (i, ch) in src.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        SourcePos { line, column }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn line_col_counts_lines_and_chars() {
            let src = "ab\ncd\n  é x";
            assert_eq!(line_col(src, 0), SourcePos { line: 1, column: 1 });
            assert_eq!(line_col(src, 4), SourcePos { line: 2, column: 2 });
            // 'é' is two bytes but one column
            let x = src.find('x').unwrap();
            assert_eq!(line_col(src, x), SourcePos { line: 3, column: 5 });
            assert_eq!(line_col(src, src.len() + 10).line, 3);
        }

        #[test]
        fn span_to_covers_both() {
            let a = Span::new(3, 2);
            let b = Span::new(10, 4);
            assert_eq!(a.to(b), Span::new(3, 11));
            assert_eq!(a.to(b).end(), 14);
        }
    }
}

pub use ast::{
    Annotation, Kind, KindForm, Program, Term, TermKind, Type, TypeKind, Version,
};
pub use constant::{BuiltinName, BuiltinType, Constant};
pub use name::{FreshSupply, Name, ScopedName, TyName, Unique};
pub use span::Span;
