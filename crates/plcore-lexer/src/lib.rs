use logos::{Lexer, Logos};
use num_bigint::BigInt;
use plcore_ast::span::Span;
use std::fmt;

#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Debug, Logos, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum Tok {
    // Whitespace is skipped
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    _Whitespace,

    // Comments are kept in the raw stream and dropped by `lex_skip_comments`
    #[regex(r"--[^\n]*")]
    CommentLine,
    #[token("{-", block_comment)]
    CommentBlock,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(".")]
    Dot,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<BigInt>().ok())]
    Int(BigInt),

    #[regex(r#""([^"\\]|\\u\{[0-9a-fA-F]+\}|\\.)*""#, parse_string)]
    Str(String),

    // Exactly one (possibly escaped) character between single quotes
    #[regex(r"'([^'\\]|\\u\{[0-9a-fA-F]+\}|\\.)'", parse_char)]
    Char(char),

    // Unicode letter first, then letters, digits, '_' or '\''
    #[regex(r"\p{L}[\p{L}\p{N}_']*")]
    Ident,
}

impl Tok {
    /// What a grammar rule reports when it expected this kind of token.
    pub fn describe(&self) -> &'static str {
        match self {
            Tok::LParen => "`(`",
            Tok::RParen => "`)`",
            Tok::LBracket => "`[`",
            Tok::RBracket => "`]`",
            Tok::LBrace => "`{`",
            Tok::RBrace => "`}`",
            Tok::Dot => "`.`",
            Tok::Int(_) => "integer",
            Tok::Str(_) => "string",
            Tok::Char(_) => "character",
            Tok::Ident => "identifier",
            Tok::CommentLine | Tok::CommentBlock | Tok::_Whitespace => "comment",
        }
    }
}

fn unescape(inner: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            'u' => {
                if chars.next()? != '{' {
                    return None;
                }
                let mut hex = String::new();
                for ch in chars.by_ref() {
                    if ch == '}' {
                        break;
                    }
                    hex.push(ch);
                }
                let v = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(v)?);
            }
            // Unknown escape: keep the escaped char literally
            other => out.push(other),
        }
    }
    Some(out)
}

fn parse_string(lex: &mut Lexer<Tok>) -> Option<String> {
    let s = lex.slice();
    unescape(&s[1..s.len() - 1])
}

fn parse_char(lex: &mut Lexer<Tok>) -> Option<char> {
    let s = lex.slice();
    let decoded = unescape(&s[1..s.len() - 1])?;
    let mut chars = decoded.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(c)
}

fn block_comment(lex: &mut Lexer<Tok>) -> Result<(), LexErrorKind> {
    // "{-" is already matched; consume with nesting until the matching "-}"
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;
    let mut depth = 1usize;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'{', b'-') => {
                depth += 1;
                i += 2;
            }
            (b'-', b'}') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return Ok(());
                }
            }
            _ => i += 1,
        }
    }
    lex.bump(bytes.len());
    Err(LexErrorKind::UnterminatedComment)
}

#[derive(Debug, Clone)]
pub struct Lexed<'a> {
    pub tok: Tok,
    pub span: Span,
    pub text: &'a str,
}

impl fmt::Display for Lexed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tok {
            Tok::Ident => write!(f, "identifier `{}`", self.text),
            Tok::Int(_) => write!(f, "integer `{}`", self.text),
            Tok::Str(_) => write!(f, "string {}", self.text),
            Tok::Char(_) => write!(f, "character {}", self.text),
            Tok::CommentLine | Tok::CommentBlock | Tok::_Whitespace => f.write_str("comment"),
            _ => write!(f, "`{}`", self.text),
        }
    }
}

/// Lex the whole input, keeping comments. Every lexical error is reported;
/// an unterminated block comment is positioned at end of input.
pub fn lex(input: &str) -> (Vec<Lexed<'_>>, Vec<LexError>) {
    let mut out = Vec::new();
    let mut errors = Vec::new();
    let mut l = Tok::lexer(input);
    while let Some(res) = l.next() {
        let range = l.span();
        match res {
            Ok(tok) => out.push(Lexed {
                tok,
                span: Span::new(range.start, range.len()),
                text: &input[range.clone()],
            }),
            Err(LexErrorKind::UnterminatedComment) => errors.push(LexError {
                kind: LexErrorKind::UnterminatedComment,
                span: Span::new(input.len(), 0),
            }),
            Err(kind) => errors.push(LexError {
                kind,
                span: Span::new(range.start, range.len()),
            }),
        }
    }
    (out, errors)
}

// Parser-facing stream: comments removed
pub fn lex_skip_comments(input: &str) -> (Vec<Lexed<'_>>, Vec<LexError>) {
    let (toks, errors) = lex(input);
    let toks = toks
        .into_iter()
        .filter(|lx| !matches!(lx.tok, Tok::CommentLine | Tok::CommentBlock))
        .collect();
    (toks, errors)
}
