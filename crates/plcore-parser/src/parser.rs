//! Token cursor and the combinators every grammar rule is built from.
//!
//! Backtracking (`attempt`, `choice`) rewinds the token cursor only. The
//! interner is left as it is, so names interned on an abandoned branch stay
//! interned.

use crate::error::{ParseError, ParseErrorKind};
use crate::intern::Interner;
use plcore_ast::span::Span;
use plcore_lexer::{Lexed, Tok};

pub type PResult<T> = Result<T, ParseError>;

pub struct Parser<'src> {
    tokens: Vec<Lexed<'src>>,
    pos: usize,
    input_len: usize,
    pub(crate) interner: Interner,
    depth: usize,
    max_depth: usize,
    // failure of the last repetition that stopped here; merged into the next
    // error raised at the same offset
    hint: Option<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(
        tokens: Vec<Lexed<'src>>,
        input_len: usize,
        interner: Interner,
        max_depth: usize,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            input_len,
            interner,
            depth: 0,
            max_depth,
            hint: None,
        }
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn into_interner(self) -> Interner {
        self.interner
    }

    /// Index of the next token.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<&Lexed<'src>> {
        self.tokens.get(self.pos)
    }

    pub fn at(&self, tok: &Tok) -> bool {
        self.peek().is_some_and(|t| &t.tok == tok)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Span of the next token, or the empty span at end of input.
    pub fn here(&self) -> Span {
        match self.peek() {
            Some(t) => t.span,
            None => Span::new(self.input_len, 0),
        }
    }

    pub(crate) fn bump(&mut self) -> Option<Lexed<'src>> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
            self.hint = None;
        }
        t
    }

    /// Failure at the next token, listing what would have been accepted.
    pub fn unexpected(&mut self, expected: &[&str]) -> ParseError {
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        let err = match self.peek() {
            Some(t) => ParseError::new(
                t.span,
                ParseErrorKind::Unexpected { found: t.to_string(), expected },
            ),
            None => ParseError::new(
                Span::new(self.input_len, 0),
                ParseErrorKind::UnexpectedEof { expected },
            ),
        };
        match self.hint.take() {
            Some(h) => err.merge(h),
            None => err,
        }
    }

    /// Match one token of the given kind.
    pub fn expect(&mut self, tok: &Tok) -> PResult<Span> {
        if self.at(tok) {
            let span = self.here();
            self.bump();
            return Ok(span);
        }
        Err(self.unexpected(&[tok.describe()]))
    }

    /// Match an identifier spelled exactly `kw`. Keywords are contextual.
    pub fn keyword(&mut self, kw: &str) -> PResult<Span> {
        if let Some(t) = self.peek() {
            if t.tok == Tok::Ident && t.text == kw {
                let span = t.span;
                self.bump();
                return Ok(span);
            }
        }
        let shown = format!("`{kw}`");
        Err(self.unexpected(&[shown.as_str()]))
    }

    /// Match an identifier token; the token kind guarantees a leading letter.
    pub fn identifier(&mut self, what: &str) -> PResult<(&'src str, Span)> {
        if let Some(t) = self.peek() {
            if t.tok == Tok::Ident {
                let found = (t.text, t.span);
                self.bump();
                return Ok(found);
            }
        }
        Err(self.unexpected(&[what]))
    }

    /// Run `f`; on failure rewind the cursor to where `f` started.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = self.pos;
        let saved_hint = self.hint.clone();
        let res = f(self);
        if res.is_err() {
            self.pos = saved;
            self.hint = saved_hint;
        }
        res
    }

    /// First alternative that succeeds; otherwise the furthest failure with
    /// merged expectations.
    pub fn choice<T>(&mut self, alts: &[fn(&mut Self) -> PResult<T>]) -> PResult<T> {
        let mut best: Option<ParseError> = None;
        for alt in alts {
            match self.attempt(*alt) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    best = Some(match best {
                        Some(b) => b.merge(e),
                        None => e,
                    })
                }
            }
        }
        Err(best.unwrap_or_else(|| self.unexpected(&[])))
    }

    /// Fail when `f` succeeds without consuming a token.
    pub fn enforce<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.pos;
        let start_span = self.here();
        let v = f(self)?;
        if self.pos == start {
            return Err(ParseError::new(start_span, ParseErrorKind::ZeroWidth));
        }
        Ok(v)
    }

    /// `open f close`, returning the span from `open` through `close`.
    pub fn between<T>(
        &mut self,
        open: &Tok,
        close: &Tok,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<(T, Span)> {
        let start = self.expect(open)?;
        let v = f(self)?;
        let end = self.expect(close)?;
        Ok((v, start.to(end)))
    }

    /// Zero or more `f`. Stops at the first failure that consumed nothing;
    /// a failure after consuming input, or hitting the nesting limit, is
    /// propagated.
    pub fn many<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        let mut out = Vec::new();
        loop {
            let start = self.pos;
            match self.enforce(&mut f) {
                Ok(v) => out.push(v),
                Err(e) if self.pos == start && !e.is_too_deep() => {
                    self.hint = Some(match self.hint.take() {
                        Some(h) => h.merge(e),
                        None => e,
                    });
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    /// One or more `f`.
    pub fn some<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        let first = self.enforce(&mut f)?;
        let mut out = vec![first];
        out.extend(self.many(f)?);
        Ok(out)
    }

    /// Run `f` one nesting level deeper, failing past the configured limit.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                self.here(),
                ParseErrorKind::TooDeep { limit: self.max_depth },
            ));
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    pub fn end_of_input(&mut self) -> PResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.unexpected(&["end of input"]))
        }
    }
}
