//! Constant literals and built-in names.

use crate::error::{ParseError, ParseErrorKind};
use crate::parser::{PResult, Parser};
use num_bigint::BigInt;
use plcore_ast::constant::{BuiltinName, BuiltinType, Constant};
use plcore_ast::span::Span;
use plcore_lexer::Tok;

const CONSTANT_START: &[&str] = &[
    "integer",
    "character",
    "string",
    "`unit`",
    "`True`",
    "`False`",
    "`(`",
];

impl<'src> Parser<'src> {
    /// `INT | CHAR | STRING | unit | True | False | ( constant )`
    pub fn constant(&mut self) -> PResult<Constant> {
        self.nested(|p| {
            if p.at(&Tok::LParen) {
                let (c, _) = p.between(&Tok::LParen, &Tok::RParen, |p| p.constant())?;
                return Ok(c);
            }
            let lit = p.peek().and_then(|t| match (&t.tok, t.text) {
                (Tok::Int(n), _) => Some(Constant::Integer(n.clone())),
                (Tok::Char(c), _) => Some(Constant::Char(*c)),
                (Tok::Str(s), _) => Some(Constant::String(s.clone())),
                (Tok::Ident, "unit") => Some(Constant::Unit),
                (Tok::Ident, "True") => Some(Constant::Bool(true)),
                (Tok::Ident, "False") => Some(Constant::Bool(false)),
                _ => None,
            });
            match lit {
                Some(c) => {
                    p.bump();
                    Ok(c)
                }
                None => Err(p.unexpected(CONSTANT_START)),
            }
        })
    }

    /// Tries every built-in in [`BuiltinName::ALL`] order against the next
    /// identifier; the first whole-token match wins.
    pub fn builtin_name(&mut self) -> PResult<BuiltinName> {
        if let Some(t) = self.peek() {
            if t.tok == Tok::Ident {
                if let Some(b) = BuiltinName::ALL.into_iter().find(|b| b.as_str() == t.text) {
                    self.bump();
                    return Ok(b);
                }
            }
        }
        Err(self.unexpected(&["built-in function name"]))
    }

    pub fn builtin_type(&mut self) -> PResult<BuiltinType> {
        if let Some(t) = self.peek() {
            if t.tok == Tok::Ident {
                if let Some(b) = BuiltinType::ALL.into_iter().find(|b| b.as_str() == t.text) {
                    self.bump();
                    return Ok(b);
                }
            }
        }
        Err(self.unexpected(&["built-in type"]))
    }

    /// Non-negative integer literal, as used by versions and projections.
    pub fn natural<N>(&mut self) -> PResult<(N, Span)>
    where
        N: for<'a> TryFrom<&'a BigInt>,
    {
        if let Some(t) = self.peek() {
            if let Tok::Int(n) = &t.tok {
                let span = t.span;
                let text = t.text.to_string();
                let value = N::try_from(n).map_err(|_| {
                    ParseError::new(span, ParseErrorKind::NumberOutOfRange { text })
                })?;
                self.bump();
                return Ok((value, span));
            }
        }
        Err(self.unexpected(&["natural number"]))
    }
}
