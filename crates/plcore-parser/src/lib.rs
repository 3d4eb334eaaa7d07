//! plcore-parser: turns source text into the annotated AST.
//!
//! The grammar runs over the token stream from `plcore-lexer`. Names are
//! interned as they are read, so every occurrence of one spelling in one
//! parse shares a [`Unique`](plcore_ast::name::Unique).

mod constant;
mod error;
mod grammar;
mod intern;
mod parser;

pub use error::{ParseError, ParseErrorBundle, ParseErrorKind, PositionedError};
pub use intern::Interner;
pub use parser::{PResult, Parser};

use plcore_ast::ast::{Kind, Program, Term, Type};
use plcore_ast::constant::Constant;
use plcore_ast::name::{FreshSupply, Name, TyName};
use plcore_lexer::lex_skip_comments;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How deeply kinds, types, terms and constants may nest. Each level
    /// costs several recursive frames, so the default stays small enough
    /// for a 2 MiB thread stack in an unoptimized build.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Run `rule` over the whole of `src` with a private unique supply.
pub fn parse<'src, T>(
    rule: impl FnOnce(&mut Parser<'src>) -> PResult<T>,
    label: &str,
    src: &'src str,
) -> Result<T, ParseErrorBundle> {
    let mut supply = FreshSupply::new();
    parse_with(&ParseOptions::default(), &mut supply, rule, label, src)
}

/// Run `rule` over the whole of `src`, drawing uniques from `supply`.
///
/// Lexical errors are all reported together and the grammar never runs.
/// Otherwise the result is the furthest syntax error, if any. The supply
/// is advanced past every unique the parse handed out, even on failure.
pub fn parse_with<'src, T>(
    options: &ParseOptions,
    supply: &mut FreshSupply,
    rule: impl FnOnce(&mut Parser<'src>) -> PResult<T>,
    label: &str,
    src: &'src str,
) -> Result<T, ParseErrorBundle> {
    let (tokens, lex_errors) = lex_skip_comments(src);
    if !lex_errors.is_empty() {
        log::debug!("{label}: {} lexical error(s)", lex_errors.len());
        return Err(ParseErrorBundle::from_lex(label, src, lex_errors));
    }
    let count = tokens.len();
    let interner = Interner::with_supply(std::mem::take(supply));
    let mut p = Parser::new(tokens, src.len(), interner, options.max_depth);
    let res = rule(&mut p).and_then(|v| {
        p.end_of_input()?;
        Ok(v)
    });
    let interner = p.into_interner();
    log::debug!(
        "{label}: {count} tokens, {} distinct names, {}",
        interner.len(),
        if res.is_ok() { "ok" } else { "failed" }
    );
    *supply = interner.into_supply();
    res.map_err(|e| ParseErrorBundle::single(label, src, e))
}

pub fn parse_program(label: &str, src: &str) -> Result<Program, ParseErrorBundle> {
    parse(Parser::program, label, src)
}

pub fn parse_term(label: &str, src: &str) -> Result<Term, ParseErrorBundle> {
    parse(Parser::term, label, src)
}

pub fn parse_type(label: &str, src: &str) -> Result<Type, ParseErrorBundle> {
    parse(Parser::ty, label, src)
}

pub fn parse_kind(label: &str, src: &str) -> Result<Kind, ParseErrorBundle> {
    parse(Parser::kind, label, src)
}

pub fn parse_constant(label: &str, src: &str) -> Result<Constant, ParseErrorBundle> {
    parse(Parser::constant, label, src)
}

pub fn parse_name(label: &str, src: &str) -> Result<Name, ParseErrorBundle> {
    parse(Parser::name, label, src)
}

pub fn parse_ty_name(label: &str, src: &str) -> Result<TyName, ParseErrorBundle> {
    parse(Parser::ty_name, label, src)
}
