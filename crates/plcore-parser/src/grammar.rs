//! Kinds, types, terms and programs.
//!
//! Keywords are contextual identifiers recognised right after `(`. Every
//! node gets a `Position` annotation; the inner nodes of a desugared
//! `[f a b]` / `{t A B}` span from the opening bracket to their last argument.

use crate::parser::{PResult, Parser};
use plcore_ast::ast::{
    Annotation, Kind, KindForm, Program, Term, TermKind, Type, TypeKind, Version,
};
use plcore_ast::name::{Name, TyName};
use plcore_ast::span::Span;
use plcore_lexer::Tok;

const TYPE_START: &[&str] = &["`(`", "`[`", "type variable"];
const TERM_START: &[&str] = &["`(`", "`[`", "`{`", "variable"];

impl<'src> Parser<'src> {
    pub fn spanned_name(&mut self) -> PResult<(Name, Span)> {
        let (text, span) = self.identifier("name")?;
        let unique = self.interner.intern(text);
        Ok((Name::new(text, unique), span))
    }

    pub fn name(&mut self) -> PResult<Name> {
        Ok(self.spanned_name()?.0)
    }

    pub fn spanned_ty_name(&mut self) -> PResult<(TyName, Span)> {
        let (text, span) = self.identifier("type name")?;
        let unique = self.interner.intern(text);
        Ok((TyName::new(text, unique), span))
    }

    pub fn ty_name(&mut self) -> PResult<TyName> {
        Ok(self.spanned_ty_name()?.0)
    }

    /// `NAT . NAT . NAT`, positioned at the first digit.
    pub fn version(&mut self) -> PResult<Version> {
        let (major, start) = self.natural::<u64>()?;
        self.expect(&Tok::Dot)?;
        let (minor, _) = self.natural::<u64>()?;
        self.expect(&Tok::Dot)?;
        let (patch, end) = self.natural::<u64>()?;
        Ok(Version {
            major,
            minor,
            patch,
            ann: Annotation::Position(start.to(end)),
        })
    }

    pub fn kind(&mut self) -> PResult<Kind> {
        self.nested(|p| {
            let (form, span) = p.between(&Tok::LParen, &Tok::RParen, |p| {
                p.choice(&[Self::kind_type, Self::kind_arrow])
            })?;
            Ok(Kind::new(form, Annotation::Position(span)))
        })
    }

    fn kind_type(&mut self) -> PResult<KindForm> {
        self.keyword("type")?;
        Ok(KindForm::Type)
    }

    fn kind_arrow(&mut self) -> PResult<KindForm> {
        self.keyword("fun")?;
        let from = self.kind()?;
        let to = self.kind()?;
        Ok(KindForm::Arrow(Box::new(from), Box::new(to)))
    }

    pub fn ty(&mut self) -> PResult<Type> {
        self.nested(|p| {
            if p.at(&Tok::LParen) {
                let (kind, span) = p.between(&Tok::LParen, &Tok::RParen, |p| {
                    p.choice(&[
                        Self::ty_lam,
                        Self::ty_forall,
                        Self::ty_ifix,
                        Self::ty_fun,
                        Self::ty_con,
                        Self::ty_prod,
                    ])
                })?;
                return Ok(Type::new(kind, Annotation::Position(span)));
            }
            if p.at(&Tok::LBracket) {
                return p.ty_app();
            }
            if !p.at(&Tok::Ident) {
                return Err(p.unexpected(TYPE_START));
            }
            let (name, span) = p.spanned_ty_name()?;
            Ok(Type::new(TypeKind::Var(name), Annotation::Position(span)))
        })
    }

    fn ty_lam(&mut self) -> PResult<TypeKind> {
        self.keyword("lam")?;
        let binder = self.ty_name()?;
        let kind = self.kind()?;
        let body = self.ty()?;
        Ok(TypeKind::Lam { binder, kind, body: Box::new(body) })
    }

    fn ty_forall(&mut self) -> PResult<TypeKind> {
        self.keyword("all")?;
        let binder = self.ty_name()?;
        let kind = self.kind()?;
        let body = self.ty()?;
        Ok(TypeKind::Forall { binder, kind, body: Box::new(body) })
    }

    fn ty_ifix(&mut self) -> PResult<TypeKind> {
        self.keyword("ifix")?;
        let pattern = self.ty()?;
        let arg = self.ty()?;
        Ok(TypeKind::IFix { pattern: Box::new(pattern), arg: Box::new(arg) })
    }

    fn ty_fun(&mut self) -> PResult<TypeKind> {
        self.keyword("fun")?;
        let domain = self.ty()?;
        let codomain = self.ty()?;
        Ok(TypeKind::Fun { domain: Box::new(domain), codomain: Box::new(codomain) })
    }

    fn ty_con(&mut self) -> PResult<TypeKind> {
        self.keyword("con")?;
        Ok(TypeKind::Builtin(self.builtin_type()?))
    }

    fn ty_prod(&mut self) -> PResult<TypeKind> {
        self.keyword("prod")?;
        Ok(TypeKind::Prod(self.many(Self::ty)?))
    }

    /// `[ type type+ ]`, left-nested.
    fn ty_app(&mut self) -> PResult<Type> {
        let ((head, args), span) = self.between(&Tok::LBracket, &Tok::RBracket, |p| {
            let head = p.ty()?;
            let args = p.some(Self::ty)?;
            Ok((head, args))
        })?;
        let open = Span::new(span.offset, 1);
        let last = args.len() - 1;
        let mut acc = head;
        for (i, arg) in args.into_iter().enumerate() {
            let sp = if i == last { span } else { open.to(arg.ann.span().unwrap_or(open)) };
            acc = Type::new(
                TypeKind::App { func: Box::new(acc), arg: Box::new(arg) },
                Annotation::Position(sp),
            );
        }
        Ok(acc)
    }

    pub fn term(&mut self) -> PResult<Term> {
        self.nested(|p| {
            if p.at(&Tok::LParen) {
                let (kind, span) = p.between(&Tok::LParen, &Tok::RParen, |p| {
                    p.choice(&[
                        Self::term_lam,
                        Self::term_abs,
                        Self::term_iwrap,
                        Self::term_unwrap,
                        Self::term_error,
                        Self::term_con,
                        Self::term_builtin,
                        Self::term_prod,
                        Self::term_proj,
                    ])
                })?;
                return Ok(Term::new(kind, Annotation::Position(span)));
            }
            if p.at(&Tok::LBracket) {
                return p.term_apply();
            }
            if p.at(&Tok::LBrace) {
                return p.term_inst();
            }
            if !p.at(&Tok::Ident) {
                return Err(p.unexpected(TERM_START));
            }
            let (name, span) = p.spanned_name()?;
            Ok(Term::new(TermKind::Var(name), Annotation::Position(span)))
        })
    }

    fn term_lam(&mut self) -> PResult<TermKind> {
        self.keyword("lam")?;
        let binder = self.name()?;
        let ty = self.ty()?;
        let body = self.term()?;
        Ok(TermKind::Lam { binder, ty, body: Box::new(body) })
    }

    fn term_abs(&mut self) -> PResult<TermKind> {
        self.keyword("abs")?;
        let binder = self.ty_name()?;
        let kind = self.kind()?;
        let body = self.term()?;
        Ok(TermKind::Abs { binder, kind, body: Box::new(body) })
    }

    fn term_iwrap(&mut self) -> PResult<TermKind> {
        self.keyword("iwrap")?;
        let pattern = self.ty()?;
        let arg = self.ty()?;
        let term = self.term()?;
        Ok(TermKind::IWrap { pattern, arg, term: Box::new(term) })
    }

    fn term_unwrap(&mut self) -> PResult<TermKind> {
        self.keyword("unwrap")?;
        Ok(TermKind::Unwrap(Box::new(self.term()?)))
    }

    fn term_error(&mut self) -> PResult<TermKind> {
        self.keyword("error")?;
        Ok(TermKind::Error(self.ty()?))
    }

    fn term_con(&mut self) -> PResult<TermKind> {
        self.keyword("con")?;
        Ok(TermKind::Constant(self.constant()?))
    }

    fn term_builtin(&mut self) -> PResult<TermKind> {
        self.keyword("builtin")?;
        Ok(TermKind::Builtin(self.builtin_name()?))
    }

    fn term_prod(&mut self) -> PResult<TermKind> {
        self.keyword("prod")?;
        Ok(TermKind::Prod(self.many(Self::term)?))
    }

    fn term_proj(&mut self) -> PResult<TermKind> {
        self.keyword("proj")?;
        let (index, _) = self.natural::<usize>()?;
        let term = self.term()?;
        Ok(TermKind::Proj { index, term: Box::new(term) })
    }

    /// `[ term term+ ]`, left-nested.
    fn term_apply(&mut self) -> PResult<Term> {
        let ((head, args), span) = self.between(&Tok::LBracket, &Tok::RBracket, |p| {
            let head = p.term()?;
            let args = p.some(Self::term)?;
            Ok((head, args))
        })?;
        let open = Span::new(span.offset, 1);
        let last = args.len() - 1;
        let mut acc = head;
        for (i, arg) in args.into_iter().enumerate() {
            let sp = if i == last { span } else { open.to(arg.ann.span().unwrap_or(open)) };
            acc = Term::new(
                TermKind::Apply { func: Box::new(acc), arg: Box::new(arg) },
                Annotation::Position(sp),
            );
        }
        Ok(acc)
    }

    /// `{ term type+ }`, left-nested.
    fn term_inst(&mut self) -> PResult<Term> {
        let ((head, tys), span) = self.between(&Tok::LBrace, &Tok::RBrace, |p| {
            let head = p.term()?;
            let tys = p.some(Self::ty)?;
            Ok((head, tys))
        })?;
        let open = Span::new(span.offset, 1);
        let last = tys.len() - 1;
        let mut acc = head;
        for (i, ty) in tys.into_iter().enumerate() {
            let sp = if i == last { span } else { open.to(ty.ann.span().unwrap_or(open)) };
            acc = Term::new(
                TermKind::Inst { term: Box::new(acc), ty },
                Annotation::Position(sp),
            );
        }
        Ok(acc)
    }

    /// `( program version term )`
    pub fn program(&mut self) -> PResult<Program> {
        let ((version, term), span) = self.between(&Tok::LParen, &Tok::RParen, |p| {
            p.keyword("program")?;
            let version = p.version()?;
            let term = p.term()?;
            Ok((version, term))
        })?;
        Ok(Program::new(version, term, Annotation::Position(span)))
    }
}
