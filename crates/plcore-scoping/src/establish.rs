//! Re-freshening every name in a tree and classifying its annotations.
//!
//! Binders get a fresh unique and whatever the registrar returns for them.
//! Variable occurrences are freshened too, independently of any enclosing
//! binder: they are never resolved, so after this pass no occurrence shares
//! a unique with a binder. Nodes that carry no name are marked `NotAName`.

use crate::registrar::Registrar;
use plcore_ast::ast::{
    Annotation, Kind, KindForm, Program, Term, TermKind, Type, TypeKind, Version,
};
use plcore_ast::name::{FreshSupply, Name, ScopedName, TyName};

/// Recursion follows the tree, one call per level. Trees from
/// `plcore-parser` are bounded by its `max_depth`; callers that build trees
/// by hand are responsible for keeping them shallow.
pub trait EstablishScoping: Sized {
    fn establish_scoping<R: Registrar + ?Sized>(
        &self,
        supply: &mut FreshSupply,
        reg: &mut R,
    ) -> Self;
}

/// The two kinds of name a binder site can introduce.
trait Bound: Sized {
    fn freshen(&self, supply: &mut FreshSupply) -> Self;
    fn scoped(&self) -> ScopedName;
}

impl Bound for Name {
    fn freshen(&self, supply: &mut FreshSupply) -> Self {
        Name::freshen(self, supply)
    }

    fn scoped(&self) -> ScopedName {
        ScopedName::Term(self.clone())
    }
}

impl Bound for TyName {
    fn freshen(&self, supply: &mut FreshSupply) -> Self {
        TyName::freshen(self, supply)
    }

    fn scoped(&self) -> ScopedName {
        ScopedName::Type(self.clone())
    }
}

/// Freshen `binder`, register it, then let `rebuild` recurse into the
/// children. The binder is registered before anything beneath it.
fn establish_binder<N, K, R>(
    binder: &N,
    supply: &mut FreshSupply,
    reg: &mut R,
    rebuild: impl FnOnce(N, &mut FreshSupply, &mut R) -> K,
) -> (K, Annotation)
where
    N: Bound,
    R: Registrar + ?Sized,
{
    let fresh = binder.freshen(supply);
    let ann = reg.register_binder(&fresh.scoped());
    (rebuild(fresh, supply, reg), ann)
}

fn establish_free<N, R>(name: &N, supply: &mut FreshSupply, reg: &mut R) -> (N, Annotation)
where
    N: Bound,
    R: Registrar + ?Sized,
{
    let fresh = name.freshen(supply);
    let ann = reg.register_free(&fresh.scoped());
    (fresh, ann)
}

impl EstablishScoping for Kind {
    fn establish_scoping<R: Registrar + ?Sized>(&self, supply: &mut FreshSupply, reg: &mut R) -> Self {
        let form = match &self.form {
            KindForm::Type => KindForm::Type,
            KindForm::Arrow(a, b) => KindForm::Arrow(
                Box::new(a.establish_scoping(supply, reg)),
                Box::new(b.establish_scoping(supply, reg)),
            ),
        };
        Kind::new(form, Annotation::NotAName)
    }
}

impl EstablishScoping for Type {
    fn establish_scoping<R: Registrar + ?Sized>(&self, supply: &mut FreshSupply, reg: &mut R) -> Self {
        let (kind, ann) = match &self.kind {
            TypeKind::Lam { binder, kind, body } => {
                establish_binder(binder, supply, reg, |binder, supply, reg| TypeKind::Lam {
                    binder,
                    kind: kind.establish_scoping(supply, reg),
                    body: Box::new(body.establish_scoping(supply, reg)),
                })
            }
            TypeKind::Forall { binder, kind, body } => {
                establish_binder(binder, supply, reg, |binder, supply, reg| TypeKind::Forall {
                    binder,
                    kind: kind.establish_scoping(supply, reg),
                    body: Box::new(body.establish_scoping(supply, reg)),
                })
            }
            TypeKind::Var(name) => {
                let (name, ann) = establish_free(name, supply, reg);
                (TypeKind::Var(name), ann)
            }
            TypeKind::IFix { pattern, arg } => (
                TypeKind::IFix {
                    pattern: Box::new(pattern.establish_scoping(supply, reg)),
                    arg: Box::new(arg.establish_scoping(supply, reg)),
                },
                Annotation::NotAName,
            ),
            TypeKind::App { func, arg } => (
                TypeKind::App {
                    func: Box::new(func.establish_scoping(supply, reg)),
                    arg: Box::new(arg.establish_scoping(supply, reg)),
                },
                Annotation::NotAName,
            ),
            TypeKind::Fun { domain, codomain } => (
                TypeKind::Fun {
                    domain: Box::new(domain.establish_scoping(supply, reg)),
                    codomain: Box::new(codomain.establish_scoping(supply, reg)),
                },
                Annotation::NotAName,
            ),
            TypeKind::Builtin(b) => (TypeKind::Builtin(*b), Annotation::NotAName),
            TypeKind::Prod(items) => (
                TypeKind::Prod(items.iter().map(|t| t.establish_scoping(supply, reg)).collect()),
                Annotation::NotAName,
            ),
        };
        Type::new(kind, ann)
    }
}

impl EstablishScoping for Term {
    fn establish_scoping<R: Registrar + ?Sized>(&self, supply: &mut FreshSupply, reg: &mut R) -> Self {
        let (kind, ann) = match &self.kind {
            TermKind::Lam { binder, ty, body } => {
                establish_binder(binder, supply, reg, |binder, supply, reg| TermKind::Lam {
                    binder,
                    ty: ty.establish_scoping(supply, reg),
                    body: Box::new(body.establish_scoping(supply, reg)),
                })
            }
            TermKind::Abs { binder, kind, body } => {
                establish_binder(binder, supply, reg, |binder, supply, reg| TermKind::Abs {
                    binder,
                    kind: kind.establish_scoping(supply, reg),
                    body: Box::new(body.establish_scoping(supply, reg)),
                })
            }
            TermKind::Var(name) => {
                let (name, ann) = establish_free(name, supply, reg);
                (TermKind::Var(name), ann)
            }
            TermKind::IWrap { pattern, arg, term } => (
                TermKind::IWrap {
                    pattern: pattern.establish_scoping(supply, reg),
                    arg: arg.establish_scoping(supply, reg),
                    term: Box::new(term.establish_scoping(supply, reg)),
                },
                Annotation::NotAName,
            ),
            TermKind::Unwrap(term) => (
                TermKind::Unwrap(Box::new(term.establish_scoping(supply, reg))),
                Annotation::NotAName,
            ),
            TermKind::Apply { func, arg } => (
                TermKind::Apply {
                    func: Box::new(func.establish_scoping(supply, reg)),
                    arg: Box::new(arg.establish_scoping(supply, reg)),
                },
                Annotation::NotAName,
            ),
            TermKind::Inst { term, ty } => (
                TermKind::Inst {
                    term: Box::new(term.establish_scoping(supply, reg)),
                    ty: ty.establish_scoping(supply, reg),
                },
                Annotation::NotAName,
            ),
            TermKind::Error(ty) => (
                TermKind::Error(ty.establish_scoping(supply, reg)),
                Annotation::NotAName,
            ),
            TermKind::Constant(c) => (TermKind::Constant(c.clone()), Annotation::NotAName),
            TermKind::Builtin(b) => (TermKind::Builtin(*b), Annotation::NotAName),
            TermKind::Prod(items) => (
                TermKind::Prod(items.iter().map(|t| t.establish_scoping(supply, reg)).collect()),
                Annotation::NotAName,
            ),
            TermKind::Proj { index, term } => (
                TermKind::Proj {
                    index: *index,
                    term: Box::new(term.establish_scoping(supply, reg)),
                },
                Annotation::NotAName,
            ),
        };
        Term::new(kind, ann)
    }
}

impl EstablishScoping for Program {
    fn establish_scoping<R: Registrar + ?Sized>(&self, supply: &mut FreshSupply, reg: &mut R) -> Self {
        let version = Version {
            ann: Annotation::NotAName,
            ..self.version.clone()
        };
        Program::new(
            version,
            self.term.establish_scoping(supply, reg),
            Annotation::NotAName,
        )
    }
}
