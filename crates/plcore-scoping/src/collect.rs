//! Folding a classified tree into a [`ScopeInfo`].

use crate::info::{ScopeEntry, ScopeInfo};
use plcore_ast::ast::{Kind, Program, Term, TermKind, Type, TypeKind};
use plcore_ast::name::ScopedName;

/// Recurses once per tree level, like [`EstablishScoping`](crate::EstablishScoping);
/// the depth bound is the caller's.
pub trait CollectScopeInfo {
    fn collect_scope_info(&self) -> ScopeInfo;
}

/// Kinds never mention names.
impl CollectScopeInfo for Kind {
    fn collect_scope_info(&self) -> ScopeInfo {
        ScopeInfo::empty()
    }
}

impl CollectScopeInfo for Type {
    fn collect_scope_info(&self) -> ScopeInfo {
        match &self.kind {
            TypeKind::Lam { binder, kind, body } | TypeKind::Forall { binder, kind, body } => {
                ScopeInfo::singleton(ScopeEntry::binder(
                    ScopedName::Type(binder.clone()),
                    self.ann.clone(),
                ))
                .combine(kind.collect_scope_info())
                .combine(body.collect_scope_info())
            }
            TypeKind::Var(name) => ScopeInfo::singleton(ScopeEntry::free(
                ScopedName::Type(name.clone()),
                self.ann.clone(),
            )),
            TypeKind::IFix { pattern: a, arg: b }
            | TypeKind::App { func: a, arg: b }
            | TypeKind::Fun { domain: a, codomain: b } => {
                a.collect_scope_info().combine(b.collect_scope_info())
            }
            TypeKind::Builtin(_) => ScopeInfo::empty(),
            TypeKind::Prod(items) => items.iter().map(Type::collect_scope_info).sum(),
        }
    }
}

impl CollectScopeInfo for Term {
    fn collect_scope_info(&self) -> ScopeInfo {
        match &self.kind {
            TermKind::Lam { binder, ty, body } => ScopeInfo::singleton(ScopeEntry::binder(
                ScopedName::Term(binder.clone()),
                self.ann.clone(),
            ))
            .combine(ty.collect_scope_info())
            .combine(body.collect_scope_info()),
            TermKind::Abs { binder, kind, body } => ScopeInfo::singleton(ScopeEntry::binder(
                ScopedName::Type(binder.clone()),
                self.ann.clone(),
            ))
            .combine(kind.collect_scope_info())
            .combine(body.collect_scope_info()),
            TermKind::Var(name) => ScopeInfo::singleton(ScopeEntry::free(
                ScopedName::Term(name.clone()),
                self.ann.clone(),
            )),
            TermKind::IWrap { pattern, arg, term } => pattern
                .collect_scope_info()
                .combine(arg.collect_scope_info())
                .combine(term.collect_scope_info()),
            TermKind::Unwrap(term) | TermKind::Proj { term, .. } => term.collect_scope_info(),
            TermKind::Apply { func, arg } => {
                func.collect_scope_info().combine(arg.collect_scope_info())
            }
            TermKind::Inst { term, ty } => term.collect_scope_info().combine(ty.collect_scope_info()),
            TermKind::Error(ty) => ty.collect_scope_info(),
            TermKind::Constant(_) | TermKind::Builtin(_) => ScopeInfo::empty(),
            TermKind::Prod(items) => items.iter().map(Term::collect_scope_info).sum(),
        }
    }
}

impl CollectScopeInfo for Program {
    fn collect_scope_info(&self) -> ScopeInfo {
        self.term.collect_scope_info()
    }
}
