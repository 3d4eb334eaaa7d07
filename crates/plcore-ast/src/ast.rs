use crate::constant::{BuiltinName, BuiltinType, Constant};
use crate::name::{Name, ScopedName, TyName};
use crate::span::Span;
use serde::Serialize;

/// Per-node annotation slot.
///
/// The parser fills it with `Position`; the scoping pass replaces it with
/// `NotAName`, `Binder` or `Free`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Annotation {
    #[default]
    Absent,
    Position(Span),
    NotAName,
    Binder(ScopedName),
    Free(ScopedName),
}

impl Annotation {
    pub fn span(&self) -> Option<Span> {
        match self {
            Annotation::Position(sp) => Some(*sp),
            _ => None,
        }
    }

    pub fn scoped_name(&self) -> Option<&ScopedName> {
        match self {
            Annotation::Binder(n) | Annotation::Free(n) => Some(n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindForm {
    Type,
    Arrow(Box<Kind>, Box<Kind>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kind {
    pub form: KindForm,
    pub ann: Annotation,
}

impl Kind {
    pub fn new(form: KindForm, ann: Annotation) -> Self {
        Self { form, ann }
    }

    pub fn star() -> Self {
        Self::new(KindForm::Type, Annotation::Absent)
    }

    pub fn arrow(from: Kind, to: Kind) -> Self {
        Self::new(KindForm::Arrow(Box::new(from), Box::new(to)), Annotation::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `(lam a K T)`
    Lam {
        binder: TyName,
        kind: Kind,
        body: Box<Type>,
    },
    /// `(all a K T)`
    Forall {
        binder: TyName,
        kind: Kind,
        body: Box<Type>,
    },
    /// `(ifix F A)`: fix-point of the pattern functor `F` at index `A`.
    IFix {
        pattern: Box<Type>,
        arg: Box<Type>,
    },
    App {
        func: Box<Type>,
        arg: Box<Type>,
    },
    Fun {
        domain: Box<Type>,
        codomain: Box<Type>,
    },
    Var(TyName),
    Builtin(BuiltinType),
    Prod(Vec<Type>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub ann: Annotation,
}

impl Type {
    pub fn new(kind: TypeKind, ann: Annotation) -> Self {
        Self { kind, ann }
    }

    pub fn var(name: TyName) -> Self {
        Self::new(TypeKind::Var(name), Annotation::Absent)
    }

    pub fn builtin(ty: BuiltinType) -> Self {
        Self::new(TypeKind::Builtin(ty), Annotation::Absent)
    }

    pub fn lam(binder: TyName, kind: Kind, body: Type) -> Self {
        Self::new(
            TypeKind::Lam { binder, kind, body: Box::new(body) },
            Annotation::Absent,
        )
    }

    pub fn forall(binder: TyName, kind: Kind, body: Type) -> Self {
        Self::new(
            TypeKind::Forall { binder, kind, body: Box::new(body) },
            Annotation::Absent,
        )
    }

    pub fn ifix(pattern: Type, arg: Type) -> Self {
        Self::new(
            TypeKind::IFix { pattern: Box::new(pattern), arg: Box::new(arg) },
            Annotation::Absent,
        )
    }

    pub fn app(func: Type, arg: Type) -> Self {
        Self::new(
            TypeKind::App { func: Box::new(func), arg: Box::new(arg) },
            Annotation::Absent,
        )
    }

    pub fn fun(domain: Type, codomain: Type) -> Self {
        Self::new(
            TypeKind::Fun { domain: Box::new(domain), codomain: Box::new(codomain) },
            Annotation::Absent,
        )
    }

    pub fn prod(items: Vec<Type>) -> Self {
        Self::new(TypeKind::Prod(items), Annotation::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    /// `(lam x T t)`
    Lam {
        binder: Name,
        ty: Type,
        body: Box<Term>,
    },
    /// `(abs a K t)`
    Abs {
        binder: TyName,
        kind: Kind,
        body: Box<Term>,
    },
    /// `(iwrap F A t)`
    IWrap {
        pattern: Type,
        arg: Type,
        term: Box<Term>,
    },
    Unwrap(Box<Term>),
    Apply {
        func: Box<Term>,
        arg: Box<Term>,
    },
    /// Type instantiation `{t T}`.
    Inst {
        term: Box<Term>,
        ty: Type,
    },
    Error(Type),
    Var(Name),
    Constant(Constant),
    Builtin(BuiltinName),
    Prod(Vec<Term>),
    /// `(proj i t)`, zero-based.
    Proj {
        index: usize,
        term: Box<Term>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub kind: TermKind,
    pub ann: Annotation,
}

impl Term {
    pub fn new(kind: TermKind, ann: Annotation) -> Self {
        Self { kind, ann }
    }

    pub fn var(name: Name) -> Self {
        Self::new(TermKind::Var(name), Annotation::Absent)
    }

    pub fn constant(c: Constant) -> Self {
        Self::new(TermKind::Constant(c), Annotation::Absent)
    }

    pub fn builtin(b: BuiltinName) -> Self {
        Self::new(TermKind::Builtin(b), Annotation::Absent)
    }

    pub fn lam(binder: Name, ty: Type, body: Term) -> Self {
        Self::new(
            TermKind::Lam { binder, ty, body: Box::new(body) },
            Annotation::Absent,
        )
    }

    pub fn abs(binder: TyName, kind: Kind, body: Term) -> Self {
        Self::new(
            TermKind::Abs { binder, kind, body: Box::new(body) },
            Annotation::Absent,
        )
    }

    pub fn iwrap(pattern: Type, arg: Type, term: Term) -> Self {
        Self::new(
            TermKind::IWrap { pattern, arg, term: Box::new(term) },
            Annotation::Absent,
        )
    }

    pub fn unwrap(term: Term) -> Self {
        Self::new(TermKind::Unwrap(Box::new(term)), Annotation::Absent)
    }

    pub fn apply(func: Term, arg: Term) -> Self {
        Self::new(
            TermKind::Apply { func: Box::new(func), arg: Box::new(arg) },
            Annotation::Absent,
        )
    }

    pub fn inst(term: Term, ty: Type) -> Self {
        Self::new(
            TermKind::Inst { term: Box::new(term), ty },
            Annotation::Absent,
        )
    }

    pub fn error(ty: Type) -> Self {
        Self::new(TermKind::Error(ty), Annotation::Absent)
    }

    pub fn prod(items: Vec<Term>) -> Self {
        Self::new(TermKind::Prod(items), Annotation::Absent)
    }

    pub fn proj(index: usize, term: Term) -> Self {
        Self::new(
            TermKind::Proj { index, term: Box::new(term) },
            Annotation::Absent,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub ann: Annotation,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch, ann: Annotation::Absent }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub version: Version,
    pub term: Term,
    pub ann: Annotation,
}

impl Program {
    pub fn new(version: Version, term: Term, ann: Annotation) -> Self {
        Self { version, term, ann }
    }
}
