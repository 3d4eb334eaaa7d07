//! What a scoping pass writes into the annotation of a binder or a variable.

use plcore_ast::ast::Annotation;
use plcore_ast::name::ScopedName;

/// Called once per binder site and once per variable occurrence, in
/// traversal order, with the already-freshened name.
pub trait Registrar {
    fn register_binder(&mut self, name: &ScopedName) -> Annotation;
    fn register_free(&mut self, name: &ScopedName) -> Annotation;
}

impl<R: Registrar + ?Sized> Registrar for &mut R {
    fn register_binder(&mut self, name: &ScopedName) -> Annotation {
        (**self).register_binder(name)
    }

    fn register_free(&mut self, name: &ScopedName) -> Annotation {
        (**self).register_free(name)
    }
}

/// `Binder(name)` on binders, `Free(name)` on variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tagging;

impl Registrar for Tagging {
    fn register_binder(&mut self, name: &ScopedName) -> Annotation {
        Annotation::Binder(name.clone())
    }

    fn register_free(&mut self, name: &ScopedName) -> Annotation {
        Annotation::Free(name.clone())
    }
}

/// `NotAName` everywhere: renames without leaving a trace.
#[derive(Debug, Default, Clone, Copy)]
pub struct Erasing;

impl Registrar for Erasing {
    fn register_binder(&mut self, _: &ScopedName) -> Annotation {
        Annotation::NotAName
    }

    fn register_free(&mut self, _: &ScopedName) -> Annotation {
        Annotation::NotAName
    }
}

/// Tags like [`Tagging`] and keeps every registration in order.
#[derive(Debug, Default, Clone)]
pub struct Recording {
    pub binders: Vec<ScopedName>,
    pub frees: Vec<ScopedName>,
}

impl Registrar for Recording {
    fn register_binder(&mut self, name: &ScopedName) -> Annotation {
        self.binders.push(name.clone());
        Annotation::Binder(name.clone())
    }

    fn register_free(&mut self, name: &ScopedName) -> Annotation {
        self.frees.push(name.clone());
        Annotation::Free(name.clone())
    }
}

/// A registrar made of two closures.
pub struct Hooks<B, F> {
    binder: B,
    free: F,
}

impl<B, F> Hooks<B, F>
where
    B: FnMut(&ScopedName) -> Annotation,
    F: FnMut(&ScopedName) -> Annotation,
{
    pub fn new(binder: B, free: F) -> Self {
        Self { binder, free }
    }
}

impl<B, F> Registrar for Hooks<B, F>
where
    B: FnMut(&ScopedName) -> Annotation,
    F: FnMut(&ScopedName) -> Annotation,
{
    fn register_binder(&mut self, name: &ScopedName) -> Annotation {
        (self.binder)(name)
    }

    fn register_free(&mut self, name: &ScopedName) -> Annotation {
        (self.free)(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcore_ast::name::{Name, TyName, Unique};

    #[test]
    fn tagging_and_erasing() {
        let x = ScopedName::Term(Name::new("x", Unique(1)));
        assert_eq!(Tagging.register_binder(&x), Annotation::Binder(x.clone()));
        assert_eq!(Tagging.register_free(&x), Annotation::Free(x.clone()));
        assert_eq!(Erasing.register_binder(&x), Annotation::NotAName);
        assert_eq!(Erasing.register_free(&x), Annotation::NotAName);
    }

    #[test]
    fn hooks_see_every_call() {
        let mut seen = Vec::new();
        {
            let mut hooks = Hooks::new(
                |n: &ScopedName| Annotation::Binder(n.clone()),
                |n: &ScopedName| {
                    seen.push(n.text().to_string());
                    Annotation::NotAName
                },
            );
            let a = ScopedName::Type(TyName::new("a", Unique(2)));
            assert_eq!(hooks.register_free(&a), Annotation::NotAName);
            assert_eq!(hooks.register_binder(&a), Annotation::Binder(a.clone()));
        }
        assert_eq!(seen, vec!["a"]);
    }
}
