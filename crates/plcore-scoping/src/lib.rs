//! plcore-scoping: alpha-safe renaming and scope reports.
//!
//! [`establish_scoping`] gives every binder and every variable occurrence a
//! fresh unique and lets a [`Registrar`] decide what goes into their
//! annotations. [`collect_scope_info`] reads a classified tree back into a
//! [`ScopeInfo`] multiset that a validator can inspect or
//! [`check`](ScopeInfo::check).

mod collect;
mod establish;
mod info;
mod registrar;


pub use collect::CollectScopeInfo;
pub use establish::EstablishScoping;
pub use info::{Role, ScopeEntry, ScopeError, ScopeInfo};
pub use registrar::{Erasing, Hooks, Recording, Registrar, Tagging};

use plcore_ast::name::FreshSupply;

/// Rename and classify `node`, drawing uniques from `supply`.
///
/// Occurrences are not resolved against the binders above them; each gets
/// its own fresh unique. The traversal recurses once per level of `node`,
/// so its depth must already be bounded, as parser output is.
pub fn establish_scoping<T, R>(node: &T, supply: &mut FreshSupply, reg: &mut R) -> T
where
    T: EstablishScoping,
    R: Registrar + ?Sized,
{
    let before = supply.issued();
    let out = node.establish_scoping(supply, reg);
    log::debug!("establish_scoping: {} fresh uniques", supply.issued() - before);
    out
}

pub fn collect_scope_info<T: CollectScopeInfo>(node: &T) -> ScopeInfo {
    let info = node.collect_scope_info();
    log::debug!(
        "collect_scope_info: {} binders, {} occurrences",
        info.binders().count(),
        info.frees().count()
    );
    info
}
