use plcore_ast::ast::Annotation;
use plcore_ast::name::{ScopedName, Unique};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::iter::Sum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Binder,
    Free,
}

/// One binder site or one variable occurrence, with the annotation found
/// on its node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ScopeEntry {
    pub role: Role,
    pub name: ScopedName,
    pub ann: Annotation,
}

impl ScopeEntry {
    pub fn binder(name: ScopedName, ann: Annotation) -> Self {
        Self { role: Role::Binder, name, ann }
    }

    pub fn free(name: ScopedName, ann: Annotation) -> Self {
        Self { role: Role::Free, name, ann }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("{name} is bound {count} times")]
    DuplicateBinder { name: ScopedName, count: usize },
    #[error("free occurrence {name} shares its unique with a binder")]
    CapturedFree { name: ScopedName },
}

/// Multiset of scope entries. Combining is commutative and associative,
/// with [`ScopeInfo::empty`] as identity; equality ignores the order in
/// which entries were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeInfo {
    entries: BTreeMap<ScopeEntry, usize>,
}

impl ScopeInfo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(entry: ScopeEntry) -> Self {
        let mut info = Self::empty();
        info.insert(entry);
        info
    }

    pub fn insert(&mut self, entry: ScopeEntry) {
        *self.entries.entry(entry).or_insert(0) += 1;
    }

    pub fn combine(mut self, other: ScopeInfo) -> ScopeInfo {
        self.merge(other);
        self
    }

    pub fn merge(&mut self, other: ScopeInfo) {
        for (entry, n) in other.entries {
            *self.entries.entry(entry).or_insert(0) += n;
        }
    }

    /// Total number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.entries.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, entry: &ScopeEntry) -> usize {
        self.entries.get(entry).copied().unwrap_or(0)
    }

    /// Distinct entries with their multiplicities, in entry order.
    pub fn entries(&self) -> impl Iterator<Item = (&ScopeEntry, usize)> {
        self.entries.iter().map(|(e, n)| (e, *n))
    }

    /// Every entry, repeated as often as it occurs.
    pub fn iter(&self) -> impl Iterator<Item = &ScopeEntry> {
        self.entries
            .iter()
            .flat_map(|(e, n)| std::iter::repeat(e).take(*n))
    }

    pub fn binders(&self) -> impl Iterator<Item = &ScopeEntry> {
        self.iter().filter(|e| e.role == Role::Binder)
    }

    pub fn frees(&self) -> impl Iterator<Item = &ScopeEntry> {
        self.iter().filter(|e| e.role == Role::Free)
    }

    /// Every binder unique occurs once, and no free occurrence reuses a
    /// binder's unique.
    pub fn check(&self) -> Result<(), ScopeError> {
        let mut bound: BTreeMap<Unique, (&ScopedName, usize)> = BTreeMap::new();
        for e in self.binders() {
            bound.entry(e.name.unique()).or_insert((&e.name, 0)).1 += 1;
        }
        if let Some((name, count)) = bound.values().find(|(_, n)| *n > 1) {
            return Err(ScopeError::DuplicateBinder { name: (*name).clone(), count: *count });
        }
        if let Some(e) = self.frees().find(|e| bound.contains_key(&e.name.unique())) {
            return Err(ScopeError::CapturedFree { name: e.name.clone() });
        }
        Ok(())
    }
}

impl Extend<ScopeEntry> for ScopeInfo {
    fn extend<I: IntoIterator<Item = ScopeEntry>>(&mut self, iter: I) {
        for e in iter {
            self.insert(e);
        }
    }
}

impl FromIterator<ScopeEntry> for ScopeInfo {
    fn from_iter<I: IntoIterator<Item = ScopeEntry>>(iter: I) -> Self {
        let mut info = Self::empty();
        info.extend(iter);
        info
    }
}

impl Sum for ScopeInfo {
    fn sum<I: Iterator<Item = ScopeInfo>>(iter: I) -> Self {
        iter.fold(Self::empty(), ScopeInfo::combine)
    }
}

/// A flat sequence of entries, repeats included.
impl Serialize for ScopeInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcore_ast::name::{Name, TyName};
    use pretty_assertions::assert_eq;

    fn term(text: &str, u: u64) -> ScopedName {
        ScopedName::Term(Name::new(text, Unique(u)))
    }

    #[test]
    fn order_does_not_matter() {
        let a = ScopeEntry::binder(term("x", 1), Annotation::NotAName);
        let b = ScopeEntry::free(term("y", 2), Annotation::NotAName);
        let ab: ScopeInfo = [a.clone(), b.clone()].into_iter().collect();
        let ba: ScopeInfo = [b.clone(), a.clone()].into_iter().collect();
        assert_eq!(ab, ba);
        assert_eq!(
            ScopeInfo::singleton(a.clone()).combine(ScopeInfo::singleton(b)),
            ab
        );
    }

    #[test]
    fn repeats_are_counted() {
        let a = ScopeEntry::free(term("x", 1), Annotation::NotAName);
        let info: ScopeInfo = vec![a.clone(); 3].into_iter().collect();
        assert_eq!(info.count(&a), 3);
        assert_eq!(info.len(), 3);
        assert_eq!(info.iter().count(), 3);
        assert_eq!(info.entries().collect::<Vec<_>>(), vec![(&a, 3)]);
        assert_ne!(info, ScopeInfo::singleton(a));
    }

    #[test]
    fn check_rejects_duplicate_binders() {
        let x = term("x", 7);
        let info: ScopeInfo = [
            ScopeEntry::binder(x.clone(), Annotation::Binder(x.clone())),
            ScopeEntry::binder(x.clone(), Annotation::NotAName),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            info.check(),
            Err(ScopeError::DuplicateBinder { name: x, count: 2 })
        );
    }

    #[test]
    fn check_rejects_captured_frees_across_sorts() {
        let a = ScopedName::Type(TyName::new("a", Unique(3)));
        let v = term("v", 3);
        let info: ScopeInfo = [
            ScopeEntry::binder(a.clone(), Annotation::Binder(a)),
            ScopeEntry::free(v.clone(), Annotation::Free(v.clone())),
        ]
        .into_iter()
        .collect();
        let err = info.check().unwrap_err();
        assert_eq!(err, ScopeError::CapturedFree { name: v });
        assert_eq!(
            err.to_string(),
            "free occurrence term v_3 shares its unique with a binder"
        );
    }

    #[test]
    fn serializes_as_flat_sequence() {
        let x = term("x", 1);
        let e = ScopeEntry::free(x.clone(), Annotation::Free(x));
        let info: ScopeInfo = vec![e; 2].into_iter().collect();
        let json = serde_json::to_value(&info).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["role"], "free");
        assert_eq!(items[0]["name"]["Term"]["text"], "x");
        assert_eq!(items[0]["name"]["Term"]["unique"], 1);
    }
}
