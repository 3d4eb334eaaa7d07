//! Unique identifiers, names and the fresh-unique supply.
//!
//! A [`Name`] is a display text paired with a [`Unique`]. Only the unique
//! matters for identity: two names are the same variable iff their uniques
//! are equal, whatever their text says.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Unique(pub u64);

impl fmt::Display for Unique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generation scope for uniques.
///
/// Every value handed out by one supply is distinct from every other value
/// handed out by the same supply. Two supplies promise nothing to each other.
#[derive(Debug, Default)]
pub struct FreshSupply {
    next: u64,
}

impl FreshSupply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_unique(&mut self) -> Unique {
        let u = Unique(self.next);
        self.next += 1;
        u
    }

    /// Number of uniques handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Name {
    pub text: String,
    pub unique: Unique,
}

impl Name {
    pub fn new(text: impl Into<String>, unique: Unique) -> Self {
        Self { text: text.into(), unique }
    }

    /// Same text, brand-new unique.
    pub fn freshen(&self, supply: &mut FreshSupply) -> Self {
        Self::new(self.text.clone(), supply.fresh_unique())
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.unique == other.unique
    }
}
impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique.hash(state);
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unique.cmp(&other.unique)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A name bound or referenced at the type level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TyName(pub Name);

impl TyName {
    pub fn new(text: impl Into<String>, unique: Unique) -> Self {
        Self(Name::new(text, unique))
    }

    pub fn freshen(&self, supply: &mut FreshSupply) -> Self {
        Self(self.0.freshen(supply))
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn unique(&self) -> Unique {
        self.0.unique
    }
}

impl fmt::Display for TyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A name together with the sort it lives in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ScopedName {
    Type(TyName),
    Term(Name),
}

impl ScopedName {
    pub fn unique(&self) -> Unique {
        match self {
            ScopedName::Type(n) => n.unique(),
            ScopedName::Term(n) => n.unique,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ScopedName::Type(n) => n.text(),
            ScopedName::Term(n) => &n.text,
        }
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopedName::Type(n) => write!(f, "type {}_{}", n.text(), n.unique()),
            ScopedName::Term(n) => write!(f, "term {}_{}", n.text, n.unique),
        }
    }
}
