use ahash::AHashMap;
use plcore_ast::name::{FreshSupply, Unique};

/// Spelling-to-unique table for one parse.
///
/// Interning is by spelling only: term and type names share the table and
/// lexical scope plays no part. Entries are never removed, so names seen by
/// an alternative the parser later abandons stay interned.
#[derive(Debug, Default)]
pub struct Interner {
    map: AHashMap<String, Unique>,
    supply: FreshSupply,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supply(supply: FreshSupply) -> Self {
        Self { map: AHashMap::new(), supply }
    }

    pub fn intern(&mut self, text: &str) -> Unique {
        if let Some(u) = self.map.get(text) {
            return *u;
        }
        let u = self.supply.fresh_unique();
        log::trace!("intern {text} -> {u}");
        self.map.insert(text.to_string(), u);
        u
    }

    pub fn lookup(&self, text: &str) -> Option<Unique> {
        self.map.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn supply_mut(&mut self) -> &mut FreshSupply {
        &mut self.supply
    }

    pub fn into_supply(self) -> FreshSupply {
        self.supply
    }
}
