use fxhash::FxHashMap;
use tracing::trace;

use crate::entry::{Entry, EntryId};

/// Arena of entries plus the name → entry map. Entries are never removed.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    entries: Vec<Entry>,
    symbols: FxHashMap<String, EntryId>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        SymbolRegistry::default()
    }

    /// Store `entry`, merging it into an existing definition of the same symbol. Returns the
    /// id of the canonical entry.
    pub fn register(&mut self, entry: Entry) -> EntryId {
        if let Some(name) = &entry.symbol {
            if let Some(&existing) = self.symbols.get(name) {
                trace!(symbol = %name, id = %existing, "merging duplicate definition");
                self.entries[existing.0].merge(entry);
                return existing;
            }
        }

        let id = EntryId(self.entries.len());
        if let Some(name) = &entry.symbol {
            self.symbols.insert(name.clone(), id);
        }
        self.entries.push(entry);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<EntryId> {
        self.symbols.get(name).copied()
    }

    pub fn get(&self, id: EntryId) -> &Entry {
        &self.entries[id.0]
    }

    pub fn get_mut(&mut self, id: EntryId) -> &mut Entry {
        &mut self.entries[id.0]
    }

    /// All entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }

    /// Number of entries, including symbol-less ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}
