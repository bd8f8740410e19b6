use super::{KeyValueStore, StoreResult};
use std::collections::BTreeMap;

/// Process-local store backed by an ordered map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one slot, as if a previous session had written it.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = BTreeMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Borrows the raw slot value without going through the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
