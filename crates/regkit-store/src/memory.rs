//! In-memory store
//!
//! Keys and value names are matched case-insensitively, as the registry does.

use indexmap::IndexMap;
use regkit_value::{KeyPath, RegistryValue};

use crate::{ReadOutcome, StoreReader};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Value(RegistryValue),
    Error(String),
}

/// Store backed by a map, for tests and offline comparison
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: IndexMap<(String, String), Slot>,
}

fn slot_key(section: &str, name: &str) -> (String, String) {
    (section.to_lowercase(), name.to_lowercase())
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value under `section`
    pub fn insert(&mut self, section: &str, name: &str, value: RegistryValue) {
        self.slots.insert(slot_key(section, name), Slot::Value(value));
    }

    /// Builder form of [`MemoryStore::insert`]
    #[must_use]
    pub fn with_value(mut self, section: &str, name: &str, value: RegistryValue) -> Self {
        self.insert(section, name, value);
        self
    }

    /// Make reads of one value fail with `reason`
    #[must_use]
    pub fn with_error(mut self, section: &str, name: &str, reason: impl Into<String>) -> Self {
        self.slots
            .insert(slot_key(section, name), Slot::Error(reason.into()));
        self
    }

    /// Number of stored values and failures
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StoreReader for MemoryStore {
    fn read(&self, path: &KeyPath) -> ReadOutcome {
        if let Err(e) = path.root_key() {
            return ReadOutcome::Error(e.to_string());
        }
        match self
            .slots
            .get(&slot_key(&path.section(), path.value_name()))
        {
            Some(Slot::Value(value)) => ReadOutcome::Found(value.clone()),
            Some(Slot::Error(reason)) => ReadOutcome::Error(reason.clone()),
            None => ReadOutcome::NotFound,
        }
    }
}
