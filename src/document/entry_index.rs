use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::collections::HashMap;

use crate::model::Category;

/// Maps (category, identifier) to the position of an entry in the document.
///
/// Identifiers are compared ignoring ASCII case.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EntryIndex {
    key_to_slot: HashMap<(Category, String), usize>,
    next_slot: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum EntrySlot {
    New(usize),
    Existing(usize),
}

impl EntryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the slot of an identifier, reserving a new one if it is unknown.
    pub fn slot_for(&mut self, category: Category, id: &str) -> EntrySlot {
        match self.key_to_slot.entry(Self::key(category, id)) {
            Occupied(entry) => EntrySlot::Existing(*entry.get()),
            Vacant(entry) => {
                let slot = *entry.insert(self.next_slot);
                self.next_slot += 1;

                EntrySlot::New(slot)
            }
        }
    }

    pub fn get(&self, category: Category, id: &str) -> Option<usize> {
        self.key_to_slot.get(&Self::key(category, id)).copied()
    }

    fn key(category: Category, id: &str) -> (Category, String) {
        (category, id.to_ascii_lowercase())
    }
}
