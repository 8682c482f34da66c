//! Specialized collection types

use std::collections::HashMap;

pub use slotmap::{new_key_type, SlotMap};

/// Error returned when an id is inserted twice into the same table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateId(pub String);

/// Ordered, id-keyed table of scene records
///
/// Keeps declaration order for iteration and rejects a second record with an
/// existing id without touching the table.
#[derive(Debug, Clone)]
pub struct IdTable<T> {
    order: Vec<String>,
    items: HashMap<String, T>,
}

impl<T> IdTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }

    /// Insert a record under `id`
    pub fn insert(&mut self, id: impl Into<String>, item: T) -> Result<(), DuplicateId> {
        let id = id.into();
        if self.items.contains_key(&id) {
            return Err(DuplicateId(id));
        }
        self.order.push(id.clone());
        self.items.insert(id, item);
        Ok(())
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    /// Whether a record with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Records in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(move |id| self.items.get(id).map(|item| (id.as_str(), item)))
    }

    /// First record in declaration order
    pub fn first(&self) -> Option<(&str, &T)> {
        self.iter().next()
    }
}

impl<T> Default for IdTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
