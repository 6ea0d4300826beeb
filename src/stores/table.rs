use crate::stores::ids::IdAllocator;
use dashmap::DashMap;

/// In-memory entity table keyed by primary key
///
/// Inserts and point lookups are O(1). Relationship lookups (`filter`, `find`) scan
/// every row, which is fine for demo-sized data but does not scale to large tables.
pub struct Table<T> {
    rows: DashMap<u32, T>,
    ids: IdAllocator,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Assign the next id, build the row from it and store it
    /// Returns a copy of the stored row
    pub fn insert_with(&self, build: impl FnOnce(u32) -> T) -> T {
        let id = self.ids.next_id();
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: u32) -> Option<T> {
        self.rows.get(&id).map(|entry| entry.value().clone())
    }

    /// Mutate a row in place under its entry lock
    /// Returns the updated row, or None if the id is unknown
    pub fn update(&self, id: u32, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut entry = self.rows.get_mut(&id)?;
        apply(entry.value_mut());
        Some(entry.value().clone())
    }

    /// All rows matching the predicate, in no particular order
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// First row matching the predicate
    /// Note: This is a linear search
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    /// All rows ordered by id
    pub fn values(&self) -> Vec<T> {
        let mut rows: Vec<(u32, T)> = self
            .rows
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
