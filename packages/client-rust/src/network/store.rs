//! In-memory student storage backed by [`DashMap`].
//!
//! Ids are assigned from a monotonically increasing counter and never
//! reused, so a deleted id cannot come back as a different student.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use roster_core::messages::StudentRow;
use roster_core::StudentRecord;

/// Server-side student table.
pub struct StudentStore {
    entries: DashMap<i64, StudentRecord>,
    next_id: AtomicI64,
}

impl StudentStore {
    /// Creates an empty store whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Stores a record under a fresh id and returns the id.
    pub fn insert(&self, record: StudentRecord) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, record);
        id
    }

    /// Removes the record with `id`, returning it if it existed.
    pub fn remove(&self, id: i64) -> Option<StudentRecord> {
        self.entries.remove(&id).map(|(_, r)| r)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rows ordered by id.
    #[must_use]
    pub fn rows(&self) -> Vec<StudentRow> {
        let mut rows: Vec<StudentRow> = self
            .entries
            .iter()
            .map(|entry| StudentRow {
                id: *entry.key(),
                name: entry.value().name.clone(),
                course: entry.value().course.clone(),
                grade: entry.value().grade,
            })
            .collect();
        rows.sort_by_key(|row| row.id);
        rows
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}
