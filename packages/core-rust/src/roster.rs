//! In-memory roster of confirmed student records.
//!
//! The roster only ever holds entries the remote store has confirmed; it is
//! the single source for the grade average. Insertion order is kept so rows
//! can be listed the way they were first rendered, but nothing else depends
//! on it.

use std::collections::HashMap;
use std::fmt;

use crate::types::{StudentKey, StudentRecord};

/// Mapping of server-assigned keys to student records.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: HashMap<StudentKey, StudentRecord>,
    order: Vec<StudentKey>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `key`.
    ///
    /// An overwritten entry keeps its original display position. Returns the
    /// previous record, if any.
    pub fn add(&mut self, key: StudentKey, record: StudentRecord) -> Option<StudentRecord> {
        let previous = self.entries.insert(key, record);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    /// Removes the entry for `key`. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: StudentKey) -> Option<StudentRecord> {
        let removed = self.entries.remove(&key)?;
        self.order.retain(|k| *k != key);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, key: StudentKey) -> Option<&StudentRecord> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: StudentKey) -> bool {
        self.entries.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StudentKey, &StudentRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|record| (*key, record)))
    }

    /// Returns the most recently inserted entry.
    #[must_use]
    pub fn last(&self) -> Option<(StudentKey, &StudentRecord)> {
        let key = *self.order.last()?;
        self.entries.get(&key).map(|record| (key, record))
    }

    /// Exact mean of all grades, or `None` when the roster is empty.
    ///
    /// Rounding is left to the caller that renders the value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u64 = self.entries.values().map(|r| u64::from(r.grade)).sum();
        Some(total as f64 / self.entries.len() as f64)
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "roster is empty");
        }
        for (key, record) in self.iter() {
            writeln!(
                f,
                "{key}: [{}, {}, {}]",
                record.name, record.course, record.grade
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(grade: u32) -> StudentRecord {
        StudentRecord::new("Al", "CS", grade)
    }

    #[test]
    fn average_of_two_entries() {
        let mut roster = Roster::new();
        roster.add(StudentKey(1), student(80));
        roster.add(StudentKey(2), student(90));
        assert_eq!(roster.average(), Some(85.0));
    }

    #[test]
    fn average_is_exact() {
        let mut roster = Roster::new();
        roster.add(StudentKey(1), student(80));
        roster.add(StudentKey(2), student(85));
        assert_eq!(roster.average(), Some(82.5));
    }

    #[test]
    fn empty_roster_has_no_average() {
        assert_eq!(Roster::new().average(), None);
    }

    #[test]
    fn add_overwrites_and_keeps_position() {
        let mut roster = Roster::new();
        roster.add(StudentKey(1), student(10));
        roster.add(StudentKey(2), student(20));
        let previous = roster.add(StudentKey(1), student(30));

        assert_eq!(previous, Some(student(10)));
        assert_eq!(roster.len(), 2);
        let keys: Vec<_> = roster.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![StudentKey(1), StudentKey(2)]);
        assert_eq!(roster.get(StudentKey(1)), Some(&student(30)));
    }

    #[test]
    fn remove_twice_is_a_no_op() {
        let mut roster = Roster::new();
        roster.add(StudentKey(7), student(95));
        assert_eq!(roster.remove(StudentKey(7)), Some(student(95)));
        assert_eq!(roster.remove(StudentKey(7)), None);
        assert!(roster.is_empty());
        assert!(!roster.contains(StudentKey(7)));
    }

    #[test]
    fn remove_absent_key_leaves_roster_untouched() {
        let mut roster = Roster::new();
        roster.add(StudentKey(1), student(50));
        assert_eq!(roster.remove(StudentKey(2)), None);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut roster = Roster::new();
        for key in [5, 3, 9] {
            roster.add(StudentKey(key), student(50));
        }
        roster.remove(StudentKey(3));
        let keys: Vec<_> = roster.iter().map(|(k, _)| k.get()).collect();
        assert_eq!(keys, vec![5, 9]);
        assert_eq!(roster.last().map(|(k, _)| k), Some(StudentKey(9)));
    }

    #[test]
    fn display_lists_entries() {
        let mut roster = Roster::new();
        assert_eq!(roster.to_string(), "roster is empty\n");
        roster.add(StudentKey(3), StudentRecord::new("Grace", "Math", 88));
        assert_eq!(roster.to_string(), "3: [Grace, Math, 88]\n");
    }
}
