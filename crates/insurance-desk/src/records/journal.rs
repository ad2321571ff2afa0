use std::collections::vec_deque;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Append-only sequence that keeps the most recent entry at the front.
///
/// Entries are never edited or removed individually; `clear` drops everything at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal<T> {
    entries: VecDeque<T>,
}

impl<T> Default for Journal<T> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<T> Journal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new entry ahead of everything already present.
    pub fn record(&mut self, entry: T) {
        self.entries.push_front(entry);
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}

impl<'a, T> IntoIterator for &'a Journal<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
