use std::fmt::Display;

use super::AggregateError;

impl<E> AggregateError<E> {
    /// Swap the entries at positions `i` and `j`.
    ///
    /// Out of range positions leave the aggregate unchanged.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i < self.entries.len() && j < self.entries.len() {
            self.entries.swap(i, j);
        }
    }
}

impl<E: Display> AggregateError<E> {
    /// Return `true` if the text of entry `i` sorts before the text of entry `j`
    pub fn less(&self, i: usize, j: usize) -> bool {
        match (self.entries.get(i), self.entries.get(j)) {
            (Some(a), Some(b)) => a.to_string() < b.to_string(),
            _ => false,
        }
    }

    /// Sort the entries by their rendered text, for deterministic output
    pub fn sort(&mut self) {
        self.entries.sort_by_cached_key(|entry| entry.to_string());
    }
}
