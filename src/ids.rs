//! Monotonic identifier allocation.

/// Hands out strictly increasing ids. An id is never returned twice, even if
/// the record that held it has since been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        IdSequence { next: 1 }
    }
}

impl IdSequence {
    /// Start a sequence after the largest of the given existing ids.
    pub fn after<I: IntoIterator<Item = u64>>(existing: I) -> Self {
        let max = existing.into_iter().max().unwrap_or(0);
        IdSequence { next: max + 1 }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Make sure future ids are greater than `id`.
    pub fn observe(&mut self, id: u64) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}
