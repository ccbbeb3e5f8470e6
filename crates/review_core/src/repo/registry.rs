//! In-memory identity map of saved reviews.
//!
//! # Invariants
//! - Only reviews with an id are registered; the key is that id.
//! - Entries are added on save and removed on delete, nothing else.
//! - The map is never consulted for validation and may diverge from storage.

use crate::model::review::{Review, ReviewId};
use std::collections::HashMap;

/// Registry of the most recently saved review for each id.
///
/// Stores a snapshot taken at save time; later in-memory edits or `update`
/// calls do not refresh it. Grows until entries are deleted.
#[derive(Debug, Clone, Default)]
pub struct ReviewRegistry {
    entries: HashMap<ReviewId, Review>,
}

impl ReviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `review` under its id, replacing any previous entry.
    ///
    /// Returns `false` without registering when `review` has no id.
    pub fn register(&mut self, review: &Review) -> bool {
        match review.id() {
            Some(id) => {
                self.entries.insert(id, review.clone());
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ReviewId) -> Option<Review> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: ReviewId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<ReviewId> {
        let mut ids: Vec<ReviewId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
