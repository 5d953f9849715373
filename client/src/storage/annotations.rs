//! Local annotation store
//!
//! In-memory collection of the current user's word annotations.
//! At most one entry exists per word id; absence means "unset".
//! Entries keep their position on replace so listings stay stable.

use crate::models::UserWord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to the current session's annotations
#[derive(Clone, Default)]
pub struct AnnotationStore {
    entries: Arc<RwLock<Vec<UserWord>>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or fully replace the entry for `annotation.word_id`
    pub fn upsert(&self, annotation: UserWord) {
        let mut entries = self.entries.write();
        match entries
            .iter_mut()
            .find(|entry| entry.word_id == annotation.word_id)
        {
            Some(entry) => {
                tracing::debug!(
                    "Replacing annotation {} ({} -> {})",
                    annotation.word_id,
                    entry.difficulty,
                    annotation.difficulty
                );
                *entry = annotation;
            }
            None => {
                tracing::debug!(
                    "Adding annotation {} ({})",
                    annotation.word_id,
                    annotation.difficulty
                );
                entries.push(annotation);
            }
        }
    }

    /// Delete the entry for `word_id`; no-op when absent
    pub fn remove(&self, word_id: &str) -> Option<UserWord> {
        let mut entries = self.entries.write();
        let index = entries.iter().position(|entry| entry.word_id == word_id)?;
        tracing::debug!("Removing annotation {}", word_id);
        Some(entries.remove(index))
    }

    pub fn find_by_word_id(&self, word_id: &str) -> Option<UserWord> {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.word_id == word_id)
            .cloned()
    }

    /// Snapshot of all entries in insertion order
    pub fn list(&self) -> Vec<UserWord> {
        self.entries.read().clone()
    }

    /// Replace the whole collection; later duplicates win
    pub fn replace_all(&self, annotations: impl IntoIterator<Item = UserWord>) {
        self.clear();
        for annotation in annotations {
            self.upsert(annotation);
        }
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
