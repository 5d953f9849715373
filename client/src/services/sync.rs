//! Annotation synchronizer
//!
//! Applies a user's "hard"/"learned" toggle to the remote service and
//! then to the local store. The remote side is always written first.
//!
//! Remote failures never abort a toggle: each call site logs the error
//! and carries on with a fallback, so the local store can end up ahead
//! of (or behind) the server. Toggles on the same word are serialized.

use crate::api::UserWordsClient;
use crate::models::{Credentials, Difficulty, UserWord, Word, WordStatistic};
use crate::storage::AnnotationStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// What a toggle did to the local store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The active classification was switched off and the entry removed
    Removed(String),
    /// A new annotation was written (fresh or replacing another classification)
    Applied(UserWord),
    /// The word has no identifier; nothing happened
    Skipped,
}

type LockMap = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// One async lock per word id. Entries live only while someone holds
/// or waits for them.
#[derive(Clone, Default)]
struct WordLocks {
    locks: LockMap,
}

impl WordLocks {
    async fn acquire(&self, word_id: &str) -> WordGuard {
        let lock = self
            .locks
            .lock()
            .entry(word_id.to_string())
            .or_default()
            .clone();
        let guard = lock.lock_owned().await;

        WordGuard {
            guard: Some(guard),
            word_id: word_id.to_string(),
            locks: self.locks.clone(),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

/// Held for the duration of one toggle
struct WordGuard {
    guard: Option<OwnedMutexGuard<()>>,
    word_id: String,
    locks: LockMap,
}

impl Drop for WordGuard {
    fn drop(&mut self) {
        self.guard.take();

        // Only the map's own reference left: nobody is waiting
        let mut locks = self.locks.lock();
        if locks
            .get(&self.word_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.word_id);
        }
    }
}

/// Orchestrates remote user-word calls and the local store
#[derive(Clone)]
pub struct AnnotationSynchronizer {
    user_words: UserWordsClient,
    store: AnnotationStore,
    locks: WordLocks,
}

impl AnnotationSynchronizer {
    pub fn new(user_words: UserWordsClient, store: AnnotationStore) -> Self {
        Self {
            user_words,
            store,
            locks: WordLocks::default(),
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Toggle the word's membership in the "hard" bucket
    pub async fn toggle_hard(&self, creds: &Credentials, word: &Word) -> ToggleOutcome {
        self.toggle(creds, word, Difficulty::Hard).await
    }

    /// Toggle the word's membership in the "learned" bucket
    pub async fn toggle_learned(&self, creds: &Credentials, word: &Word) -> ToggleOutcome {
        self.toggle(creds, word, Difficulty::Learned).await
    }

    async fn toggle(&self, creds: &Credentials, word: &Word, target: Difficulty) -> ToggleOutcome {
        let Some(word_id) = word.id.as_deref() else {
            tracing::debug!("Ignoring {} toggle for word without id: {}", target, word.word);
            return ToggleOutcome::Skipped;
        };

        let _guard = self.locks.acquire(word_id).await;

        match self.store.find_by_word_id(word_id) {
            Some(existing) if existing.difficulty == target => {
                self.switch_off(creds, &existing).await
            }
            _ => self.switch_on(creds, word_id, &word.word, target).await,
        }
    }

    async fn switch_off(&self, creds: &Credentials, existing: &UserWord) -> ToggleOutcome {
        tracing::info!("Removing {} from {}", existing.word_id, existing.difficulty);

        if let Err(e) = self
            .user_words
            .delete_user_word(creds, &existing.word_id)
            .await
        {
            tracing::warn!(
                "Remote delete of {} failed, removing locally anyway: {}",
                existing.word_id,
                e
            );
        }

        self.store.remove(&existing.word_id);
        ToggleOutcome::Removed(existing.word_id.clone())
    }

    async fn switch_on(
        &self,
        creds: &Credentials,
        word_id: &str,
        the_word: &str,
        target: Difficulty,
    ) -> ToggleOutcome {
        tracing::info!("Marking {} as {}", word_id, target);

        if let Err(e) = self.user_words.set_difficulty(creds, word_id, target).await {
            tracing::warn!("Setting {} on {} failed: {}", target, word_id, e);
        }

        if target == Difficulty::Learned {
            if let Err(e) = self.user_words.bump_global_statistic(creds).await {
                tracing::warn!("Learned words counter not updated: {}", e);
            }
        }

        let statistic = match self.user_words.get_aggregated_word(creds, word_id).await {
            Ok(Some(aggregated)) => aggregated.statistic,
            Ok(None) => WordStatistic::default(),
            Err(e) => {
                tracing::warn!("Statistic for {} unavailable, using zeroes: {}", word_id, e);
                WordStatistic::default()
            }
        };

        let annotation = UserWord::new(word_id, the_word, target, statistic);
        self.store.upsert(annotation.clone());

        ToggleOutcome::Applied(annotation)
    }
}
