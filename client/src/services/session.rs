//! Session service
//!
//! Owns the credentials of the signed-in user and the lifecycle of the
//! annotation store: filled from the server at login, cleared at logout.

use crate::api::UserWordsClient;
use crate::error::{AppError, Result};
use crate::models::{Credentials, UserWord};
use crate::storage::AnnotationStore;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionService {
    user_words: UserWordsClient,
    store: AnnotationStore,
    credentials: Arc<RwLock<Option<Credentials>>>,
}

impl SessionService {
    pub fn new(user_words: UserWordsClient, store: AnnotationStore) -> Self {
        Self {
            user_words,
            store,
            credentials: Arc::new(RwLock::new(None)),
        }
    }

    /// Start a session and load the user's annotations into the store.
    ///
    /// The credentials are kept even if loading fails; the store is then
    /// left empty and the error returned.
    pub async fn login(&self, creds: Credentials) -> Result<usize> {
        tracing::info!("Starting session for user {}", creds.user_id);

        self.store.clear();
        *self.credentials.write() = Some(creds.clone());

        let records = self.user_words.list_user_words(&creds).await?;
        let total = records.len();
        let annotations: Vec<UserWord> = records
            .into_iter()
            .filter_map(UserWord::from_record)
            .collect();

        if annotations.len() < total {
            tracing::warn!(
                "Skipped {} user words without a word id",
                total - annotations.len()
            );
        }

        self.store.replace_all(annotations);
        let loaded = self.store.len();

        tracing::info!("Loaded {} annotations", loaded);
        Ok(loaded)
    }

    /// End the session: forget credentials and clear the store
    pub fn logout(&self) {
        if let Some(creds) = self.credentials.write().take() {
            tracing::info!("Ending session for user {}", creds.user_id);
        }
        self.store.clear();
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials.read().clone()
    }

    /// Credentials of the current session, or `NotLoggedIn`
    pub fn require_credentials(&self) -> Result<Credentials> {
        self.credentials().ok_or(AppError::NotLoggedIn)
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.read().is_some()
    }
}
