//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through AppState.

use crate::api::{build_http_client, UserWordsClient, WordsClient};
use crate::card::WordCard;
use crate::error::Result;
use crate::models::{Credentials, Word};
use crate::services::{AnnotationSynchronizer, SessionService, SettingsService};
use crate::storage::AnnotationStore;
use std::path::PathBuf;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub words: WordsClient,
    pub store: AnnotationStore,
    pub session: SessionService,
    pub sync: AnnotationSynchronizer,
    /// Absent when running without a settings directory
    pub settings: Option<SettingsService>,
}

impl AppState {
    /// Wire all services against one API endpoint
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = build_http_client()?;
        let store = AnnotationStore::new();
        let user_words = UserWordsClient::new(http.clone(), endpoint);

        Ok(Self {
            words: WordsClient::new(http, endpoint),
            session: SessionService::new(user_words.clone(), store.clone()),
            sync: AnnotationSynchronizer::new(user_words, store.clone()),
            store,
            settings: None,
        })
    }

    pub fn with_settings(mut self, settings: SettingsService) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Card for `word` as seen by the current session
    pub fn card(&self, word: &Word) -> WordCard {
        let annotation = word
            .id
            .as_deref()
            .and_then(|id| self.store.find_by_word_id(id));

        WordCard::build(
            word,
            annotation.as_ref(),
            self.session.is_logged_in(),
            |path| self.words.asset_url(path),
        )
    }
}

/// Startup options that override the settings file
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub settings_dir: PathBuf,
    pub endpoint: Option<String>,
    pub credentials: Option<Credentials>,
}

/// Application setup - called once on startup
pub async fn setup(options: SetupOptions) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Settings directory: {:?}", options.settings_dir);

    let settings_service = SettingsService::new(options.settings_dir);
    let settings = settings_service.load().await?;

    let endpoint = options.endpoint.unwrap_or(settings.api.endpoint);
    tracing::info!("API endpoint: {}", endpoint);

    let state = AppState::new(&endpoint)?.with_settings(settings_service);

    if let Some(creds) = options.credentials.or(settings.credentials) {
        if let Err(e) = state.session.login(creds).await {
            tracing::warn!("Could not load annotations at startup: {}", e);
        }
    }

    tracing::info!("Application initialized successfully");

    Ok(state)
}
