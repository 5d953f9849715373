//! Words catalogue client
//!
//! Read-only access to `/words`. The lenient helpers (`get_word`,
//! `get_words`) log and swallow failures so callers only see
//! "word unavailable".

use super::{ensure_success, join_url, read_json};
use crate::error::Result;
use crate::models::Word;

/// Client for the word catalogue
#[derive(Clone)]
pub struct WordsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WordsClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Resolve an asset path (audio, image) against the endpoint
    pub fn asset_url(&self, path: &str) -> String {
        join_url(&self.endpoint, path)
    }

    /// Fetch one word by id
    pub async fn try_get_word(&self, id: &str) -> Result<Word> {
        let url = join_url(&self.endpoint, &format!("words/{}", id));
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let response = ensure_success(response, &format!("word {}", id)).await?;

        read_json(response).await
    }

    /// Fetch one page of a group
    pub async fn try_get_words(&self, group: u32, page: u32) -> Result<Vec<Word>> {
        let url = join_url(&self.endpoint, "words");
        tracing::debug!("GET {} group={} page={}", url, group, page);

        let response = self
            .http
            .get(&url)
            .query(&[("group", group), ("page", page)])
            .send()
            .await?;
        let response =
            ensure_success(response, &format!("words group {} page {}", group, page)).await?;

        read_json(response).await
    }

    /// Fetch one word; any failure yields `None`
    pub async fn get_word(&self, id: &str) -> Option<Word> {
        match self.try_get_word(id).await {
            Ok(word) => Some(word),
            Err(e) => {
                tracing::warn!("Word {} unavailable: {}", id, e);
                None
            }
        }
    }

    /// Fetch one page; any failure yields an empty list
    pub async fn get_words(&self, group: u32, page: u32) -> Vec<Word> {
        match self.try_get_words(group, page).await {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!("Words group {} page {} unavailable: {}", group, page, e);
                Vec::new()
            }
        }
    }
}
