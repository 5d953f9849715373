//! User words client
//!
//! CRUD over a user's per-word annotations, the aggregated word view,
//! and the per-user statistics counter. Every call carries the bearer
//! token from `Credentials`.

use super::{ensure_success, join_url, read_json};
use crate::error::{AppError, Result};
use crate::models::{
    today_post_date, AggregatedWord, Credentials, Difficulty, UserStatistics, UserWord,
    UserWordOptional, UserWordRecord, WordStatistic,
};
use reqwest::Method;
use serde::Deserialize;

/// `aggregatedWords/{id}` answers with an array; tolerate a bare object too
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<AggregatedWord>),
    One(Box<AggregatedWord>),
}

/// Client for `/users/{id}/...` endpoints
#[derive(Clone)]
pub struct UserWordsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UserWordsClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    fn user_url(&self, creds: &Credentials, path: &str) -> String {
        join_url(
            &self.endpoint,
            &format!("users/{}/{}", creds.user_id, path.trim_start_matches('/')),
        )
    }

    fn request(&self, method: Method, url: &str, creds: &Credentials) -> reqwest::RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&creds.token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// List every annotation of the user
    pub async fn list_user_words(&self, creds: &Credentials) -> Result<Vec<UserWordRecord>> {
        let url = self.user_url(creds, "words");
        let response = self.request(Method::GET, &url, creds).send().await?;
        let response = ensure_success(response, "user words").await?;

        read_json(response).await
    }

    /// Get the annotation for one word; `NotFound` when the user has none
    pub async fn get_user_word(
        &self,
        creds: &Credentials,
        word_id: &str,
    ) -> Result<UserWordRecord> {
        let url = self.user_url(creds, &format!("words/{}", word_id));
        let response = self.request(Method::GET, &url, creds).send().await?;
        let response = ensure_success(response, &format!("user word {}", word_id)).await?;

        read_json(response).await
    }

    /// Create the annotation for one word
    pub async fn create_user_word(
        &self,
        creds: &Credentials,
        word_id: &str,
        record: &UserWordRecord,
    ) -> Result<()> {
        let url = self.user_url(creds, &format!("words/{}", word_id));
        let response = self
            .request(Method::POST, &url, creds)
            .json(record)
            .send()
            .await?;
        ensure_success(response, &format!("user word {}", word_id)).await?;

        tracing::info!("Created user word {} ({})", word_id, record.difficulty);
        Ok(())
    }

    /// Replace the annotation for one word
    pub async fn update_user_word(
        &self,
        creds: &Credentials,
        word_id: &str,
        record: &UserWordRecord,
    ) -> Result<()> {
        let url = self.user_url(creds, &format!("words/{}", word_id));
        let response = self
            .request(Method::PUT, &url, creds)
            .json(record)
            .send()
            .await?;
        ensure_success(response, &format!("user word {}", word_id)).await?;

        tracing::info!("Updated user word {} ({})", word_id, record.difficulty);
        Ok(())
    }

    /// Set the difficulty of a word, creating the annotation if needed.
    ///
    /// An existing record keeps its `optional` block so server-side
    /// statistics are never reset. Setting the same difficulty twice
    /// leaves the server unchanged.
    pub async fn set_difficulty(
        &self,
        creds: &Credentials,
        word_id: &str,
        difficulty: Difficulty,
    ) -> Result<()> {
        match self.get_user_word(creds, word_id).await {
            Ok(existing) => {
                let record = UserWordRecord {
                    difficulty,
                    optional: existing.optional,
                    word_id: None,
                };
                self.update_user_word(creds, word_id, &record).await
            }
            Err(AppError::NotFound(_)) => {
                let record = UserWordRecord {
                    difficulty,
                    optional: Some(UserWordOptional {
                        statistic: Some(WordStatistic::default()),
                        word_id: Some(word_id.to_string()),
                        the_word: None,
                        post_date: Some(today_post_date()),
                    }),
                    word_id: None,
                };
                self.create_user_word(creds, word_id, &record).await
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the annotation for one word. A missing annotation is not an error.
    pub async fn delete_user_word(&self, creds: &Credentials, word_id: &str) -> Result<()> {
        let url = self.user_url(creds, &format!("words/{}", word_id));
        let response = self.request(Method::DELETE, &url, creds).send().await?;

        match ensure_success(response, &format!("user word {}", word_id)).await {
            Ok(_) => {
                tracing::info!("Deleted user word {}", word_id);
                Ok(())
            }
            Err(AppError::NotFound(_)) => {
                tracing::debug!("User word {} already absent", word_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Server's merged view of one word; `None` if the user has no annotation
    pub async fn get_aggregated_word(
        &self,
        creds: &Credentials,
        word_id: &str,
    ) -> Result<Option<UserWord>> {
        let url = self.user_url(creds, &format!("aggregatedWords/{}", word_id));
        let response = self.request(Method::GET, &url, creds).send().await?;

        let response = match ensure_success(response, &format!("aggregated word {}", word_id)).await
        {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let aggregated = match read_json::<OneOrMany>(response).await? {
            OneOrMany::Many(words) => words.into_iter().next(),
            OneOrMany::One(word) => Some(*word),
        };

        Ok(aggregated.and_then(|mut word| {
            if word.word.id.is_none() {
                word.word.id = Some(word_id.to_string());
            }
            word.into_user_word()
        }))
    }

    /// Read the user's aggregate counters; a user without statistics reads as zero
    pub async fn get_statistics(&self, creds: &Credentials) -> Result<UserStatistics> {
        let url = self.user_url(creds, "statistics");
        let response = self.request(Method::GET, &url, creds).send().await?;

        match ensure_success(response, "statistics").await {
            Ok(response) => read_json(response).await,
            Err(AppError::NotFound(_)) => Ok(UserStatistics::default()),
            Err(e) => Err(e),
        }
    }

    /// Overwrite the user's aggregate counters
    pub async fn put_statistics(&self, creds: &Credentials, stats: &UserStatistics) -> Result<()> {
        let url = self.user_url(creds, "statistics");
        let response = self
            .request(Method::PUT, &url, creds)
            .json(stats)
            .send()
            .await?;
        ensure_success(response, "statistics").await?;
        Ok(())
    }

    /// Increment the learned-words counter by one
    pub async fn bump_global_statistic(&self, creds: &Credentials) -> Result<()> {
        let mut stats = self.get_statistics(creds).await?;
        stats.learned_words = stats.learned_words.saturating_add(1);
        self.put_statistics(creds, &stats).await?;

        tracing::info!("Learned words counter now {}", stats.learned_words);
        Ok(())
    }
}
