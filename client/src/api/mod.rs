//! Remote REST API clients
//!
//! - `words`: read-only word catalogue
//! - `user_words`: per-user word annotations and statistics
//!
//! Every call returns an explicit `Result`; no retries, no caching.

pub mod user_words;
pub mod words;

pub use user_words::UserWordsClient;
pub use words::WordsClient;

use crate::config::USER_AGENT;
use crate::error::{AppError, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// Build the shared HTTP client
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Join a relative path onto the endpoint with exactly one slash
pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map non-2xx responses onto the error taxonomy
pub(crate) async fn ensure_success(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(resource.to_string()));
    }

    let message = response
        .text()
        .await
        .ok()
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    Err(AppError::Service {
        status: status.as_u16(),
        message,
    })
}

/// Decode a JSON body, keeping decode failures distinct from transport failures
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    let value = serde_json::from_str(&body)?;
    Ok(value)
}
