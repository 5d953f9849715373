//! In-process mock of the RS Lang REST API
//!
//! Serves words, user words, aggregated words and statistics from memory,
//! records every request and can be told to fail individual routes.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const USER_ID: &str = "user-1";
pub const TOKEN: &str = "secret-token";

/// Routes that can be made to fail with 500
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Words,
    GetUserWord,
    WriteUserWord,
    DeleteUserWord,
    Aggregated,
    Statistics,
}

#[derive(Default)]
pub struct BackendState {
    pub words: Vec<Value>,
    /// wordId -> user word record
    pub user_words: HashMap<String, Value>,
    pub statistics: Option<Value>,
    pub calls: Vec<String>,
    pub failing: HashSet<Route>,
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    pub endpoint: String,
    pub state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));

        let app = Router::new()
            .route("/words", get(list_words))
            .route("/words/:id", get(get_word))
            .route("/users/:user_id/words", get(list_user_words))
            .route(
                "/users/:user_id/words/:word_id",
                get(get_user_word)
                    .post(create_user_word)
                    .put(update_user_word)
                    .delete(delete_user_word),
            )
            .route(
                "/users/:user_id/aggregatedWords/:word_id",
                get(get_aggregated_word),
            )
            .route(
                "/users/:user_id/statistics",
                get(get_statistics).put(put_statistics),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}", addr),
            state,
        }
    }

    pub fn add_word(&self, id: &str, word: &str, group: u32, page: u32) {
        self.state.lock().words.push(word_json(id, word, group, page));
    }

    pub fn set_user_word(&self, word_id: &str, record: Value) {
        self.state
            .lock()
            .user_words
            .insert(word_id.to_string(), record);
    }

    pub fn user_word(&self, word_id: &str) -> Option<Value> {
        self.state.lock().user_words.get(word_id).cloned()
    }

    pub fn statistics(&self) -> Option<Value> {
        self.state.lock().statistics.clone()
    }

    pub fn fail(&self, route: Route) {
        self.state.lock().failing.insert(route);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

pub fn word_json(id: &str, word: &str, group: u32, page: u32) -> Value {
    json!({
        "id": id,
        "group": group,
        "page": page,
        "word": word,
        "image": format!("files/{}.jpg", id),
        "audio": format!("files/{}.mp3", id),
        "audioMeaning": format!("files/{}_meaning.mp3", id),
        "audioExample": format!("files/{}_example.mp3", id),
        "textMeaning": format!("<i>{}</i> means something.", word),
        "textExample": format!("An example with <b>{}</b>.", word),
        "transcription": "[-]",
        "wordTranslate": format!("{}-ru", word),
        "textMeaningTranslate": "значение",
        "textExampleTranslate": "пример"
    })
}

pub fn user_word_json(
    word_id: &str,
    difficulty: &str,
    guessed: u32,
    failed: u32,
    last: bool,
) -> Value {
    json!({
        "difficulty": difficulty,
        "optional": {
            "statistic": { "guessed": guessed, "failed": failed, "last": last },
            "wordId": word_id,
            "theWord": word_id,
            "postDate": "1/2/2026"
        }
    })
}

fn record(state: &Shared, call: String) {
    state.lock().calls.push(call);
}

fn failing(state: &Shared, route: Route) -> bool {
    state.lock().failing.contains(&route)
}

fn authorized(headers: &HeaderMap, user_id: &str) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    user_id == USER_ID
        && headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == expected)
            .unwrap_or(false)
}

fn error(status: StatusCode) -> Response {
    (status, status.canonical_reason().unwrap_or("")).into_response()
}

#[derive(Deserialize)]
struct PageQuery {
    group: u32,
    page: u32,
}

async fn list_words(State(state): State<Shared>, Query(q): Query<PageQuery>) -> Response {
    record(&state, format!("GET /words?group={}&page={}", q.group, q.page));
    if failing(&state, Route::Words) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let words: Vec<Value> = state
        .lock()
        .words
        .iter()
        .filter(|w| w["group"] == q.group && w["page"] == q.page)
        .cloned()
        .collect();
    Json(words).into_response()
}

async fn get_word(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    record(&state, format!("GET /words/{}", id));
    if failing(&state, Route::Words) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let word = state.lock().words.iter().find(|w| w["id"] == id).cloned();
    match word {
        Some(word) => Json(word).into_response(),
        None => error(StatusCode::NOT_FOUND),
    }
}

async fn list_user_words(
    State(state): State<Shared>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET /users/words".to_string());
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }

    let records: Vec<Value> = state
        .lock()
        .user_words
        .iter()
        .map(|(word_id, record)| {
            let mut record = record.clone();
            record["id"] = json!(format!("rec-{}", word_id));
            record["wordId"] = json!(word_id);
            record
        })
        .collect();
    Json(records).into_response()
}

async fn get_user_word(
    State(state): State<Shared>,
    Path((user_id, word_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("GET /users/words/{}", word_id));
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::GetUserWord) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let existing = state.lock().user_words.get(&word_id).cloned();
    match existing {
        Some(record) => Json(record).into_response(),
        None => error(StatusCode::NOT_FOUND),
    }
}

async fn create_user_word(
    State(state): State<Shared>,
    Path((user_id, word_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, format!("POST /users/words/{}", word_id));
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::WriteUserWord) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let mut guard = state.lock();
    if guard.user_words.contains_key(&word_id) {
        return error(StatusCode::EXPECTATION_FAILED);
    }
    guard.user_words.insert(word_id, body.clone());
    Json(body).into_response()
}

async fn update_user_word(
    State(state): State<Shared>,
    Path((user_id, word_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, format!("PUT /users/words/{}", word_id));
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::WriteUserWord) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    state.lock().user_words.insert(word_id, body.clone());
    Json(body).into_response()
}

async fn delete_user_word(
    State(state): State<Shared>,
    Path((user_id, word_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("DELETE /users/words/{}", word_id));
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::DeleteUserWord) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    match state.lock().user_words.remove(&word_id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error(StatusCode::NOT_FOUND),
    }
}

async fn get_aggregated_word(
    State(state): State<Shared>,
    Path((user_id, word_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("GET /users/aggregatedWords/{}", word_id));
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::Aggregated) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let guard = state.lock();
    let Some(word) = guard.words.iter().find(|w| w["id"] == word_id) else {
        return error(StatusCode::NOT_FOUND);
    };

    // Aggregated words use `_id` instead of `id`
    let mut aggregated = word.clone();
    if let Some(object) = aggregated.as_object_mut() {
        object.remove("id");
        object.insert("_id".to_string(), json!(word_id));
        if let Some(user_word) = guard.user_words.get(&word_id) {
            object.insert("userWord".to_string(), user_word.clone());
        }
    }
    Json(json!([aggregated])).into_response()
}

async fn get_statistics(
    State(state): State<Shared>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET /users/statistics".to_string());
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::Statistics) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let statistics = state.lock().statistics.clone();
    match statistics {
        Some(stats) => Json(stats).into_response(),
        None => error(StatusCode::NOT_FOUND),
    }
}

async fn put_statistics(
    State(state): State<Shared>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "PUT /users/statistics".to_string());
    if !authorized(&headers, &user_id) {
        return error(StatusCode::UNAUTHORIZED);
    }
    if failing(&state, Route::Statistics) {
        return error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    state.lock().statistics = Some(body.clone());
    Json(body).into_response()
}
