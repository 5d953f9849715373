//! Domain models
//!
//! Rust structs for the words catalogue, per-user word annotations and
//! user statistics. Wire shapes follow the REST API's camelCase JSON.

use crate::config::POST_DATE_FORMAT;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// A word record from the catalogue. Server-owned and never mutated here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireWord")]
pub struct Word {
    /// Canonical identifier, normalized from either `id` or `_id`
    pub id: Option<String>,
    pub group: u32,
    pub page: u32,
    pub word: String,
    pub image: String,
    pub audio: String,
    pub audio_meaning: String,
    pub audio_example: String,
    /// HTML fragment
    pub text_meaning: String,
    /// HTML fragment
    pub text_example: String,
    pub transcription: String,
    pub word_translate: String,
    pub text_meaning_translate: String,
    pub text_example_translate: String,
}

impl Word {
    /// Minimal word carrying only what an annotation remembers
    pub fn from_annotation(annotation: &UserWord) -> Self {
        Self {
            id: Some(annotation.word_id.clone()),
            word: annotation.the_word.clone(),
            ..Self::default()
        }
    }
}

/// Word as it arrives on the wire. Plain endpoints send `id`,
/// aggregated endpoints send `_id`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireWord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    group: u32,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    word: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    audio: String,
    #[serde(default)]
    audio_meaning: String,
    #[serde(default)]
    audio_example: String,
    #[serde(default)]
    text_meaning: String,
    #[serde(default)]
    text_example: String,
    #[serde(default)]
    transcription: String,
    #[serde(default)]
    word_translate: String,
    #[serde(default)]
    text_meaning_translate: String,
    #[serde(default)]
    text_example_translate: String,
}

impl From<WireWord> for Word {
    fn from(wire: WireWord) -> Self {
        let id = wire
            .id
            .filter(|id| !id.is_empty())
            .or(wire.object_id.filter(|id| !id.is_empty()));

        Self {
            id,
            group: wire.group,
            page: wire.page,
            word: wire.word,
            image: wire.image,
            audio: wire.audio,
            audio_meaning: wire.audio_meaning,
            audio_example: wire.audio_example,
            text_meaning: wire.text_meaning,
            text_example: wire.text_example,
            transcription: wire.transcription,
            word_translate: wire.word_translate,
            text_meaning_translate: wire.text_meaning_translate,
            text_example_translate: wire.text_example_translate,
        }
    }
}

/// Classification a user gives a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Hard,
    Learned,
    #[default]
    #[serde(other)]
    Unset,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Hard => "hard",
            Difficulty::Learned => "learned",
            Difficulty::Unset => "unset",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game counters for one word. Only the server ever increments them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordStatistic {
    #[serde(default)]
    pub guessed: u32,
    #[serde(default)]
    pub failed: u32,
    /// Whether the most recent attempt was correct
    #[serde(default)]
    pub last: bool,
}

impl WordStatistic {
    /// True when no game has touched the word yet
    pub fn is_empty(&self) -> bool {
        self.guessed == 0 && self.failed == 0
    }
}

/// A user's annotation for one word, as held by the local store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWord {
    pub word_id: String,
    pub difficulty: Difficulty,
    pub statistic: WordStatistic,
    /// Local date the annotation was created, see `POST_DATE_FORMAT`
    pub post_date: String,
    /// Denormalized lexeme for display without refetching the word
    pub the_word: String,
}

impl UserWord {
    pub fn new(
        word_id: impl Into<String>,
        the_word: impl Into<String>,
        difficulty: Difficulty,
        statistic: WordStatistic,
    ) -> Self {
        Self {
            word_id: word_id.into(),
            difficulty,
            statistic,
            post_date: today_post_date(),
            the_word: the_word.into(),
        }
    }

    /// Convert a server record; records without any word id are unusable
    pub fn from_record(record: UserWordRecord) -> Option<Self> {
        let optional = record.optional.unwrap_or_default();
        let word_id = optional
            .word_id
            .or(record.word_id)
            .filter(|id| !id.is_empty())?;

        Some(Self {
            word_id,
            difficulty: record.difficulty,
            statistic: optional.statistic.unwrap_or_default(),
            post_date: optional.post_date.unwrap_or_default(),
            the_word: optional.the_word.unwrap_or_default(),
        })
    }
}

/// Today's date in annotation format, from the local clock
pub fn today_post_date() -> String {
    Local::now().format(POST_DATE_FORMAT).to_string()
}

/// User word as exchanged with `/users/{id}/words`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWordRecord {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<UserWordOptional>,
    /// Present on list responses only; never sent back
    #[serde(default, skip_serializing)]
    pub word_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWordOptional {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<WordStatistic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub the_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_date: Option<String>,
}

/// Word merged with the user's annotation, from `/users/{id}/aggregatedWords/{wordId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedWord {
    #[serde(flatten)]
    pub word: Word,
    #[serde(default)]
    pub user_word: Option<UserWordRecord>,
}

impl AggregatedWord {
    /// The annotation carried by this aggregate, keyed by the word's id
    pub fn into_user_word(self) -> Option<UserWord> {
        let mut record = self.user_word?;
        if record.word_id.is_none() {
            record.word_id = self.word.id.clone();
        }
        let mut user_word = UserWord::from_record(record)?;
        if user_word.the_word.is_empty() {
            user_word.the_word = self.word.word;
        }
        Some(user_word)
    }
}

/// Per-user aggregate counters from `/users/{id}/statistics`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    #[serde(default)]
    pub learned_words: u32,
    #[serde(default)]
    pub optional: serde_json::Map<String, serde_json::Value>,
}

/// Credential pair issued by the authentication service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_id: String,
    pub token: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}
