//! Commands exposed to the interactive front end
//!
//! Each line typed by the user parses into a `Command`; `execute` runs it
//! against the application state and returns the text to show.

use crate::app::AppState;
use crate::config::{GROUP_COUNT, PAGE_COUNT};
use crate::error::{AppError, Result};
use crate::models::{Credentials, Difficulty, Word};
use crate::services::ToggleOutcome;
use std::fmt::Write as _;

pub const HELP: &str = "\
Commands:
  words <group> <page>    list a textbook page
  word <id>               show one word card
  hard <id>               toggle the word in the hard bucket
  learned <id>            toggle the word in the learned bucket
  list                    show your annotated words
  login <userId> <token>  start a session
  logout                  end the session
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Words { group: u32, page: u32 },
    Word(String),
    Toggle { word_id: String, target: Difficulty },
    List,
    Login(Credentials),
    Logout,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["words", group, page] => {
                let group = parse_index(group, GROUP_COUNT, "group")?;
                let page = parse_index(page, PAGE_COUNT, "page")?;
                Ok(Command::Words { group, page })
            }
            ["word", id] => Ok(Command::Word(id.to_string())),
            ["hard", id] => Ok(Command::Toggle {
                word_id: id.to_string(),
                target: Difficulty::Hard,
            }),
            ["learned", id] => Ok(Command::Toggle {
                word_id: id.to_string(),
                target: Difficulty::Learned,
            }),
            ["list"] => Ok(Command::List),
            ["login", user_id, token] => Ok(Command::Login(Credentials::new(*user_id, *token))),
            ["logout"] => Ok(Command::Logout),
            ["help"] | ["?"] => Ok(Command::Help),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            [] => Err(AppError::InvalidCommand("empty input".to_string())),
            [name, ..] => Err(AppError::InvalidCommand(format!(
                "unknown command or wrong arguments: {}",
                name
            ))),
        }
    }
}

fn parse_index(value: &str, count: u32, what: &str) -> Result<u32> {
    let index: u32 = value
        .parse()
        .map_err(|_| AppError::InvalidCommand(format!("{} must be a number: {}", what, value)))?;

    if index >= count {
        return Err(AppError::InvalidCommand(format!(
            "{} must be between 0 and {}",
            what,
            count - 1
        )));
    }

    Ok(index)
}

/// Run one command and return its output
pub async fn execute(state: &AppState, command: Command) -> Result<String> {
    match command {
        Command::Words { group, page } => list_words(state, group, page).await,
        Command::Word(id) => show_word(state, &id).await,
        Command::Toggle { word_id, target } => toggle_word(state, &word_id, target).await,
        Command::List => Ok(list_annotations(state)),
        Command::Login(creds) => login(state, creds).await,
        Command::Logout => logout(state).await,
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

async fn list_words(state: &AppState, group: u32, page: u32) -> Result<String> {
    let words = state.words.get_words(group, page).await;
    if words.is_empty() {
        return Ok(format!("No words for group {} page {}", group, page));
    }

    let mut out = String::new();
    for word in &words {
        let marker = word
            .id
            .as_deref()
            .and_then(|id| state.store.find_by_word_id(id))
            .map(|a| format!(" ({})", a.difficulty))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}  {} - {}{}",
            word.id.as_deref().unwrap_or("-"),
            word.word,
            word.word_translate,
            marker
        );
    }

    Ok(out.trim_end().to_string())
}

async fn show_word(state: &AppState, id: &str) -> Result<String> {
    match state.words.get_word(id).await {
        Some(word) => Ok(state.card(&word).to_string()),
        None => Ok(format!("Word {} is unavailable", id)),
    }
}

async fn toggle_word(state: &AppState, word_id: &str, target: Difficulty) -> Result<String> {
    let creds = state.session.require_credentials()?;

    // An annotated word can still be toggled while the catalogue is down
    let word = match state.words.get_word(word_id).await {
        Some(word) => word,
        None => match state.store.find_by_word_id(word_id) {
            Some(annotation) => Word::from_annotation(&annotation),
            None => return Ok(format!("Word {} is unavailable", word_id)),
        },
    };

    let outcome = match target {
        Difficulty::Hard => state.sync.toggle_hard(&creds, &word).await,
        Difficulty::Learned => state.sync.toggle_learned(&creds, &word).await,
        Difficulty::Unset => {
            return Err(AppError::InvalidCommand(
                "a word can only be marked hard or learned".to_string(),
            ))
        }
    };

    Ok(match outcome {
        ToggleOutcome::Removed(_) => format!("{} removed from {}", word.word, target),
        ToggleOutcome::Applied(annotation) => {
            format!("{} marked as {}", annotation.the_word, annotation.difficulty)
        }
        ToggleOutcome::Skipped => format!("{} has no id, nothing to do", word.word),
    })
}

fn list_annotations(state: &AppState) -> String {
    let annotations = state.store.list();
    if annotations.is_empty() {
        return "No annotated words".to_string();
    }

    annotations
        .iter()
        .map(|a| {
            format!(
                "{}  {} [{}] guessed {} failed {} (since {})",
                a.word_id,
                a.the_word,
                a.difficulty,
                a.statistic.guessed,
                a.statistic.failed,
                a.post_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn login(state: &AppState, creds: Credentials) -> Result<String> {
    if let Some(settings) = &state.settings {
        settings.update_credentials(Some(creds.clone())).await?;
    }

    let loaded = state.session.login(creds).await?;
    Ok(format!("Logged in, {} annotated words loaded", loaded))
}

async fn logout(state: &AppState) -> Result<String> {
    state.session.logout();

    if let Some(settings) = &state.settings {
        settings.update_credentials(None).await?;
    }

    Ok("Logged out".to_string())
}
