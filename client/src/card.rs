//! Word card view model
//!
//! Everything a front end needs to draw one word card: texts, resolved
//! asset URLs, which classification buttons are active and the progress
//! badge. `Display` renders it for the terminal.

use crate::models::{Difficulty, UserWord, Word, WordStatistic};
use serde::Serialize;
use std::fmt;

/// Progress badge shown on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressBadge {
    pub guessed: u32,
    pub failed: u32,
    /// Whether the last game answer was correct
    pub last: bool,
}

impl From<WordStatistic> for ProgressBadge {
    fn from(stat: WordStatistic) -> Self {
        Self {
            guessed: stat.guessed,
            failed: stat.failed,
            last: stat.last,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCard {
    pub word_id: Option<String>,
    pub word: String,
    pub transcription: String,
    pub translation: String,
    pub meaning: String,
    pub meaning_translation: String,
    pub example: String,
    pub example_translation: String,
    pub audio_url: String,
    pub additional_audio_urls: Vec<String>,
    pub image_url: String,
    /// Classification buttons are only offered to signed-in users
    pub controls_visible: bool,
    pub hard_active: bool,
    pub learned_active: bool,
    pub progress: Option<ProgressBadge>,
}

impl WordCard {
    /// Build the card for `word`, given its annotation (if any).
    /// `resolve` maps a relative asset path to a full URL.
    pub fn build(
        word: &Word,
        annotation: Option<&UserWord>,
        logged_in: bool,
        resolve: impl Fn(&str) -> String,
    ) -> Self {
        let difficulty = annotation.map(|a| a.difficulty).unwrap_or_default();

        let progress = annotation
            .map(|a| a.statistic)
            .filter(|stat| logged_in && !stat.is_empty())
            .map(ProgressBadge::from);

        Self {
            word_id: word.id.clone(),
            word: word.word.clone(),
            transcription: word.transcription.clone(),
            translation: word.word_translate.clone(),
            meaning: strip_html(&word.text_meaning),
            meaning_translation: word.text_meaning_translate.clone(),
            example: strip_html(&word.text_example),
            example_translation: word.text_example_translate.clone(),
            audio_url: resolve(word.audio.as_str()),
            additional_audio_urls: vec![
                resolve(word.audio_meaning.as_str()),
                resolve(word.audio_example.as_str()),
            ],
            image_url: resolve(word.image.as_str()),
            controls_visible: logged_in,
            hard_active: logged_in && difficulty == Difficulty::Hard,
            learned_active: logged_in && difficulty == Difficulty::Learned,
            progress,
        }
    }
}

impl fmt::Display for WordCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.word, self.transcription)?;
        writeln!(f, "  {}", self.translation)?;

        if self.controls_visible {
            let mark = |active: bool| if active { "x" } else { " " };
            writeln!(
                f,
                "  [{}] hard  [{}] learned",
                mark(self.hard_active),
                mark(self.learned_active)
            )?;
        }

        if let Some(progress) = self.progress {
            writeln!(
                f,
                "  guessed {}  failed {}  last {}",
                progress.guessed,
                progress.failed,
                if progress.last { "+" } else { "-" }
            )?;
        }

        writeln!(f, "  {}", self.meaning)?;
        writeln!(f, "  {}", self.meaning_translation)?;
        writeln!(f, "  {}", self.example)?;
        writeln!(f, "  {}", self.example_translation)?;
        write!(f, "  audio: {}", self.audio_url)
    }
}

/// Drop HTML tags, keep their text with entities decoded
fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];

        let entity = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));

        match entity {
            Some((c, end)) => {
                decoded.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
