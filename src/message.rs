use std::path::Path;

use rand::{Rng, seq::SliceRandom};
use serde::Deserialize;
use tracing::debug;

use crate::{automation::DEFAULT_MESSAGE, rotation};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageEntry {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: default_weight(),
        }
    }

    pub fn weighted(text: impl Into<String>, weight: u32) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

fn default_weight() -> u32 {
    1
}

pub fn default_messages() -> Vec<MessageEntry> {
    vec![MessageEntry::new(DEFAULT_MESSAGE)]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclingMode {
    #[default]
    RoundRobin,
    Random,
    Weighted,
}

/// Shapes accepted for the `message` field: a bare string, a list of strings,
/// or a list of `{ "text", "weight" }` objects (mixing is allowed).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageSpec {
    Single(String),
    Many(Vec<MessageItem>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageItem {
    Text(String),
    Entry(MessageEntry),
}

impl MessageSpec {
    pub fn into_entries(self) -> Vec<MessageEntry> {
        match self {
            Self::Single(text) => vec![MessageEntry::new(text)],
            Self::Many(items) => items
                .into_iter()
                .map(|item| match item {
                    MessageItem::Text(text) => MessageEntry::new(text),
                    MessageItem::Entry(entry) => entry,
                })
                .collect(),
        }
    }
}

/// Picks the message for this run.
///
/// Round robin keeps its position in `index_path` between runs; the file is
/// only touched when there is more than one message to cycle through.
pub fn select_message<R: Rng + ?Sized>(
    entries: &[MessageEntry],
    mode: CyclingMode,
    index_path: &Path,
    rng: &mut R,
) -> String {
    let picked = match entries {
        [] => None,
        [only] => Some(only),
        _ => match mode {
            CyclingMode::RoundRobin => {
                entries.get(rotation::next_index(entries.len(), index_path))
            }
            CyclingMode::Random => entries.choose(rng),
            CyclingMode::Weighted => {
                // Summed as u64 so that large u32 weights cannot overflow.
                match entries.choose_weighted(rng, |entry| u64::from(entry.weight)) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        debug!(error = %err, "weights unusable, picking uniformly");
                        entries.choose(rng)
                    }
                }
            }
        },
    };

    picked
        .map(|entry| entry.text.clone())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
}
