use std::path::Path;

use rand::{Rng, seq::SliceRandom};
use serde::Deserialize;

use crate::{config::Coordinate, rotation};

/// A place to click. `title` only labels the target in logs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowTarget {
    #[serde(default = "default_title")]
    pub title: String,
    pub coordinates: Coordinate,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl WindowTarget {
    pub fn new(title: impl Into<String>, coordinates: Coordinate) -> Self {
        Self {
            title: title.into(),
            coordinates,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

fn default_title() -> String {
    "Default Window".to_string()
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowCycling {
    #[default]
    RoundRobin,
    Random,
}

/// Picks this run's target among the enabled ones, or `None` when every
/// target is disabled. Round robin counts over enabled targets only and
/// leaves `index_path` untouched when there is a single candidate.
pub fn select_target<'a, R: Rng + ?Sized>(
    targets: &'a [WindowTarget],
    mode: WindowCycling,
    index_path: &Path,
    rng: &mut R,
) -> Option<&'a WindowTarget> {
    let enabled: Vec<&WindowTarget> = targets.iter().filter(|target| target.enabled).collect();

    match enabled.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => match mode {
            WindowCycling::RoundRobin => {
                enabled.get(rotation::next_index(enabled.len(), index_path)).copied()
            }
            WindowCycling::Random => enabled.choose(rng).copied(),
        },
    }
}
