use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::ConfigError,
    message::{CyclingMode, MessageEntry, MessageSpec, default_messages},
    target::{WindowCycling, WindowTarget},
};

/// Location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "config.json";
pub const DEFAULT_INDEX_PATH: &str = "message_index.txt";
pub const DEFAULT_WINDOW_INDEX_PATH: &str = "window_index.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const DEFAULT: Coordinate = Coordinate { x: 100, y: 200 };
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the coordinate came from. A fallback keeps the reason it was needed.
#[derive(Debug)]
pub enum CoordinateSource {
    Configured(Coordinate),
    Fallback {
        coordinate: Coordinate,
        reason: ConfigError,
    },
}

impl CoordinateSource {
    fn fallback(reason: ConfigError) -> Self {
        match &reason {
            ConfigError::Read(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no config file found, using default coordinates");
            }
            _ => warn!(error = %reason, "using default coordinates"),
        }
        Self::Fallback {
            coordinate: Coordinate::DEFAULT,
            reason,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            Self::Configured(coordinate) => *coordinate,
            Self::Fallback { coordinate, .. } => *coordinate,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&ConfigError> {
        match self {
            Self::Configured(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Everything a single run needs from the config file.
#[derive(Debug)]
pub struct AutomationConfig {
    pub coordinates: CoordinateSource,
    pub messages: Vec<MessageEntry>,
    pub cycling: CyclingMode,
    pub dry_run: bool,
    pub index_path: PathBuf,
    /// Never empty: a config without `windows` gets a single target built
    /// from `coordinates`.
    pub windows: Vec<WindowTarget>,
    pub window_cycling: WindowCycling,
    pub window_index_path: PathBuf,
}

impl AutomationConfig {
    fn with_coordinates(coordinates: CoordinateSource) -> Self {
        let legacy_target = WindowTarget::new("Default Window", coordinates.coordinate());
        Self {
            coordinates,
            messages: default_messages(),
            cycling: CyclingMode::default(),
            dry_run: false,
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            windows: vec![legacy_target],
            window_cycling: WindowCycling::default(),
            window_index_path: PathBuf::from(DEFAULT_WINDOW_INDEX_PATH),
        }
    }
}

/// Reads the coordinate from [`CONFIG_PATH`]. Never fails: any problem yields
/// [`Coordinate::DEFAULT`].
pub fn get_coordinates() -> Coordinate {
    load_coordinates(Path::new(CONFIG_PATH)).coordinate()
}

pub fn load_coordinates(path: &Path) -> CoordinateSource {
    match read_document(path) {
        Ok(document) => coordinates_from(&document),
        Err(reason) => CoordinateSource::fallback(reason),
    }
}

pub fn load_or_default() -> AutomationConfig {
    load_config(Path::new(CONFIG_PATH))
}

/// Reads the whole config. Each optional field falls back on its own, so a
/// bad `message` never costs a good `coordinates`.
pub fn load_config(path: &Path) -> AutomationConfig {
    let document = match read_document(path) {
        Ok(document) => document,
        Err(reason) => {
            return AutomationConfig::with_coordinates(CoordinateSource::fallback(reason));
        }
    };

    let mut config = AutomationConfig::with_coordinates(coordinates_from(&document));

    if let Some(spec) = optional_field::<MessageSpec>(&document, "message") {
        let entries = spec.into_entries();
        if entries.is_empty() {
            warn!("`message` is empty, using default message");
        } else {
            config.messages = entries;
        }
    }
    if let Some(cycling) = optional_field(&document, "cycling") {
        config.cycling = cycling;
    }
    if let Some(dry_run) = optional_field(&document, "dry_run") {
        config.dry_run = dry_run;
    }
    if let Some(index_path) = optional_field(&document, "index_path") {
        config.index_path = index_path;
    }
    if let Some(windows) = optional_field::<Vec<WindowTarget>>(&document, "windows") {
        if windows.is_empty() {
            warn!("`windows` is empty, targeting `coordinates`");
        } else {
            config.windows = windows;
        }
    }
    if let Some(window_cycling) = optional_field(&document, "window_cycling") {
        config.window_cycling = window_cycling;
    }
    if let Some(window_index_path) = optional_field(&document, "window_index_path") {
        config.window_index_path = window_index_path;
    }

    config
}

fn read_document(path: &Path) -> Result<Value, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn coordinates_from(document: &Value) -> CoordinateSource {
    match document.get("coordinates") {
        None | Some(Value::Null) => CoordinateSource::fallback(ConfigError::MissingCoordinates),
        Some(value) => match Coordinate::deserialize(value) {
            Ok(coordinate) => CoordinateSource::Configured(coordinate),
            Err(err) => CoordinateSource::fallback(ConfigError::InvalidCoordinates(err)),
        },
    }
}

fn optional_field<T: DeserializeOwned>(document: &Value, key: &str) -> Option<T> {
    let value = document.get(key).filter(|value| !value.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(field = key, error = %err, "ignoring malformed config field");
            None
        }
    }
}
