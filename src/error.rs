use thiserror::Error;

/// Reasons the coordinate could not be taken from the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config file has no `coordinates` field")]
    MissingCoordinates,

    #[error("`coordinates` field is malformed: {0}")]
    InvalidCoordinates(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("input simulation unavailable: {0}")]
    Unavailable(String),

    #[error("{operation} rejected by platform: {message}")]
    Platform {
        operation: &'static str,
        message: String,
    },

    #[error("unknown key name {0:?}")]
    UnknownKey(String),
}
