pub mod app;
pub mod automation;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod message;
pub mod rotation;
pub mod target;

pub use automation::{
    AutomationReport, DEFAULT_MESSAGE, Step, StepFailure, click_and_type, click_and_type_default,
};
pub use config::{Coordinate, CoordinateSource, get_coordinates, load_coordinates};
pub use error::{AutomationError, ConfigError};
pub use input::{DryRunBackend, EnigoBackend, InputBackend};
