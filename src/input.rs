use std::time::Duration;

use enigo::{Button, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::info;

use crate::error::AutomationError;

const SETTLE_DELAY: Duration = Duration::from_millis(30);

/// The four primitives an automation run needs from the platform.
pub trait InputBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), AutomationError>;
    fn click(&mut self) -> Result<(), AutomationError>;
    fn type_text(&mut self, text: &str) -> Result<(), AutomationError>;
    fn press_key(&mut self, key: &str) -> Result<(), AutomationError>;
}

/// Drives the real pointer and keyboard.
pub struct EnigoBackend {
    enigo: Enigo,
}

impl EnigoBackend {
    /// Connects to the platform input service. Fails when there is no display
    /// server or the process lacks accessibility permission.
    pub fn new() -> Result<Self, AutomationError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|err| AutomationError::Unavailable(err.to_string()))?;
        Ok(Self { enigo })
    }
}

fn platform_error(operation: &'static str, err: impl std::fmt::Display) -> AutomationError {
    AutomationError::Platform {
        operation,
        message: err.to_string(),
    }
}

impl InputBackend for EnigoBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), AutomationError> {
        self.enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|err| platform_error("pointer move", err))?;
        std::thread::sleep(SETTLE_DELAY);
        Ok(())
    }

    fn click(&mut self) -> Result<(), AutomationError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|err| platform_error("click", err))
    }

    fn type_text(&mut self, text: &str) -> Result<(), AutomationError> {
        self.enigo
            .text(text)
            .map_err(|err| platform_error("typing", err))
    }

    fn press_key(&mut self, key: &str) -> Result<(), AutomationError> {
        let key = parse_key(key)?;
        self.enigo
            .key(key, Direction::Click)
            .map_err(|err| platform_error("key press", err))
    }
}

/// Logs what would happen instead of touching the input devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunBackend;

impl InputBackend for DryRunBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), AutomationError> {
        info!(x, y, "[dry run] would move pointer");
        Ok(())
    }

    fn click(&mut self) -> Result<(), AutomationError> {
        info!("[dry run] would click");
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<(), AutomationError> {
        info!(text, "[dry run] would type");
        Ok(())
    }

    fn press_key(&mut self, key: &str) -> Result<(), AutomationError> {
        parse_key(key)?;
        info!(key, "[dry run] would press key");
        Ok(())
    }
}

fn parse_key(name: &str) -> Result<Key, AutomationError> {
    let key = match name.to_ascii_lowercase().as_str() {
        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "escape" | "esc" => Key::Escape,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return Err(AutomationError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(key)
}
