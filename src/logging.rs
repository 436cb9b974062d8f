use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";
pub const LOG_PATH: &str = "logs/click_and_continue.log";

/// Installs the stderr subscriber, plus an appending file layer at `log_path`
/// when given. `RUST_LOG` overrides the default filter. A log file that cannot
/// be opened is reported on stderr and skipped.
pub fn init_logging(log_path: Option<&Path>) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file, file_error) = match log_path.map(open_log_file) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(err)) => (None, Some(err)),
        None => (None, None),
    };
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(err) = file_error {
        warn!(path = ?log_path, error = %err, "file logging disabled");
    }

    Ok(())
}

pub(crate) fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn log_file_is_created_with_parent_dirs_and_appended() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("run.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn log_file_under_a_regular_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "").unwrap();

        assert!(open_log_file(&blocker.join("run.log")).is_err());
    }
}
