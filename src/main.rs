use std::path::Path;

use anyhow::Result;
use click_and_continue::{
    app, config,
    input::{EnigoBackend, InputBackend},
    logging,
};

fn main() -> Result<()> {
    logging::init_logging(Some(Path::new(logging::LOG_PATH)))?;

    let config = config::load_or_default();
    let connect = || EnigoBackend::new().map(|backend| Box::new(backend) as Box<dyn InputBackend>);

    // Failures are already logged; the run always ends normally.
    let _ = app::run_once(&config, connect, &mut rand::thread_rng());

    Ok(())
}
