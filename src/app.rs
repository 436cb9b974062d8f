use rand::Rng;
use tracing::{error, info, warn};

use crate::{
    automation::{self, AutomationReport},
    config::{AutomationConfig, Coordinate},
    error::AutomationError,
    input::{DryRunBackend, InputBackend},
    message, target,
};

/// Where this run clicks: the selected window target, or the configured
/// coordinate when every target is disabled.
pub fn resolve_coordinate<R: Rng + ?Sized>(config: &AutomationConfig, rng: &mut R) -> Coordinate {
    match target::select_target(
        &config.windows,
        config.window_cycling,
        &config.window_index_path,
        rng,
    ) {
        Some(selected) => {
            info!(title = %selected.title, "window target selected");
            selected.coordinates
        }
        None => {
            warn!("no enabled window targets, using configured coordinates");
            config.coordinates.coordinate()
        }
    }
}

/// Performs one click-and-type cycle.
///
/// `connect` is only called when the config does not ask for a dry run. A
/// backend that cannot be created is logged and returned as the error before
/// any rotation index advances; the cycle itself never fails past that point.
pub fn run_once<F, R>(
    config: &AutomationConfig,
    connect: F,
    rng: &mut R,
) -> Result<AutomationReport, AutomationError>
where
    F: FnOnce() -> Result<Box<dyn InputBackend>, AutomationError>,
    R: Rng + ?Sized,
{
    let mut backend: Box<dyn InputBackend> = if config.dry_run {
        Box::new(DryRunBackend)
    } else {
        connect().inspect_err(|err| error!(error = %err, "automation error"))?
    };

    let coordinate = resolve_coordinate(config, rng);
    let message =
        message::select_message(&config.messages, config.cycling, &config.index_path, rng);

    info!(
        x = coordinate.x,
        y = coordinate.y,
        default_coordinates = config.coordinates.is_fallback(),
        dry_run = config.dry_run,
        "starting click-and-type"
    );
    let report =
        automation::click_and_type(backend.as_mut(), coordinate.x, coordinate.y, &message);
    if !report.is_success() {
        warn!(
            completed = report.completed.len(),
            "click-and-type finished early"
        );
    }

    Ok(report)
}
