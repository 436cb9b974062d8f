use std::fmt;

use tracing::{error, info};

use crate::{error::AutomationError, input::InputBackend};

pub const DEFAULT_MESSAGE: &str = "yes, continue";
pub const SUBMIT_KEY: &str = "enter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Move,
    Click,
    Type,
    Enter,
}

impl Step {
    /// Execution order of a full cycle.
    pub const ALL: [Step; 4] = [Step::Move, Step::Click, Step::Type, Step::Enter];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Move => "move",
            Step::Click => "click",
            Step::Type => "type",
            Step::Enter => "enter",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: AutomationError,
}

/// Outcome of one click-and-type cycle. Steps that ran before a failure are
/// listed in `completed`; nothing is rolled back.
#[derive(Debug, Default)]
pub struct AutomationReport {
    pub completed: Vec<Step>,
    pub failure: Option<StepFailure>,
}

impl AutomationReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.completed.len() == Step::ALL.len()
    }
}

/// Moves to `(x, y)`, clicks, types `message` and presses enter.
///
/// Stops at the first failing step, logs it and records it in the report.
/// Backend failures are never propagated to the caller.
pub fn click_and_type<B>(backend: &mut B, x: i32, y: i32, message: &str) -> AutomationReport
where
    B: InputBackend + ?Sized,
{
    let mut report = AutomationReport::default();

    for step in Step::ALL {
        let outcome = match step {
            Step::Move => backend.move_to(x, y),
            Step::Click => backend.click(),
            Step::Type => backend.type_text(message),
            Step::Enter => backend.press_key(SUBMIT_KEY),
        };

        if let Err(err) = outcome {
            error!(%step, x, y, error = %err, "automation error");
            report.failure = Some(StepFailure { step, error: err });
            return report;
        }
        report.completed.push(step);
    }

    info!(x, y, chars = message.chars().count(), "message sent");
    report
}

pub fn click_and_type_default<B>(backend: &mut B, x: i32, y: i32) -> AutomationReport
where
    B: InputBackend + ?Sized,
{
    click_and_type(backend, x, y, DEFAULT_MESSAGE)
}
