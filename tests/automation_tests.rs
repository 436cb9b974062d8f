use std::fs;

use click_and_continue::{
    AutomationError, Coordinate, DEFAULT_MESSAGE, DryRunBackend, InputBackend, Step,
    automation::{self, SUBMIT_KEY},
    config,
};
use rstest::rstest;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Move(i32, i32),
    Click,
    Type(String),
    Key(String),
}

/// Records every primitive and optionally rejects one of them.
#[derive(Default)]
struct RecordingBackend {
    calls: Vec<Call>,
    fail_on: Option<Step>,
}

impl RecordingBackend {
    fn failing_on(step: Step) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(step),
        }
    }

    fn record(&mut self, step: Step, call: Call) -> Result<(), AutomationError> {
        self.calls.push(call);
        if self.fail_on == Some(step) {
            return Err(AutomationError::Platform {
                operation: "test",
                message: format!("{step} refused"),
            });
        }
        Ok(())
    }
}

impl InputBackend for RecordingBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), AutomationError> {
        self.record(Step::Move, Call::Move(x, y))
    }

    fn click(&mut self) -> Result<(), AutomationError> {
        self.record(Step::Click, Call::Click)
    }

    fn type_text(&mut self, text: &str) -> Result<(), AutomationError> {
        self.record(Step::Type, Call::Type(text.to_string()))
    }

    fn press_key(&mut self, key: &str) -> Result<(), AutomationError> {
        self.record(Step::Enter, Call::Key(key.to_string()))
    }
}

/// Backend whose platform is missing entirely.
struct UnavailableBackend;

impl InputBackend for UnavailableBackend {
    fn move_to(&mut self, _x: i32, _y: i32) -> Result<(), AutomationError> {
        Err(AutomationError::Unavailable("no display".to_string()))
    }

    fn click(&mut self) -> Result<(), AutomationError> {
        Err(AutomationError::Unavailable("no display".to_string()))
    }

    fn type_text(&mut self, _text: &str) -> Result<(), AutomationError> {
        Err(AutomationError::Unavailable("no display".to_string()))
    }

    fn press_key(&mut self, _key: &str) -> Result<(), AutomationError> {
        Err(AutomationError::Unavailable("no display".to_string()))
    }
}

fn full_sequence(x: i32, y: i32, message: &str) -> Vec<Call> {
    vec![
        Call::Move(x, y),
        Call::Click,
        Call::Type(message.to_string()),
        Call::Key(SUBMIT_KEY.to_string()),
    ]
}

#[test]
fn runs_four_steps_in_order() {
    let mut backend = RecordingBackend::default();
    let report = automation::click_and_type(&mut backend, 42, 7, "carry on");

    assert!(report.is_success());
    assert_eq!(report.completed, Step::ALL.to_vec());
    assert_eq!(backend.calls, full_sequence(42, 7, "carry on"));
}

#[test]
fn default_message_is_yes_continue() {
    let mut backend = RecordingBackend::default();
    let report = automation::click_and_type_default(&mut backend, 10, 20);

    assert!(report.is_success());
    assert_eq!(DEFAULT_MESSAGE, "yes, continue");
    assert_eq!(backend.calls[2], Call::Type("yes, continue".to_string()));
}

#[test]
fn repeated_calls_produce_independent_sequences() {
    let mut backend = RecordingBackend::default();
    let first = automation::click_and_type(&mut backend, 5, 6, "again");
    let second = automation::click_and_type(&mut backend, 5, 6, "again");

    assert!(first.is_success());
    assert!(second.is_success());
    let mut expected = full_sequence(5, 6, "again");
    expected.extend(full_sequence(5, 6, "again"));
    assert_eq!(backend.calls, expected);
}

#[rstest]
#[case::move_fails(Step::Move, 1)]
#[case::click_fails(Step::Click, 2)]
#[case::type_fails(Step::Type, 3)]
#[case::enter_fails(Step::Enter, 4)]
fn failure_stops_sequence_without_propagating(#[case] failing: Step, #[case] attempted: usize) {
    let mut backend = RecordingBackend::failing_on(failing);
    let report = automation::click_and_type(&mut backend, 1, 2, DEFAULT_MESSAGE);

    assert!(!report.is_success());
    assert_eq!(backend.calls.len(), attempted);
    assert_eq!(report.completed, Step::ALL[..attempted - 1].to_vec());

    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, failing);
    assert!(matches!(failure.error, AutomationError::Platform { .. }));
}

#[test]
fn unavailable_platform_is_reported_not_raised() {
    let report = automation::click_and_type(&mut UnavailableBackend, 100, 200, DEFAULT_MESSAGE);

    assert!(report.completed.is_empty());
    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, Step::Move);
    assert!(matches!(failure.error, AutomationError::Unavailable(_)));
}

#[test]
fn works_through_trait_object() {
    let mut backend: Box<dyn InputBackend> = Box::new(DryRunBackend);
    let report = automation::click_and_type(backend.as_mut(), 3, 4, "dry");

    assert!(report.is_success());
}

#[test]
fn unreadable_config_drives_default_cycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let coordinate = config::load_coordinates(&path).coordinate();
    assert_eq!(coordinate, Coordinate { x: 100, y: 200 });

    let mut backend = RecordingBackend::default();
    let report = automation::click_and_type_default(&mut backend, coordinate.x, coordinate.y);

    assert!(report.is_success());
    assert_eq!(backend.calls, full_sequence(100, 200, "yes, continue"));
}

/// Dry-run backend that submits with a configurable key instead of enter.
struct RemappedSubmit {
    inner: DryRunBackend,
    submit_key: &'static str,
}

impl InputBackend for RemappedSubmit {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), AutomationError> {
        self.inner.move_to(x, y)
    }

    fn click(&mut self) -> Result<(), AutomationError> {
        self.inner.click()
    }

    fn type_text(&mut self, text: &str) -> Result<(), AutomationError> {
        self.inner.type_text(text)
    }

    fn press_key(&mut self, _key: &str) -> Result<(), AutomationError> {
        self.inner.press_key(self.submit_key)
    }
}

#[test]
fn dry_run_rejects_unknown_key_names() {
    assert!(matches!(
        DryRunBackend.press_key("hyper"),
        Err(AutomationError::UnknownKey(name)) if name == "hyper"
    ));
    assert!(DryRunBackend.press_key("enter").is_ok());
}

#[test]
fn unknown_key_ends_cycle_at_enter() {
    let mut backend = RemappedSubmit {
        inner: DryRunBackend,
        submit_key: "hyper",
    };
    let report = automation::click_and_type(&mut backend, 1, 2, DEFAULT_MESSAGE);

    assert!(!report.is_success());
    assert_eq!(report.completed, vec![Step::Move, Step::Click, Step::Type]);
    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, Step::Enter);
    assert!(matches!(failure.error, AutomationError::UnknownKey(name) if name == "hyper"));
}
