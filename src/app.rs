//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{
    AppState, FieldInput, FieldKind, Form, SpinnerState, SubmitPhase, SubmitRequest,
};
use crate::submit::{Receipt, RegistrationBackend, SimulatedBackend, SubmitError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type SubmitResult = Result<Receipt, SubmitError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Receiver of submitted registrations
    backend: Arc<dyn RegistrationBackend>,
    /// Completed submits are reported here by the spawned task
    submit_tx: mpsc::UnboundedSender<SubmitResult>,
    submit_rx: mpsc::UnboundedReceiver<SubmitResult>,
    /// Task of the submit in flight
    submit_task: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App using the simulated backend
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let backend = SimulatedBackend::new(config.submit_delay());
        tracing::debug!(
            delay_ms = backend.delay().as_millis() as u64,
            "using simulated registration backend"
        );
        Self::with_backend(config, Arc::new(backend))
    }

    /// Create a new App submitting to `backend`
    pub fn with_backend(config: &TuiConfig, backend: Arc<dyn RegistrationBackend>) -> Result<Self> {
        let state = AppState::new(config.validation_mode(), config.mask_password())?;
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        Ok(Self {
            state,
            backend,
            submit_tx,
            submit_rx,
            submit_task: None,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Check if a submit is in flight
    pub fn is_submitting(&self) -> bool {
        self.state.form.phase() == SubmitPhase::Submitting
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Shortcuts (work from anywhere)
        match key.code {
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return Ok(());
            }
            KeyCode::Char('r') if ctrl => {
                self.reset_form();
                return Ok(());
            }
            _ => {}
        }

        // Clear any status messages on key press
        if !self.is_submitting() {
            self.state.status_message = None;
        }

        if self.state.form.dropdown.open {
            self.handle_dropdown_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.form.next_field();
                return Ok(());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.form.prev_field();
                return Ok(());
            }
            KeyCode::Esc => {
                self.quit = true;
                return Ok(());
            }
            _ => {}
        }

        let kind = self
            .state
            .form
            .active_adapter()
            .map(|field| field.kind.clone());

        match kind {
            // Submit button row
            None => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit();
                }
            }
            Some(FieldKind::Text | FieldKind::Email | FieldKind::Password) => match key.code {
                KeyCode::Char(c) if !ctrl => {
                    self.state.form.input_active(FieldInput::Char(c));
                }
                KeyCode::Backspace => {
                    self.state.form.input_active(FieldInput::Backspace);
                }
                KeyCode::Enter => self.state.form.next_field(),
                _ => {}
            },
            Some(FieldKind::Radio(_)) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.state.form.radio_step(-1);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.state.form.radio_step(1);
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.state.form.radio_select_highlighted();
                }
                _ => {}
            },
            Some(FieldKind::Dropdown(_)) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.state.form.toggle_dropdown();
                }
            }
            Some(FieldKind::Checkbox) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.state.form.input_active(FieldInput::Toggle);
                }
            }
        }

        Ok(())
    }

    /// Handle keys while the dropdown list is open
    fn handle_dropdown_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.form.dropdown_step(-1),
            KeyCode::Down | KeyCode::Char('j') => self.state.form.dropdown_step(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.state.form.dropdown_confirm();
            }
            KeyCode::Esc => self.state.form.close_dropdown(),
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            _ => {}
        }
    }

    /// Validate and, when valid, hand the values to the backend
    pub fn submit(&mut self) {
        match self.state.form.request_submit() {
            SubmitRequest::Accepted(values) => {
                tracing::debug!(
                    attempt = self.state.form.submit_count(),
                    "submit accepted, sending registration"
                );
                self.state.spinner = Some(SpinnerState::new());
                self.state.status_message = Some("Submitting...".to_string());

                let backend = Arc::clone(&self.backend);
                let tx = self.submit_tx.clone();
                self.submit_task = Some(tokio::spawn(async move {
                    let result = backend.register(values).await;
                    // Receiver only goes away when the app is shutting down
                    let _ = tx.send(result);
                }));
            }
            SubmitRequest::Invalid(count) => {
                let fields: Vec<_> = self
                    .state
                    .form
                    .errors()
                    .fields()
                    .map(|f| f.as_str())
                    .collect();
                tracing::debug!(
                    errors = count,
                    ?fields,
                    attempt = self.state.form.submit_count(),
                    "submit blocked by validation"
                );
                let noun = if count == 1 { "field" } else { "fields" };
                self.state.status_message = Some(format!("Please fix {count} {noun}"));
            }
            SubmitRequest::Busy => {
                tracing::debug!("submit ignored, already submitting");
            }
        }
    }

    /// Apply results of finished submits without blocking
    pub fn poll_submissions(&mut self) -> Result<()> {
        // Checked before draining so a result sent just before finishing is not missed
        let task_finished = self
            .submit_task
            .as_ref()
            .is_some_and(JoinHandle::is_finished);

        let mut received = false;
        while let Ok(result) = self.submit_rx.try_recv() {
            received = true;
            self.finish_submit(result)?;
        }

        if task_finished && !received && self.is_submitting() {
            self.finish_submit(Err(SubmitError::TaskAborted))?;
        }
        Ok(())
    }

    fn finish_submit(&mut self, result: SubmitResult) -> Result<()> {
        self.submit_task = None;
        self.state.spinner = None;
        match result {
            Ok(receipt) => {
                let payload = serde_json::to_string(&self.state.form.values().redacted())?;
                tracing::debug!(
                    receipt = %receipt.id,
                    submitted_at = %receipt.submitted_at,
                    %payload,
                    "registration submitted"
                );
                self.state.form.complete_submit();
                self.state.status_message = Some("Registration complete!".to_string());
                self.state.last_receipt = Some(receipt);
            }
            Err(err) => {
                tracing::warn!(error = %err, "registration failed");
                self.state.form.fail_submit();
                self.state.status_message = None;
                self.push_error(err.to_string());
            }
        }
        Ok(())
    }

    /// Reset the form to defaults
    pub fn reset_form(&mut self) {
        if self.is_submitting() {
            return;
        }
        if !self.state.form.is_dirty() {
            self.state.status_message = Some("Nothing to reset".to_string());
            return;
        }
        self.state.form.reset();
        self.state.status_message = Some("Form reset".to_string());
        tracing::debug!("form reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldName, FieldValue, FormValues, Gender, Job, ValidationMode};
    use crate::submit::MockRegistrationBackend;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(backend: impl RegistrationBackend + 'static) -> App {
        App::with_backend(&TuiConfig::default(), Arc::new(backend)).unwrap()
    }

    fn simulated_app(delay_ms: u64) -> App {
        app_with(SimulatedBackend::new(Duration::from_millis(delay_ms)))
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).await.unwrap();
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    /// Fill every field through the keyboard, ending on the submit button
    async fn fill_valid(app: &mut App) {
        type_str(app, "evondev").await;
        press(app, KeyCode::Tab).await;
        type_str(app, "evon@example.com").await;
        press(app, KeyCode::Tab).await;
        type_str(app, "Passw0rd!").await;
        press(app, KeyCode::Tab).await;
        press(app, KeyCode::Right).await; // female
        press(app, KeyCode::Tab).await;
        press(app, KeyCode::Enter).await; // open dropdown
        press(app, KeyCode::Down).await;
        press(app, KeyCode::Enter).await; // developer
        press(app, KeyCode::Tab).await;
        press(app, KeyCode::Char(' ')).await; // terms
        press(app, KeyCode::Tab).await;
    }

    /// Wait for the spawned submit task and apply its result
    async fn settle(app: &mut App) {
        let result = app.submit_rx.recv().await.unwrap();
        app.finish_submit(result).unwrap();
    }

    mod input {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_keyboard_fills_every_field() {
            let mut app = simulated_app(0);
            fill_valid(&mut app).await;
            let expected = FormValues {
                username: "evondev".to_string(),
                email: "evon@example.com".to_string(),
                password: "Passw0rd!".to_string(),
                gender: Some(Gender::Female),
                job: Some(Job::Developer),
                terms: true,
            };
            assert_eq!(app.state.form.values(), &expected);
            assert!(app.state.form.is_submit_button_active());
        }

        #[tokio::test]
        async fn test_radio_selection_is_watched() {
            let mut app = simulated_app(0);
            app.state.form.set_active_field(3);
            press(&mut app, KeyCode::Char(' ')).await;
            assert_eq!(app.state.form.values().gender, Some(Gender::Male));
            press(&mut app, KeyCode::Left).await;
            assert_eq!(
                app.state.form.watch(FieldName::Gender).as_choice(),
                Some("female")
            );
        }

        #[tokio::test]
        async fn test_dropdown_escape_closes_without_selecting() {
            let mut app = simulated_app(0);
            app.state.form.set_active_field(4);
            press(&mut app, KeyCode::Enter).await;
            assert!(app.state.form.dropdown.open);
            press(&mut app, KeyCode::Down).await;
            press(&mut app, KeyCode::Esc).await;
            assert!(!app.state.form.dropdown.open);
            assert!(app.state.form.values().job.is_none());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_backspace_edits_text() {
            let mut app = simulated_app(0);
            type_str(&mut app, "abc").await;
            press(&mut app, KeyCode::Backspace).await;
            assert_eq!(app.state.form.values().username, "ab");
        }

        #[tokio::test]
        async fn test_ctrl_chars_are_not_typed() {
            let mut app = simulated_app(0);
            app.handle_key(ctrl('x')).await.unwrap();
            assert_eq!(app.state.form.values().username, "");
        }

        #[tokio::test]
        async fn test_esc_quits() {
            let mut app = simulated_app(0);
            assert!(!app.should_quit());
            press(&mut app, KeyCode::Esc).await;
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_ctrl_r_resets() {
            let mut app = simulated_app(0);
            type_str(&mut app, "someone").await;
            app.handle_key(ctrl('r')).await.unwrap();
            assert_eq!(app.state.form.values(), &FormValues::default());
            assert_eq!(app.state.status_message.as_deref(), Some("Form reset"));
        }

        #[tokio::test]
        async fn test_reset_on_pristine_form() {
            let mut app = simulated_app(0);
            app.handle_key(ctrl('r')).await.unwrap();
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Nothing to reset")
            );
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_empty_submit_is_blocked() {
            let mut backend = MockRegistrationBackend::new();
            backend.expect_register().never();
            let mut app = app_with(backend);

            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.form.phase(), SubmitPhase::Idle);
            assert!(app.state.spinner.is_none());
            assert_eq!(app.state.status_message.as_deref(), Some("Please fix 6 fields"));
            assert_eq!(
                app.state.form.visible_error(FieldName::Username),
                Some("Please enter your username")
            );
            assert_eq!(
                app.state.form.visible_error(FieldName::Terms),
                Some("Please accept the terms and conditions")
            );
        }

        #[tokio::test]
        async fn test_submit_sends_values_to_backend() {
            let mut backend = MockRegistrationBackend::new();
            backend
                .expect_register()
                .withf(|values| values.username == "evondev" && values.terms)
                .times(1)
                .returning(|_| Ok(Receipt::new()));
            let mut app = app_with(backend);

            fill_valid(&mut app).await;
            press(&mut app, KeyCode::Enter).await;
            assert!(app.is_submitting());
            assert!(app.state.spinner.is_some());

            settle(&mut app).await;
            assert!(!app.is_submitting());
            assert!(app.state.last_receipt.is_some());
        }

        #[tokio::test(start_paused = true)]
        async fn test_fields_reset_after_delay() {
            let mut app = simulated_app(2000);
            fill_valid(&mut app).await;
            press(&mut app, KeyCode::Enter).await;

            // Still submitting before the delay has elapsed
            tokio::time::sleep(Duration::from_millis(1999)).await;
            app.poll_submissions().unwrap();
            assert!(app.is_submitting());
            assert_eq!(app.state.form.values().username, "evondev");

            tokio::time::sleep(Duration::from_millis(1)).await;
            tokio::task::yield_now().await;
            settle(&mut app).await;

            assert_eq!(app.state.form.phase(), SubmitPhase::Idle);
            assert_eq!(app.state.form.values(), &FormValues::default());
            assert!(app.state.form.is_submit_successful());
            assert!(app.state.spinner.is_none());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Registration complete!")
            );
        }

        #[tokio::test]
        async fn test_trigger_disabled_while_submitting() {
            let mut backend = MockRegistrationBackend::new();
            backend
                .expect_register()
                .times(1)
                .returning(|_| Ok(Receipt::new()));
            let mut app = app_with(backend);
            fill_valid(&mut app).await;

            press(&mut app, KeyCode::Enter).await;
            press(&mut app, KeyCode::Enter).await;
            app.handle_key(ctrl('s')).await.unwrap();
            app.handle_key(ctrl('r')).await.unwrap();
            assert_eq!(app.state.form.values().username, "evondev");

            settle(&mut app).await;
            assert!(!app.is_submitting());

            // Trigger enabled again: an empty form is validated, not ignored
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.form.submit_count(), 1);
            assert_eq!(app.state.form.errors().len(), 6);
        }

        #[tokio::test]
        async fn test_backend_failure_keeps_values_and_shows_error() {
            let mut backend = MockRegistrationBackend::new();
            backend
                .expect_register()
                .returning(|_| Err(SubmitError::Rejected("username taken".to_string())));
            let mut app = app_with(backend);
            fill_valid(&mut app).await;
            press(&mut app, KeyCode::Enter).await;
            settle(&mut app).await;

            assert_eq!(app.state.form.phase(), SubmitPhase::Idle);
            assert_eq!(app.state.form.values().username, "evondev");
            assert_eq!(
                app.state.current_error(),
                Some("registration rejected: username taken")
            );

            // Dialog is modal until dismissed
            press(&mut app, KeyCode::Char('x')).await;
            assert!(app.state.has_errors());
            press(&mut app, KeyCode::Esc).await;
            assert!(!app.state.has_errors());
            assert!(!app.should_quit());
        }

        struct PanickingBackend;

        #[async_trait::async_trait]
        impl RegistrationBackend for PanickingBackend {
            async fn register(&self, _values: FormValues) -> Result<Receipt, SubmitError> {
                panic!("backend crashed")
            }
        }

        #[tokio::test]
        async fn test_panicking_backend_reports_aborted_task() {
            let mut app = app_with(PanickingBackend);
            fill_valid(&mut app).await;
            press(&mut app, KeyCode::Enter).await;

            while !app.submit_task.as_ref().unwrap().is_finished() {
                tokio::task::yield_now().await;
            }
            app.poll_submissions().unwrap();

            assert!(!app.is_submitting());
            assert_eq!(app.state.form.values().username, "evondev");
            assert_eq!(
                app.state.current_error(),
                Some("registration task ended before reporting a result")
            );
        }

        /// Shared buffer handed to the fmt layer as its writer
        #[derive(Clone, Default)]
        struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

        impl std::io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        #[tokio::test]
        async fn test_lifecycle_events_stay_below_info() {
            // Anything logged at info would be written over the alternate screen
            let captured = Captured::default();
            let writer = captured.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .with_writer(move || writer.clone())
                .finish();

            let mut app = simulated_app(60_000);
            tracing::subscriber::with_default(subscriber, || {
                app.submit();
                app.state
                    .form
                    .set_value(FieldName::Username, FieldValue::Text("evondev".into()));
                app.reset_form();
                for (name, value) in [
                    (FieldName::Username, FieldValue::Text("evondev".into())),
                    (FieldName::Email, FieldValue::Text("evon@example.com".into())),
                    (FieldName::Password, FieldValue::Text("Passw0rd!".into())),
                    (FieldName::Gender, FieldValue::Choice(Some("male"))),
                    (FieldName::Job, FieldValue::Choice(Some("doctor"))),
                    (FieldName::Terms, FieldValue::Flag(true)),
                ] {
                    assert!(app.state.form.set_value(name, value));
                }
                app.submit();
                assert!(app.is_submitting());
                app.finish_submit(Ok(Receipt::new())).unwrap();
            });

            assert_eq!(app.state.status_message.as_deref(), Some("Registration complete!"));
            let output = captured.0.lock().unwrap();
            assert!(
                output.is_empty(),
                "unexpected log output: {}",
                String::from_utf8_lossy(&output)
            );
        }

        #[tokio::test]
        async fn test_on_submit_mode_hides_errors_until_submit() {
            let config = TuiConfig {
                validation_mode: Some(ValidationMode::OnSubmit),
                ..Default::default()
            };
            let mut app =
                App::with_backend(&config, Arc::new(SimulatedBackend::new(Duration::ZERO)))
                    .unwrap();
            press(&mut app, KeyCode::Tab).await;
            type_str(&mut app, "bad").await;
            assert!(app.state.form.visible_error(FieldName::Email).is_none());
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(
                app.state.form.visible_error(FieldName::Email),
                Some("Please enter valid email address")
            );
        }
    }
}
