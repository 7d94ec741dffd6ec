//! Application state definitions

use super::forms::{RegisterForm, SchemaError, ValidationMode};
use super::spinner_state::SpinnerState;
use crate::submit::Receipt;
use std::collections::VecDeque;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Form
    pub form: RegisterForm,
    pub mask_password: bool,

    // Submit feedback
    pub spinner: Option<SpinnerState>,
    pub last_receipt: Option<Receipt>,

    // UI state
    pub status_message: Option<String>,
    error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(mode: ValidationMode, mask_password: bool) -> Result<Self, SchemaError> {
        Ok(Self {
            form: RegisterForm::registration(mode)?,
            mask_password,
            spinner: None,
            last_receipt: None,
            status_message: None,
            error_queue: VecDeque::new(),
        })
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
