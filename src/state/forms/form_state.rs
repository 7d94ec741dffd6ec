//! Form state container and submit lifecycle

use super::field::{FieldInput, FieldKind, FormField};
use super::schema::{Schema, SchemaError, ValidationErrors};
use super::values::{FieldName, FieldValue, FormValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// When validation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Validate on every change
    #[default]
    OnChange,
    /// Validate on the first submit attempt, then on every change
    OnSubmit,
}

/// Submit lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Outcome of a submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// Values are valid; the form is now submitting
    Accepted(FormValues),
    /// Validation failed with this many field errors
    Invalid(usize),
    /// A submit is already in flight
    Busy,
}

/// Open/highlight state of the dropdown list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownState {
    pub open: bool,
    pub highlighted: usize,
}

/// The registration form: values, adapters, errors and submit lifecycle
#[derive(Debug, Clone)]
pub struct RegisterForm {
    schema: Schema,
    fields: Vec<FormField>,
    defaults: FormValues,
    values: FormValues,
    errors: ValidationErrors,
    dirty: BTreeSet<FieldName>,
    mode: ValidationMode,
    phase: SubmitPhase,
    submit_count: u32,
    is_submit_successful: bool,
    /// Focus index; `fields.len()` is the submit button
    pub active_field_index: usize,
    pub radio_highlight: usize,
    pub dropdown: DropdownState,
}

impl RegisterForm {
    pub fn new(schema: Schema, fields: Vec<FormField>, mode: ValidationMode) -> Self {
        let defaults = FormValues::default();
        Self {
            schema,
            fields,
            values: defaults.clone(),
            defaults,
            errors: ValidationErrors::default(),
            dirty: BTreeSet::new(),
            mode,
            phase: SubmitPhase::Idle,
            submit_count: 0,
            is_submit_successful: false,
            active_field_index: 0,
            radio_highlight: 0,
            dropdown: DropdownState::default(),
        }
    }

    /// Registration form with its schema and adapters
    pub fn registration(mode: ValidationMode) -> Result<Self, SchemaError> {
        Ok(Self::new(
            Schema::registration()?,
            FormField::registration_fields(),
            mode,
        ))
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: FieldName) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Error to display for `name`.
    ///
    /// Before the first submit attempt only fields the user has changed show
    /// their error.
    pub fn visible_error(&self, name: FieldName) -> Option<&str> {
        if self.submit_count > 0 || self.dirty.contains(&name) {
            self.errors.get(name)
        } else {
            None
        }
    }

    /// Live value of a field
    pub fn watch(&self, name: FieldName) -> FieldValue {
        self.values.get(name)
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn is_submit_successful(&self) -> bool {
        self.is_submit_successful
    }

    pub fn is_valid(&self) -> bool {
        self.schema.validate(&self.values).is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.defaults
    }

    pub fn is_submit_button_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    /// Adapter under focus, `None` on the submit button
    pub fn active_adapter(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    fn should_revalidate(&self) -> bool {
        self.mode == ValidationMode::OnChange || self.submit_count > 0
    }

    /// Change handler: write `value` into `name` and revalidate.
    ///
    /// Ignored while submitting. Returns true when the value was applied.
    pub fn set_value(&mut self, name: FieldName, value: FieldValue) -> bool {
        if self.is_submitting() {
            return false;
        }
        if !self.values.set(name, value) {
            return false;
        }
        self.dirty.insert(name);
        self.is_submit_successful = false;
        if self.should_revalidate() {
            self.errors = self.schema.validate(&self.values);
        }
        tracing::trace!(field = %name, "value changed");
        true
    }

    /// Route raw input to the adapter bound to `name`
    pub fn input(&mut self, name: FieldName, input: FieldInput) -> bool {
        let Some(field) = self.field(name) else {
            return false;
        };
        let current = self.values.get(name);
        match field.apply(&current, input) {
            Some(next) => self.set_value(name, next),
            None => false,
        }
    }

    /// Route raw input to the focused adapter
    pub fn input_active(&mut self, input: FieldInput) -> bool {
        match self.active_adapter() {
            Some(field) => {
                let name = field.name;
                self.input(name, input)
            }
            None => false,
        }
    }

    /// Move the radio highlight by `delta` and select that option
    pub fn radio_step(&mut self, delta: isize) -> bool {
        if self.is_submitting() {
            return false;
        }
        let Some(field) = self.active_adapter() else {
            return false;
        };
        if !matches!(field.kind, FieldKind::Radio(_)) {
            return false;
        }
        let name = field.name;
        let count = field.options().len();
        if count == 0 {
            return false;
        }
        let current = field
            .option_index(self.values.get(name).as_choice().unwrap_or(""))
            .unwrap_or(self.radio_highlight);
        let next = wrap_index(current, delta, count);
        self.radio_highlight = next;
        self.input(name, FieldInput::Select(next))
    }

    /// Select the highlighted radio option
    pub fn radio_select_highlighted(&mut self) -> bool {
        let index = self.radio_highlight;
        match self.active_adapter() {
            Some(field) if matches!(field.kind, FieldKind::Radio(_)) => {
                let name = field.name;
                self.input(name, FieldInput::Select(index))
            }
            _ => false,
        }
    }

    fn active_dropdown(&self) -> Option<&FormField> {
        self.active_adapter()
            .filter(|f| matches!(f.kind, FieldKind::Dropdown(_)))
    }

    /// Open the focused dropdown, or close it if already open
    pub fn toggle_dropdown(&mut self) {
        if self.is_submitting() {
            return;
        }
        if self.dropdown.open {
            self.dropdown.open = false;
            return;
        }
        let Some(field) = self.active_dropdown() else {
            return;
        };
        let highlighted = self
            .values
            .get(field.name)
            .as_choice()
            .and_then(|v| field.option_index(v))
            .unwrap_or(0);
        self.dropdown = DropdownState {
            open: true,
            highlighted,
        };
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown.open = false;
    }

    /// Move the dropdown highlight, wrapping at either end
    pub fn dropdown_step(&mut self, delta: isize) {
        if !self.dropdown.open {
            return;
        }
        if let Some(field) = self.active_dropdown() {
            let count = field.options().len();
            if count > 0 {
                self.dropdown.highlighted = wrap_index(self.dropdown.highlighted, delta, count);
            }
        }
    }

    /// Select the highlighted dropdown option and close the list
    pub fn dropdown_confirm(&mut self) -> bool {
        if !self.dropdown.open {
            return false;
        }
        let Some(name) = self.active_dropdown().map(|f| f.name) else {
            return false;
        };
        self.dropdown.open = false;
        self.input(name, FieldInput::Select(self.dropdown.highlighted))
    }

    /// Validate everything and move to `Submitting` when valid
    pub fn request_submit(&mut self) -> SubmitRequest {
        if self.is_submitting() {
            return SubmitRequest::Busy;
        }
        self.submit_count += 1;
        self.dropdown.open = false;
        self.errors = self.schema.validate(&self.values);
        if !self.errors.is_empty() {
            // Focus the first field that failed
            if let Some(index) = self
                .fields
                .iter()
                .position(|f| self.errors.contains(f.name))
            {
                self.active_field_index = index;
            }
            return SubmitRequest::Invalid(self.errors.len());
        }
        self.phase = SubmitPhase::Submitting;
        SubmitRequest::Accepted(self.values.clone())
    }

    /// Finish a successful submit: back to defaults and `Idle`
    pub fn complete_submit(&mut self) {
        if !self.is_submitting() {
            return;
        }
        self.phase = SubmitPhase::Idle;
        self.reset();
        self.is_submit_successful = true;
    }

    /// Abandon an in-flight submit, keeping the entered values
    pub fn fail_submit(&mut self) {
        self.phase = SubmitPhase::Idle;
        self.is_submit_successful = false;
    }

    /// Restore default values and clear errors. Ignored while submitting.
    pub fn reset(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.values = self.defaults.clone();
        self.errors.clear();
        self.dirty.clear();
        self.submit_count = 0;
        self.is_submit_successful = false;
        self.active_field_index = 0;
        self.radio_highlight = 0;
        self.dropdown = DropdownState::default();
    }
}

fn wrap_index(current: usize, delta: isize, count: usize) -> usize {
    let count = count as isize;
    ((current as isize + delta).rem_euclid(count)) as usize
}

impl Form for RegisterForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // adapters + submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.dropdown.open = false;
        self.active_field_index = index.min(self.fields.len());
        if let Some(field) = self.active_adapter() {
            if let FieldKind::Radio(_) = field.kind {
                let name = field.name;
                if let Some(i) = self
                    .values
                    .get(name)
                    .as_choice()
                    .and_then(|v| field.option_index(v))
                {
                    self.radio_highlight = i;
                }
            }
        }
    }
}
