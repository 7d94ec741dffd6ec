//! Field adapters
//!
//! A [`FormField`] describes how one slot of [`FormValues`](super::FormValues)
//! is edited and displayed. It holds no value of its own: the current value is
//! always read from the form state, and input is turned into a new value that
//! the form state applies through its change handler.

use super::values::{FieldName, FieldValue, Gender, Job};

/// Selectable option of a radio group or dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub text: &'static str,
}

/// Kind of widget bound to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Radio(Vec<ChoiceOption>),
    Dropdown(Vec<ChoiceOption>),
    Checkbox,
}

/// Raw edit routed to an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Char(char),
    Backspace,
    /// Pick the option at this index
    Select(usize),
    Toggle,
}

/// Represents a single form field with its configuration
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: FieldName,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
}

impl FormField {
    fn new(name: FieldName, label: &str, placeholder: &str, kind: FieldKind) -> Self {
        Self {
            name,
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            kind,
        }
    }

    pub fn text(name: FieldName, label: &str, placeholder: &str) -> Self {
        Self::new(name, label, placeholder, FieldKind::Text)
    }

    pub fn email(name: FieldName, label: &str, placeholder: &str) -> Self {
        Self::new(name, label, placeholder, FieldKind::Email)
    }

    pub fn password(name: FieldName, label: &str, placeholder: &str) -> Self {
        Self::new(name, label, placeholder, FieldKind::Password)
    }

    pub fn radio(name: FieldName, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::new(name, label, "", FieldKind::Radio(options))
    }

    pub fn dropdown(
        name: FieldName,
        label: &str,
        placeholder: &str,
        options: Vec<ChoiceOption>,
    ) -> Self {
        Self::new(name, label, placeholder, FieldKind::Dropdown(options))
    }

    pub fn checkbox(name: FieldName, text: &str) -> Self {
        Self::new(name, text, "", FieldKind::Checkbox)
    }

    /// Adapters for the registration form, in focus order
    pub fn registration_fields() -> Vec<FormField> {
        vec![
            FormField::text(FieldName::Username, "Username", "Enter your username"),
            FormField::email(FieldName::Email, "Email address", "Enter your email address"),
            FormField::password(FieldName::Password, "Password", "Enter your password"),
            FormField::radio(
                FieldName::Gender,
                "Gender",
                Gender::ALL
                    .iter()
                    .map(|g| ChoiceOption {
                        value: g.value(),
                        text: g.label(),
                    })
                    .collect(),
            ),
            FormField::dropdown(
                FieldName::Job,
                "Are you",
                "Select your job",
                Job::ALL
                    .iter()
                    .map(|j| ChoiceOption {
                        value: j.value(),
                        text: j.text(),
                    })
                    .collect(),
            ),
            FormField::checkbox(FieldName::Terms, "I accept the terms and conditions"),
        ]
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            FieldKind::Radio(options) | FieldKind::Dropdown(options) => options,
            _ => &[],
        }
    }

    /// Index of the option whose value is `value`
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options().iter().position(|o| o.value == value)
    }

    /// Compute the value that results from applying `input` to `current`.
    ///
    /// Returns `None` when the input means nothing for this kind of field.
    pub fn apply(&self, current: &FieldValue, input: FieldInput) -> Option<FieldValue> {
        match (&self.kind, input) {
            (FieldKind::Text | FieldKind::Email | FieldKind::Password, FieldInput::Char(c)) => {
                if c.is_control() {
                    return None;
                }
                let mut text = current.as_text().to_string();
                text.push(c);
                Some(FieldValue::Text(text))
            }
            (FieldKind::Text | FieldKind::Email | FieldKind::Password, FieldInput::Backspace) => {
                let mut text = current.as_text().to_string();
                text.pop()?;
                Some(FieldValue::Text(text))
            }
            (FieldKind::Radio(options) | FieldKind::Dropdown(options), FieldInput::Select(i)) => {
                options.get(i).map(|o| FieldValue::Choice(Some(o.value)))
            }
            (FieldKind::Checkbox, FieldInput::Toggle) => Some(FieldValue::Flag(!current.as_flag())),
            _ => None,
        }
    }

    /// Text shown for the current value
    pub fn display_value(&self, current: &FieldValue, mask_password: bool) -> String {
        match &self.kind {
            FieldKind::Password if mask_password => "•".repeat(current.as_text().chars().count()),
            FieldKind::Text | FieldKind::Email | FieldKind::Password => {
                current.as_text().to_string()
            }
            FieldKind::Radio(options) | FieldKind::Dropdown(options) => current
                .as_choice()
                .and_then(|v| options.iter().find(|o| o.value == v))
                .map(|o| o.text.to_string())
                .unwrap_or_default(),
            FieldKind::Checkbox => {
                if current.as_flag() {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        }
    }
}
