//! Form values and the names of their slots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named slot in [`FormValues`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Username,
    Email,
    Password,
    Gender,
    Job,
    Terms,
}

impl FieldName {
    /// All fields in focus order
    pub const ALL: [FieldName; 6] = [
        FieldName::Username,
        FieldName::Email,
        FieldName::Password,
        FieldName::Gender,
        FieldName::Job,
        FieldName::Terms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::Gender => "gender",
            Self::Job => "job",
            Self::Terms => "terms",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.value() == value)
    }
}

/// Job options offered by the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Job {
    Teacher,
    Developer,
    Doctor,
}

impl Job {
    pub const ALL: [Job; 3] = [Job::Teacher, Job::Developer, Job::Doctor];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Developer => "developer",
            Self::Doctor => "doctor",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Teacher => "Teacher",
            Self::Developer => "Developer",
            Self::Doctor => "Doctor",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.value() == value)
    }
}

/// Current value of every field in the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: Option<Gender>,
    pub job: Option<Job>,
    pub terms: bool,
}

/// Type-safe view of a single slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Wire value of the selected option, if any
    Choice(Option<&'static str>),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Choice(c) => c.unwrap_or(""),
            FieldValue::Flag(_) => "",
        }
    }

    pub fn as_choice(&self) -> Option<&'static str> {
        match self {
            FieldValue::Choice(c) => *c,
            _ => None,
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

impl FormValues {
    /// Read the value bound to `name`
    pub fn get(&self, name: FieldName) -> FieldValue {
        match name {
            FieldName::Username => FieldValue::Text(self.username.clone()),
            FieldName::Email => FieldValue::Text(self.email.clone()),
            FieldName::Password => FieldValue::Text(self.password.clone()),
            FieldName::Gender => FieldValue::Choice(self.gender.map(|g| g.value())),
            FieldName::Job => FieldValue::Choice(self.job.map(|j| j.value())),
            FieldName::Terms => FieldValue::Flag(self.terms),
        }
    }

    /// Write `value` into the slot named `name`.
    ///
    /// Returns false when the value's shape does not fit the slot or names an
    /// unknown option; the slot is left untouched in that case.
    pub fn set(&mut self, name: FieldName, value: FieldValue) -> bool {
        match (name, value) {
            (FieldName::Username, FieldValue::Text(s)) => self.username = s,
            (FieldName::Email, FieldValue::Text(s)) => self.email = s,
            (FieldName::Password, FieldValue::Text(s)) => self.password = s,
            (FieldName::Gender, FieldValue::Choice(None)) => self.gender = None,
            (FieldName::Gender, FieldValue::Choice(Some(v))) => match Gender::from_value(v) {
                Some(g) => self.gender = Some(g),
                None => return false,
            },
            (FieldName::Job, FieldValue::Choice(None)) => self.job = None,
            (FieldName::Job, FieldValue::Choice(Some(v))) => match Job::from_value(v) {
                Some(j) => self.job = Some(j),
                None => return false,
            },
            (FieldName::Terms, FieldValue::Flag(b)) => self.terms = b,
            _ => return false,
        }
        true
    }

    /// Copy suitable for logs, with the password masked
    pub fn redacted(&self) -> Self {
        Self {
            password: "*".repeat(self.password.chars().count()),
            ..self.clone()
        }
    }
}
