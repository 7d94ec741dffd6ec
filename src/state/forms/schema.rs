//! Declarative validation schema for the registration form
//!
//! Each field carries an ordered list of rules. Evaluation walks the rules of
//! every field and keeps the message of the first rule that fails, so a field
//! never reports more than one error at a time.

use super::values::{FieldName, FieldValue, FormValues, Gender, Job};
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$";

/// Character classes a password must contain, one pattern per class
pub const PASSWORD_CLASS_PATTERNS: [&str; 4] = [r"[A-Z]", r"[a-z]", r"[0-9]", r"[^A-Za-z0-9\s]"];

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Error building a schema from rule definitions
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid pattern for field `{field}`: {source}")]
    InvalidPattern {
        field: FieldName,
        #[source]
        source: regex::Error,
    },
}

/// A single validation rule with the message it reports on failure
#[derive(Debug, Clone)]
pub enum Rule {
    /// Text is non-empty, or a choice is selected
    Required { message: String },
    /// Text has at least `min` characters
    MinLength { min: usize, message: String },
    /// Text matches the pattern
    Pattern { regex: Regex, message: String },
    /// Text matches every pattern; one message covers all of them
    MatchesAll { patterns: Vec<Regex>, message: String },
    /// Selected choice is one of `values`
    OneOf {
        values: Vec<&'static str>,
        message: String,
    },
    /// Flag is set
    Accepted { message: String },
}

impl Rule {
    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::MatchesAll { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::Accepted { message } => message,
        }
    }

    /// Returns true when `value` satisfies the rule
    pub fn check(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Rule::Required { .. }, FieldValue::Text(s)) => !s.is_empty(),
            (Rule::Required { .. }, FieldValue::Choice(c)) => c.is_some(),
            (Rule::Required { .. }, FieldValue::Flag(_)) => true,
            (Rule::MinLength { min, .. }, FieldValue::Text(s)) => s.chars().count() >= *min,
            (Rule::Pattern { regex, .. }, FieldValue::Text(s)) => regex.is_match(s),
            (Rule::MatchesAll { patterns, .. }, FieldValue::Text(s)) => {
                patterns.iter().all(|p| p.is_match(s))
            }
            // An unselected choice is the Required rule's concern
            (Rule::OneOf { values, .. }, FieldValue::Choice(c)) => {
                c.is_none_or(|v| values.contains(&v))
            }
            (Rule::Accepted { .. }, FieldValue::Flag(b)) => *b,
            // Rule applied to a slot of the wrong shape never passes
            _ => false,
        }
    }
}

/// Rules bound to one field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: FieldName,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self, message: &str) -> Self {
        self.rules.push(Rule::Required {
            message: message.to_string(),
        });
        self
    }

    pub fn min_length(mut self, min: usize, message: &str) -> Self {
        self.rules.push(Rule::MinLength {
            min,
            message: message.to_string(),
        });
        self
    }

    pub fn pattern(mut self, pattern: &str, message: &str) -> Result<Self, SchemaError> {
        let regex = compile(self.name, pattern)?;
        self.rules.push(Rule::Pattern {
            regex,
            message: message.to_string(),
        });
        Ok(self)
    }

    pub fn matches_all(mut self, patterns: &[&str], message: &str) -> Result<Self, SchemaError> {
        let patterns = patterns
            .iter()
            .map(|p| compile(self.name, p))
            .collect::<Result<Vec<_>, _>>()?;
        self.rules.push(Rule::MatchesAll {
            patterns,
            message: message.to_string(),
        });
        Ok(self)
    }

    pub fn one_of(mut self, values: &[&'static str], message: &str) -> Self {
        self.rules.push(Rule::OneOf {
            values: values.to_vec(),
            message: message.to_string(),
        });
        self
    }

    pub fn accepted(mut self, message: &str) -> Self {
        self.rules.push(Rule::Accepted {
            message: message.to_string(),
        });
        self
    }

    /// Message of the first failing rule, if any
    pub fn first_error(&self, value: &FieldValue) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| !rule.check(value))
            .map(Rule::message)
    }
}

fn compile(field: FieldName, pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern { field, source })
}

/// Per-field error messages produced by a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.0.get(&name).map(String::as_str)
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.0.contains_key(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the failing fields, in focus order
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn insert(&mut self, name: FieldName, message: String) {
        self.0.insert(name, message);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Ordered collection of field schemas
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Schema for the registration form
    pub fn registration() -> Result<Self, SchemaError> {
        let genders: Vec<&'static str> = Gender::ALL.iter().map(Gender::value).collect();
        let jobs: Vec<&'static str> = Job::ALL.iter().map(Job::value).collect();

        Ok(Self::new(vec![
            FieldSchema::new(FieldName::Username).required("Please enter your username"),
            FieldSchema::new(FieldName::Email)
                .required("Please enter your email address")
                .pattern(EMAIL_PATTERN, "Please enter valid email address")?,
            FieldSchema::new(FieldName::Password)
                .required("Please enter your password")
                .min_length(
                    PASSWORD_MIN_LENGTH,
                    "Your password must be at least 8 characters or greater",
                )
                .matches_all(
                    &PASSWORD_CLASS_PATTERNS,
                    "Your password must have at least 1 uppercase, 1 lowercase, 1 number and 1 special character",
                )?,
            FieldSchema::new(FieldName::Gender)
                .required("Please select your gender")
                .one_of(&genders, "You can only select male or female"),
            FieldSchema::new(FieldName::Job)
                .required("Please select your job")
                .one_of(&jobs, "Please select a valid job"),
            FieldSchema::new(FieldName::Terms).accepted("Please accept the terms and conditions"),
        ]))
    }

    /// Evaluate every field
    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for schema in &self.fields {
            if let Some(message) = schema.first_error(&values.get(schema.name)) {
                errors.insert(schema.name, message.to_string());
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSITE: &str =
        "Your password must have at least 1 uppercase, 1 lowercase, 1 number and 1 special character";

    fn schema() -> Schema {
        Schema::registration().unwrap()
    }

    fn valid_values() -> FormValues {
        FormValues {
            username: "evondev".to_string(),
            email: "evon@example.com".to_string(),
            password: "Passw0rd!".to_string(),
            gender: Some(Gender::Male),
            job: Some(Job::Developer),
            terms: true,
        }
    }

    mod required {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_form_reports_every_field() {
            let errors = schema().validate(&FormValues::default());
            assert_eq!(errors.len(), 6);
            assert_eq!(errors.get(FieldName::Username), Some("Please enter your username"));
            assert_eq!(errors.get(FieldName::Email), Some("Please enter your email address"));
            assert_eq!(errors.get(FieldName::Password), Some("Please enter your password"));
            assert_eq!(errors.get(FieldName::Gender), Some("Please select your gender"));
            assert_eq!(errors.get(FieldName::Job), Some("Please select your job"));
            assert_eq!(
                errors.get(FieldName::Terms),
                Some("Please accept the terms and conditions")
            );
        }

        #[test]
        fn test_valid_values_have_no_errors() {
            assert!(schema().validate(&valid_values()).is_empty());
        }

        #[test]
        fn test_each_emptied_field_is_reported_alone() {
            let s = schema();
            for name in FieldName::ALL {
                let mut values = valid_values();
                match name {
                    FieldName::Username => values.username.clear(),
                    FieldName::Email => values.email.clear(),
                    FieldName::Password => values.password.clear(),
                    FieldName::Gender => values.gender = None,
                    FieldName::Job => values.job = None,
                    FieldName::Terms => values.terms = false,
                }
                let errors = s.validate(&values);
                assert_eq!(errors.len(), 1, "field {name}");
                assert!(errors.contains(name), "field {name}");
            }
        }
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_malformed_email() {
            let mut values = valid_values();
            for bad in ["evon", "evon@", "evon@example", "@example.com", "a b@c.de"] {
                values.email = bad.to_string();
                assert_eq!(
                    schema().validate(&values).get(FieldName::Email),
                    Some("Please enter valid email address"),
                    "{bad}"
                );
            }
        }

        #[test]
        fn test_well_formed_email() {
            let mut values = valid_values();
            values.email = "first.last+tag@mail.example.org".to_string();
            assert!(!schema().validate(&values).contains(FieldName::Email));
        }
    }

    mod password {
        use super::*;
        use pretty_assertions::assert_eq;

        fn password_error(password: &str) -> Option<String> {
            let mut values = valid_values();
            values.password = password.to_string();
            schema()
                .validate(&values)
                .get(FieldName::Password)
                .map(str::to_string)
        }

        #[test]
        fn test_too_short() {
            assert_eq!(
                password_error("Ab1!").as_deref(),
                Some("Your password must be at least 8 characters or greater")
            );
        }

        #[test]
        fn test_missing_any_class_yields_composite_message() {
            for pw in ["password1!", "PASSWORD1!", "Password!!", "Password12", "Pass word1"] {
                assert_eq!(password_error(pw).as_deref(), Some(COMPOSITE), "{pw}");
            }
        }

        #[test]
        fn test_all_classes_pass() {
            assert!(password_error("Abcdef1#").is_none());
            assert!(password_error("Zz9_zzzz").is_none());
        }

        #[test]
        fn test_length_counts_chars_not_bytes() {
            // 7 chars, more than 8 bytes
            assert_eq!(
                password_error("Äb1!ééé").as_deref(),
                Some("Your password must be at least 8 characters or greater")
            );
        }
    }

    mod rules {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_one_of_ignores_unselected_choice() {
            let rule = Rule::OneOf {
                values: vec!["a"],
                message: "bad".to_string(),
            };
            assert!(rule.check(&FieldValue::Choice(None)));
            assert!(rule.check(&FieldValue::Choice(Some("a"))));
            assert!(!rule.check(&FieldValue::Choice(Some("b"))));
        }

        #[test]
        fn test_rule_on_wrong_shape_fails() {
            let rule = Rule::Accepted {
                message: "x".to_string(),
            };
            assert!(!rule.check(&FieldValue::Text("yes".into())));
        }

        #[test]
        fn test_first_failing_rule_wins() {
            let field = FieldSchema::new(FieldName::Username)
                .required("required")
                .min_length(3, "short");
            assert_eq!(field.first_error(&FieldValue::Text(String::new())), Some("required"));
            assert_eq!(field.first_error(&FieldValue::Text("ab".into())), Some("short"));
            assert_eq!(field.first_error(&FieldValue::Text("abc".into())), None);
        }

        #[test]
        fn test_invalid_pattern_is_reported() {
            let err = FieldSchema::new(FieldName::Email)
                .pattern("(", "never")
                .unwrap_err();
            assert!(err.to_string().contains("email"));
        }

        #[test]
        fn test_validation_is_deterministic() {
            let s = schema();
            let mut values = valid_values();
            values.password = "short".to_string();
            assert_eq!(s.validate(&values), s.validate(&values));
        }
    }
}
