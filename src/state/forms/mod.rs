//! Form domain layer
//!
//! Type-safe form handling for the registration form:
//! - `values`: the values bound to each field
//! - `field`: field adapters (text, radio, dropdown, checkbox)
//! - `schema`: declarative validation rules
//! - `form_state`: the form state container and submit lifecycle

mod field;
mod form_state;
mod schema;
mod values;

pub use field::{FieldInput, FieldKind, FormField};
pub use form_state::{Form, RegisterForm, SubmitPhase, SubmitRequest, ValidationMode};
pub use schema::SchemaError;
pub use values::{FieldName, FieldValue, FormValues, Gender, Job};
