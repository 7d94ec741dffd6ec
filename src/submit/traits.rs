//! Trait abstraction for the registration backend to enable mocking in tests

use super::error::SubmitError;
use crate::state::FormValues;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Acknowledgement returned for an accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }

    /// First eight hex digits of the id, for display
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver of submitted registrations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Register the submitted values
    async fn register(&self, values: FormValues) -> Result<Receipt, SubmitError>;
}
