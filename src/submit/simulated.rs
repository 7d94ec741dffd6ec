//! Backend that stands in for a network call with a fixed delay

use super::error::SubmitError;
use super::traits::{Receipt, RegistrationBackend};
use crate::state::FormValues;
use async_trait::async_trait;
use std::time::Duration;

/// Accepts every registration after `delay`
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl RegistrationBackend for SimulatedBackend {
    async fn register(&self, values: FormValues) -> Result<Receipt, SubmitError> {
        tracing::debug!(
            username = %values.username,
            delay_ms = self.delay.as_millis() as u64,
            "simulating registration request"
        );
        tokio::time::sleep(self.delay).await;
        Ok(Receipt::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_default_delay() {
        assert_eq!(SimulatedBackend::default().delay(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_waits_for_delay() {
        let backend = SimulatedBackend::new(Duration::from_millis(1500));
        let start = Instant::now();
        let receipt = backend.register(FormValues::default()).await;
        assert!(receipt.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_is_pending_before_delay() {
        let backend = SimulatedBackend::new(Duration::from_millis(500));
        let mut task = tokio_test::task::spawn(backend.register(FormValues::default()));
        assert!(task.poll().is_pending());
        tokio::time::advance(Duration::from_millis(499)).await;
        assert!(task.poll().is_pending());
        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(task.poll().is_ready());
    }

    #[test]
    fn test_receipts_are_unique() {
        assert_ne!(Receipt::new().id, Receipt::new().id);
    }
}
