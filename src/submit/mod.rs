//! Registration submit backends

mod error;
mod simulated;
mod traits;

pub use error::SubmitError;
pub use simulated::SimulatedBackend;
pub use traits::{Receipt, RegistrationBackend};

#[cfg(test)]
pub use traits::MockRegistrationBackend;
