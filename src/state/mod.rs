//! Application state module

mod app_state;
mod forms;
mod spinner_state;

pub use app_state::*;
pub use forms::*;
pub use spinner_state::*;
