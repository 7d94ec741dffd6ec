//! Platform-specific configuration

/// Submit shortcut display for help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Reset shortcut display for help text
pub const RESET_SHORTCUT: &str = "Ctrl+R";
