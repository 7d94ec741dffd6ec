//! Configuration handling for the TUI

use crate::state::ValidationMode;
use crate::submit::SimulatedBackend;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `submit_delay_ms`
pub const SUBMIT_DELAY_ENV: &str = "REGISTER_TUI_SUBMIT_DELAY_MS";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Artificial delay of the simulated submit, in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// When validation runs
    pub validation_mode: Option<ValidationMode>,
    /// Render the password as bullets
    pub mask_password: Option<bool>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "register", "register-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_override(std::env::var(SUBMIT_DELAY_ENV).ok().as_deref());
        Ok(config)
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Apply the submit delay override; unparsable values are ignored
    fn apply_env_override(&mut self, delay: Option<&str>) {
        if let Some(raw) = delay {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.submit_delay_ms = Some(ms),
                Err(_) => tracing::warn!(value = raw, "ignoring invalid {SUBMIT_DELAY_ENV}"),
            }
        }
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(SimulatedBackend::DEFAULT_DELAY)
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode.unwrap_or_default()
    }

    pub fn mask_password(&self) -> bool {
        self.mask_password.unwrap_or(true)
    }
}
