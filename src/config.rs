//! Security system configuration
//!
//! Tunable parameters for the alarm core.  Loaded through a
//! [`ConfigPort`](crate::app::ports::ConfigPort) and validated before use.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum analyzer confidence (percent, 0-100) for a cat verdict
    pub cat_confidence_threshold: f32,
    /// Emit `AlarmStatusChanged` even when a write leaves the status unchanged
    pub emit_unchanged_events: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: 50.0,
            emit_unchanged_events: false,
        }
    }
}

impl SecurityConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.cat_confidence_threshold) {
            return Err(ConfigError::ValidationFailed(
                "cat_confidence_threshold must be 0.0–100.0",
            ));
        }
        Ok(())
    }
}
