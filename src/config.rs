//! Signal configuration parameters.
//!
//! Timing and sound settings for the SOS signal.  Defaults reproduce the
//! standard cadence: half-second slots, three-second pause between cycles.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosConfig {
    // --- Timing ---
    /// Duration of one timeline slot (milliseconds)
    pub slot_period_ms: u32,
    /// Pause after the repeating clock finds the timeline exhausted (milliseconds)
    pub cycle_pause_ms: u32,

    // --- Audio ---
    /// Play an alert pulse on every lit slot
    pub sound_enabled: bool,
}

impl Default for SosConfig {
    fn default() -> Self {
        Self {
            slot_period_ms: 500,
            cycle_pause_ms: 3000,
            sound_enabled: false,
        }
    }
}

/// Range-check every field.  Rejects, never clamps.
pub fn validate_config(cfg: &SosConfig) -> Result<(), ConfigError> {
    if !(50..=5000).contains(&cfg.slot_period_ms) {
        return Err(ConfigError::ValidationFailed(
            "slot_period_ms must be 50..=5000",
        ));
    }
    if cfg.cycle_pause_ms > 60_000 {
        return Err(ConfigError::ValidationFailed(
            "cycle_pause_ms must be at most 60000",
        ));
    }
    Ok(())
}
