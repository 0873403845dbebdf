//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (SOS button,
//! settings screen, location service) that the
//! [`SosService`](super::service::SosService) interprets and acts upon.

use chrono::{DateTime, Utc};

use crate::config::SosConfig;
use crate::diary::Priority;
use crate::nav::Coordinate;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Begin signalling (restarts from slot 0 if already running).
    Start,

    /// Stop signalling and force torch and screen dark.
    Stop,

    /// Flip the activation state.
    Toggle,

    /// Enable or disable the audio pulse on lit slots.
    SetSoundEnabled(bool),

    /// Replace timing and sound settings (validated first).
    UpdateConfig(SosConfig),

    /// Persist the current settings immediately.
    SaveConfig,

    /// New position fix from the location service.
    UpdatePosition(Coordinate),

    /// New true heading (degrees) from the compass.
    UpdateHeading(f64),

    /// Store the current fix as the walk-back waypoint.
    SaveWaypoint,

    /// Lock or unlock the waypoint against overwrite.
    LockWaypoint(bool),

    /// Record a diary entry stamped `at`.
    AddDiaryEntry {
        at: DateTime<Utc>,
        text: String,
        priority: Priority,
    },

    /// Delete the diary entry with this id.
    RemoveDiaryEntry(u32),

    /// Render every diary entry for sharing.
    ExportDiary,

    /// Stop everything and leave the control loop.
    Shutdown,
}
