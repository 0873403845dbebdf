//! Outbound application events.
//!
//! The [`SosService`](super::service::SosService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log, update a status label, etc.

use crate::diary::Priority;
use crate::error::Error;
use crate::nav::{Coordinate, Guidance};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Signalling started (`restarted` when it was already running).
    Activated { restarted: bool },

    /// Signalling stopped; torch and screen forced dark.
    Deactivated,

    /// One full timeline finished; the inter-cycle pause began.
    CycleCompleted { cycles: u64 },

    /// Settings changed at runtime.
    ConfigChanged { sound_enabled: bool },

    /// A walk-back waypoint was stored.
    WaypointSaved(Coordinate),

    /// Fresh walk-back guidance after a fix or heading update.
    Guidance(Guidance),

    /// A diary entry was recorded.
    DiaryEntryAdded { id: u32, priority: Priority },

    /// A diary entry was deleted.
    DiaryEntryRemoved(u32),

    /// Every diary entry rendered as shareable text.
    DiaryExported(String),

    /// A command was rejected.
    CommandFailed(Error),
}
