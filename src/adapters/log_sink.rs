//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger.  A UI binding would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::nav::{CompassPoint, distance_label};

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Activated { restarted } => {
                info!("SOS   | active{}", if *restarted { " (restarted)" } else { "" });
            }
            AppEvent::Deactivated => {
                info!("SOS   | inactive");
            }
            AppEvent::CycleCompleted { cycles } => {
                info!("SOS   | cycle {} complete", cycles);
            }
            AppEvent::ConfigChanged { sound_enabled } => {
                info!("CFG   | sound={}", if *sound_enabled { "on" } else { "off" });
            }
            AppEvent::WaypointSaved(at) => {
                info!("NAV   | waypoint saved at {}", at);
            }
            AppEvent::Guidance(g) => match g.arrow_deg {
                Some(arrow) => info!(
                    "NAV   | {} | bearing {:.0}\u{00b0} ({}) | arrow {:.0}\u{00b0}",
                    distance_label(Some(g.distance_m)),
                    g.bearing_deg,
                    CompassPoint::from_heading(g.bearing_deg),
                    arrow,
                ),
                None => info!(
                    "NAV   | {} | bearing {:.0}\u{00b0} ({}) | no heading",
                    distance_label(Some(g.distance_m)),
                    g.bearing_deg,
                    CompassPoint::from_heading(g.bearing_deg),
                ),
            },
            AppEvent::DiaryEntryAdded { id, priority } => {
                info!("DIARY | entry #{} added ({})", id, priority);
            }
            AppEvent::DiaryEntryRemoved(id) => {
                info!("DIARY | entry #{} removed", id);
            }
            AppEvent::DiaryExported(text) => {
                info!("DIARY | export\n{}", text);
            }
            AppEvent::CommandFailed(e) => {
                warn!("CMD   | rejected: {}", e);
            }
        }
    }
}
