//! Saved-waypoint tracker.
//!
//! Holds the latest position fix and heading from the platform location
//! service, plus the waypoint the user saved.  A locked waypoint cannot
//! be overwritten until unlocked.

use log::info;

use super::{Coordinate, arrow_rotation, distance_m, initial_bearing};
use crate::error::NavError;

/// Guidance toward the saved waypoint from the latest fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guidance {
    /// Great-circle bearing to the waypoint, degrees from true north.
    pub bearing_deg: f64,
    /// Arrow rotation relative to the device; `None` until a heading arrives.
    pub arrow_deg: Option<f64>,
    pub distance_m: f64,
}

#[derive(Debug, Default)]
pub struct WaypointTracker {
    position: Option<Coordinate>,
    heading_deg: Option<f64>,
    waypoint: Option<Coordinate>,
    locked: bool,
}

impl WaypointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_position(&mut self, fix: Coordinate) {
        self.position = Some(fix);
    }

    /// True heading in degrees.
    pub fn update_heading(&mut self, heading_deg: f64) {
        self.heading_deg = Some(super::normalize_degrees(heading_deg));
    }

    /// Store the current fix as the waypoint.
    pub fn save_current(&mut self) -> Result<Coordinate, NavError> {
        if self.locked {
            return Err(NavError::Locked);
        }
        let fix = self.position.ok_or(NavError::NoFix)?;
        self.waypoint = Some(fix);
        info!("Waypoint saved at {}", fix);
        Ok(fix)
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn waypoint(&self) -> Option<Coordinate> {
        self.waypoint
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading_deg
    }

    /// Bearing, arrow and distance once both a fix and a waypoint exist.
    pub fn guidance(&self) -> Option<Guidance> {
        let here = self.position?;
        let target = self.waypoint?;
        let bearing_deg = initial_bearing(here, target);
        Some(Guidance {
            bearing_deg,
            arrow_deg: self.heading_deg.map(|h| arrow_rotation(bearing_deg, h)),
            distance_m: distance_m(here, target),
        })
    }
}
