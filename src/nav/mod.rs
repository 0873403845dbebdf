//! Walk-back guidance and compass labelling.
//!
//! Great-circle maths for the "walk back to saved point" arrow, plus the
//! small formatting helpers the compass readout needs.
//!
//! ```text
//!            N (0°)
//!            ▲   ╱ bearing to waypoint
//!            │  ╱
//!            │ ╱ ◀── arrow = bearing − heading
//!            │╱
//!   W ───────●─────── E
//!           fix
//! ```

pub mod waypoint;

pub use waypoint::{Guidance, WaypointTracker};

use core::fmt;

use crate::error::NavError;

/// Mean Earth radius (IUGG), metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Validating constructor.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, NavError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(NavError::InvalidCoordinate);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// `"lat, lon"` with six decimals, as shown and copied by the compass view.
pub fn coordinate_label(c: Coordinate) -> String {
    c.to_string()
}

/// Wrap any angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Initial great-circle bearing from `from` to `to`, degrees in `[0, 360)`.
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Haversine distance in metres.
pub fn distance_m(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Screen rotation for an arrow that points at `bearing` while the device
/// faces `heading`.
pub fn arrow_rotation(bearing: f64, heading: f64) -> f64 {
    normalize_degrees(bearing - heading)
}

/// `"--"` when unknown, whole metres under 1 km, otherwise km to 2 dp.
pub fn distance_label(distance_m: Option<f64>) -> String {
    match distance_m {
        None => "--".to_string(),
        Some(d) if d < 1000.0 => format!("{:.0} meters", d),
        Some(d) => format!("{:.2} km", d / 1000.0),
    }
}

/// The eight compass points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Nearest point; each owns a 45° sector centred on it.
    pub fn from_heading(deg: f64) -> Self {
        let sector = ((normalize_degrees(deg) + 22.5) / 45.0) as usize % 8;
        Self::ALL[sector]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }

    /// Centre of this point's sector.
    pub fn degrees(self) -> f64 {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0) as f64 * 45.0
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
