//! Unified error types for SOS Light.
//!
//! A single `Error` enum that every subsystem converts into.  All variants
//! are `Copy` so they pass through the scheduler and service without
//! allocation.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The torch could not be driven.
    Torch(TorchError),
    /// Walk-back guidance could not complete the request.
    Nav(NavError),
    /// Settings are invalid or could not be loaded.
    Config(ConfigError),
    /// A diary edit was rejected.
    Diary(DiaryError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Torch(e) => write!(f, "torch: {e}"),
            Self::Nav(e) => write!(f, "nav: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Diary(e) => write!(f, "diary: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Torch errors
// ---------------------------------------------------------------------------

/// Reasons a single torch emission was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchError {
    /// The device has no flash LED.
    NoHardware,
    /// Another consumer holds the torch.
    Busy,
    /// The output pin rejected the write.
    WriteFailed,
}

impl fmt::Display for TorchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHardware => write!(f, "no torch hardware"),
            Self::Busy => write!(f, "torch claimed by another consumer"),
            Self::WriteFailed => write!(f, "torch write failed"),
        }
    }
}

impl From<TorchError> for Error {
    fn from(e: TorchError) -> Self {
        Self::Torch(e)
    }
}

// ---------------------------------------------------------------------------
// Navigation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// No position fix has been received yet.
    NoFix,
    /// The saved waypoint is locked against overwrite.
    Locked,
    /// Latitude or longitude outside the valid range.
    InvalidCoordinate,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFix => write!(f, "no position fix"),
            Self::Locked => write!(f, "waypoint locked"),
            Self::InvalidCoordinate => write!(f, "coordinate out of range"),
        }
    }
}

impl From<NavError> for Error {
    fn from(e: NavError) -> Self {
        Self::Nav(e)
    }
}

// ---------------------------------------------------------------------------
// Diary errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaryError {
    /// The entry text is blank.
    EmptyText,
    /// No entry carries this id.
    NotFound(u32),
    /// Priority was not one of low, medium or high.
    UnknownPriority,
}

impl fmt::Display for DiaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "entry text is empty"),
            Self::NotFound(id) => write!(f, "no entry #{id}"),
            Self::UnknownPriority => write!(f, "priority must be low, medium or high"),
        }
    }
}

impl From<DiaryError> for Error {
    fn from(e: DiaryError) -> Self {
        Self::Diary(e)
    }
}
