//! Port traits: the hexagonal boundary between signal logic and the device.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SosService (domain)
//! ```
//!
//! Driven adapters (torch, screen, audio, event sinks, settings storage)
//! implement these traits.  The [`SosService`](super::service::SosService)
//! and the [`SignalPlayer`](crate::signal::player::SignalPlayer) consume
//! them via generics, so the scheduler never touches a device API directly.

use crate::config::SosConfig;
use crate::diary::Diary;
use crate::error::TorchError;

// ───────────────────────────────────────────────────────────────
// Signal sinks (driven adapters: domain → device)
// ───────────────────────────────────────────────────────────────

/// The camera flash LED.
///
/// Best-effort: an absent or claimed torch returns an error, and the
/// caller drops that single emission.  Implementations must not hold the
/// device between calls.
pub trait TorchPort {
    fn set_torch(&mut self, on: bool) -> Result<(), TorchError>;
}

/// Full-screen fill colour.  `true` is fully bright, `false` fully dark.
pub trait ScreenPort {
    fn set_screen_fill(&mut self, on: bool);
}

/// Fire-and-forget system alert sound.
pub trait AudioPort {
    fn play_pulse(&mut self);
}

/// Every sink the signal player drives in one bundle.
pub trait SignalOutputs: TorchPort + ScreenPort + AudioPort {}

impl<T: TorchPort + ScreenPort + AudioPort> SignalOutputs for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, UI binding).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent settings)
// ───────────────────────────────────────────────────────────────

/// Loads and persists user settings.
///
/// Implementations MUST validate before persisting.  Out-of-range values
/// are rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Returns [`SosConfig::default()`] if nothing is stored yet.
    fn load(&self) -> Result<SosConfig, ConfigError>;

    fn save(&self, config: &SosConfig) -> Result<(), ConfigError>;
}

/// Loads and persists the situation diary.  Shares [`ConfigError`] with
/// the settings port since both live in the same store.
pub trait DiaryPort {
    /// Returns an empty diary if nothing is stored yet.
    fn load_diary(&self) -> Result<Diary, ConfigError>;

    fn save_diary(&self, diary: &Diary) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored settings failed deserialization.
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "settings corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
