//! Camera-flash torch driver.
//!
//! Drives the flash LED through an `embedded-hal` [`OutputPin`].  The LED
//! is a device-exclusive resource shared with the camera and other apps,
//! so every write goes through a [`TorchClaim`]:
//!
//! ```text
//!  set_torch(on)
//!    ├─ claim ── Busy? ──▶ Err(TorchError::Busy)
//!    ├─ pin.set_state(on)
//!    └─ release (guard dropped)
//! ```
//!
//! The claim is held only for the duration of one write, never across
//! ticks.  A driver built without a pin models a device with no flash.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{OutputPin, PinState};
use log::debug;

use crate::app::ports::TorchPort;
use crate::error::TorchError;

// ── Claim ─────────────────────────────────────────────────────

/// Exclusive-use flag shared by every consumer of one torch.
#[derive(Debug, Clone, Default)]
pub struct TorchClaim {
    held: Arc<AtomicBool>,
}

/// Releases the claim on drop.
pub struct ClaimGuard<'a> {
    held: &'a AtomicBool,
}

impl TorchClaim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the torch, or `None` if another consumer has it.
    pub fn try_acquire(&self) -> Option<ClaimGuard<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| ClaimGuard { held: &self.held })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}

// ── Driver ────────────────────────────────────────────────────

pub struct TorchDriver<P> {
    pin: Option<P>,
    claim: TorchClaim,
    lit: bool,
}

impl<P: OutputPin> TorchDriver<P> {
    pub fn new(pin: P, claim: TorchClaim) -> Self {
        Self {
            pin: Some(pin),
            claim,
            lit: false,
        }
    }

    /// A device without a flash LED.  Every write reports `NoHardware`.
    pub fn absent() -> Self {
        Self {
            pin: None,
            claim: TorchClaim::new(),
            lit: false,
        }
    }

    pub fn has_torch(&self) -> bool {
        self.pin.is_some()
    }

    /// Last state successfully written.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn claim(&self) -> &TorchClaim {
        &self.claim
    }
}

impl<P: OutputPin> TorchPort for TorchDriver<P> {
    fn set_torch(&mut self, on: bool) -> Result<(), TorchError> {
        let pin = self.pin.as_mut().ok_or(TorchError::NoHardware)?;
        let _guard = self.claim.try_acquire().ok_or(TorchError::Busy)?;

        pin.set_state(PinState::from(on)).map_err(|e| {
            debug!("torch: pin error {:?}", e);
            TorchError::WriteFailed
        })?;
        self.lit = on;
        Ok(())
    }
}
