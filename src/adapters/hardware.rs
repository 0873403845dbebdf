//! Hardware adapter: bridges the signalling peripherals to domain ports.
//!
//! Owns the torch, screen and chime drivers and exposes them through
//! [`TorchPort`], [`ScreenPort`] and [`AudioPort`].  On a host build the
//! flash LED is a [`LogPin`] that reports its level through `log`.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::trace;

use crate::app::ports::{AudioPort, ScreenPort, TorchPort};
use crate::drivers::chime::Chime;
use crate::drivers::screen::ScreenFill;
use crate::drivers::torch::{TorchClaim, TorchDriver};
use crate::error::TorchError;

/// Output pin stand-in for hosts without a flash LED line.
#[derive(Debug, Default)]
pub struct LogPin {
    high: bool,
}

impl LogPin {
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for LogPin {
    type Error = Infallible;
}

impl OutputPin for LogPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        trace!("torch: off");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        trace!("torch: ON");
        Ok(())
    }
}

/// Concrete adapter that combines all signalling outputs behind port traits.
pub struct HostHardware<P = LogPin> {
    torch: TorchDriver<P>,
    screen: ScreenFill,
    chime: Chime,
}

impl<P: OutputPin> HostHardware<P> {
    pub fn new(torch: TorchDriver<P>, screen: ScreenFill, chime: Chime) -> Self {
        Self {
            torch,
            screen,
            chime,
        }
    }

    pub fn torch(&self) -> &TorchDriver<P> {
        &self.torch
    }

    pub fn screen(&self) -> &ScreenFill {
        &self.screen
    }

    pub fn chime(&self) -> &Chime {
        &self.chime
    }
}

impl HostHardware<LogPin> {
    /// Host wiring: a logging torch pin guarded by `claim`.
    pub fn host(claim: TorchClaim) -> Self {
        Self::new(
            TorchDriver::new(LogPin::default(), claim),
            ScreenFill::new(),
            Chime::new(),
        )
    }

    /// Host wiring for a device without a flash.
    pub fn without_torch() -> Self {
        Self::new(TorchDriver::absent(), ScreenFill::new(), Chime::new())
    }
}

// ── Port implementations ──────────────────────────────────────

impl<P: OutputPin> TorchPort for HostHardware<P> {
    fn set_torch(&mut self, on: bool) -> Result<(), TorchError> {
        self.torch.set_torch(on)
    }
}

impl<P: OutputPin> ScreenPort for HostHardware<P> {
    fn set_screen_fill(&mut self, on: bool) {
        self.screen.set_screen_fill(on);
    }
}

impl<P: OutputPin> AudioPort for HostHardware<P> {
    fn play_pulse(&mut self) {
        self.chime.play_pulse();
    }
}
