//! Full-screen fill used as a second light source.
//!
//! Bright white when the slot is lit, black otherwise.  The presentation
//! layer reads [`ScreenFill::colour`] to paint the background.

use crate::app::ports::ScreenPort;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const FILL_BRIGHT: Rgb = (255, 255, 255);
pub const FILL_DARK: Rgb = (0, 0, 0);

pub struct ScreenFill {
    bright: bool,
}

impl ScreenFill {
    pub fn new() -> Self {
        Self { bright: false }
    }

    pub fn is_bright(&self) -> bool {
        self.bright
    }

    pub fn colour(&self) -> Rgb {
        if self.bright { FILL_BRIGHT } else { FILL_DARK }
    }
}

impl Default for ScreenFill {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenPort for ScreenFill {
    fn set_screen_fill(&mut self, on: bool) {
        self.bright = on;
    }
}
