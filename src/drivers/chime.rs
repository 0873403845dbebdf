//! Alert chime.
//!
//! Fire-and-forget: rings the terminal bell on stderr.  A write failure
//! is logged and otherwise ignored.

use std::io::Write;

use log::debug;

use crate::app::ports::AudioPort;

pub struct Chime {
    pulses: u64,
}

impl Chime {
    pub fn new() -> Self {
        Self { pulses: 0 }
    }

    pub fn pulses(&self) -> u64 {
        self.pulses
    }
}

impl Default for Chime {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPort for Chime {
    fn play_pulse(&mut self) {
        self.pulses += 1;
        let mut err = std::io::stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|()| err.flush()) {
            debug!("chime: bell write failed ({})", e);
        }
    }
}
