//! SOS signal core: the Morse timeline and the player that replays it.

pub mod morse;
pub mod player;

pub use morse::{Slot, Timeline, build_timeline};
pub use player::{PlayerState, SignalPlayer, TickOutcome};
