//! Morse timeline builder.
//!
//! Flattens the fixed message "SOS" into one on/off [`Slot`] per clock
//! period.  A dot lights one slot, a dash three; every symbol is followed
//! by exactly one dark slot.
//!
//! ```text
//!  S           O                       S
//!  ▮▯ ▮▯ ▮▯    ▮▮▮▯ ▮▮▮▯ ▮▮▮▯          ▮▯ ▮▯ ▮▯
//!  0 ─────────────────────────────────────────▶ 23
//! ```

use heapless::Vec;

/// Slots in one SOS cycle: 15 lit (3 + 9 + 3) and 9 gaps.
pub const TIMELINE_LEN: usize = 24;

/// One fixed-duration tick of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    On,
    Off,
}

impl Slot {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Slot {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Morse primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Lit slots this symbol occupies before its trailing gap.
    pub const fn on_slots(self) -> usize {
        match self {
            Self::Dot => 1,
            Self::Dash => 3,
        }
    }
}

/// S-O-S as nine symbols.
pub const SOS: [Symbol; 9] = [
    Symbol::Dot,
    Symbol::Dot,
    Symbol::Dot,
    Symbol::Dash,
    Symbol::Dash,
    Symbol::Dash,
    Symbol::Dot,
    Symbol::Dot,
    Symbol::Dot,
];

/// Immutable slot sequence for one signal cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    slots: Vec<Slot, TIMELINE_LEN>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of lit slots.
    pub fn on_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_on()).count()
    }
}

/// Build the SOS timeline.  Pure: every call returns the same sequence.
pub fn build_timeline() -> Timeline {
    let mut slots = Vec::new();
    for symbol in SOS {
        for _ in 0..symbol.on_slots() {
            push_slot(&mut slots, Slot::On);
        }
        push_slot(&mut slots, Slot::Off);
    }
    Timeline { slots }
}

fn push_slot(slots: &mut Vec<Slot, TIMELINE_LEN>, slot: Slot) {
    if slots.push(slot).is_err() {
        debug_assert!(false, "SOS timeline exceeds {TIMELINE_LEN} slots");
    }
}

/// Result of advancing a cursor over a timeline by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `slot` is due now; the cursor moves to `next`.
    Emit { slot: Slot, next: usize },
    /// The cursor has reached the end of the timeline.
    Exhausted,
}

/// One tick as a pure function of (timeline, cursor).
pub fn step(timeline: &Timeline, cursor: usize) -> Step {
    match timeline.get(cursor) {
        Some(slot) => Step::Emit {
            slot,
            next: cursor + 1,
        },
        None => Step::Exhausted,
    }
}
