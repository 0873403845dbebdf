//! SOS signal player.
//!
//! Replays a [`Timeline`] on a fixed-period clock and drives the torch,
//! screen fill and audio sinks.  The player owns at most one armed timer
//! at a time: the repeating slot clock while a cycle plays, or the one-shot
//! pause between cycles.
//!
//! ```text
//!            start()                      timeline exhausted
//!   ┌──────┐ ─────────▶ ┌─────────┐ ───────────────────────▶ ┌──────────────────────┐
//!   │ Idle │            │ Running │                          │ PausedBetweenCycles  │
//!   └──────┘ ◀───────── └─────────┘ ◀─────────────────────── └──────────────────────┘
//!      ▲       stop()                  pause elapsed, still active        │
//!      └──────────────────────────────────────────────────────────────────┘
//!                                   stop()
//! ```
//!
//! The player does not sleep.  The caller reads [`SignalPlayer::next_timer`],
//! waits until its due time, then hands the token back through
//! [`SignalPlayer::tick`] (or lets [`SignalPlayer::poll`] do that for every
//! due timer).  A token that is no longer armed is ignored, so a timer that
//! fired concurrently with [`SignalPlayer::stop`] can never emit.

use log::{debug, info, warn};

use crate::app::ports::SignalOutputs;
use crate::config::SosConfig;

use super::morse::{Slot, Step, Timeline, build_timeline, step};
use crate::error::TorchError;

/// Back-off between attempts to force a lit torch dark after `stop`.
pub const TORCH_OFF_RETRY_MS: u64 = 250;

// ═══════════════════════════════════════════════════════════════
//  Timer types
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Running,
    PausedBetweenCycles,
}

/// Identity of an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Slot clock; re-armed one period after each fire.
    Repeating,
    /// Inter-cycle pause; disarmed after it fires.
    OneShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    pub token: TimerToken,
    pub kind: TimerKind,
    /// Absolute due time on the caller's monotonic clock.
    pub due_ms: u64,
}

/// What a single [`SignalPlayer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Slot `index` of the current timeline went to the sinks.
    Emitted { index: usize, slot: Slot },
    /// The timeline ran out; the pause timer is armed.
    CycleComplete { cycles: u64 },
    /// The pause elapsed while active; slot 0 of a fresh timeline went out.
    Restarted { slot: Slot },
    /// The token was not armed (cancelled or superseded).  Nothing emitted.
    Stale,
}

// ═══════════════════════════════════════════════════════════════
//  Player
// ═══════════════════════════════════════════════════════════════

pub struct SignalPlayer {
    slot_period_ms: u32,
    cycle_pause_ms: u32,
    sound_enabled: bool,
    /// Activation flag.  Read on every tick, never snapshotted.
    active: bool,
    state: PlayerState,
    timeline: Timeline,
    cursor: usize,
    timer: Option<ArmedTimer>,
    next_token: u32,
    cycles_completed: u64,
    /// Last torch write succeeded; used to log failures once per run.
    torch_ok: bool,
    torch_drops: u64,
    /// Latest time seen through `start` or `poll`.
    clock_ms: u64,
    /// Due time of the next attempt to turn the torch off after a failed
    /// forced-off write.  Cleared by any successful torch write.
    torch_off_retry_ms: Option<u64>,
}

impl SignalPlayer {
    pub fn new(config: &SosConfig) -> Self {
        Self {
            slot_period_ms: config.slot_period_ms,
            cycle_pause_ms: config.cycle_pause_ms,
            sound_enabled: config.sound_enabled,
            active: false,
            state: PlayerState::Idle,
            timeline: build_timeline(),
            cursor: 0,
            timer: None,
            next_token: 0,
            cycles_completed: 0,
            torch_ok: true,
            torch_drops: 0,
            clock_ms: 0,
            torch_off_retry_ms: None,
        }
    }

    /// Adopt new timing and sound settings.  Timing applies from the next
    /// timer armed; the one already pending keeps its due time.
    pub fn apply_config(&mut self, config: &SosConfig) {
        self.slot_period_ms = config.slot_period_ms;
        self.cycle_pause_ms = config.cycle_pause_ms;
        self.sound_enabled = config.sound_enabled;
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Activate and begin a fresh cycle at `now_ms`.
    ///
    /// Slot 0 is emitted before this returns; the slot clock is armed for
    /// one period later.  Calling `start` while already running restarts
    /// from slot 0 and invalidates the previous timer.
    pub fn start(&mut self, now_ms: u64, hw: &mut impl SignalOutputs) -> Slot {
        if self.active {
            info!("SOS: restart requested at slot {}", self.cursor);
        }
        self.clock_ms = self.clock_ms.max(now_ms);
        self.active = true;
        self.torch_ok = true;
        self.torch_off_retry_ms = None;
        let slot = self.begin_cycle(now_ms, hw);
        info!(
            "SOS: started ({}ms slots, {}ms pause, sound={})",
            self.slot_period_ms, self.cycle_pause_ms, self.sound_enabled
        );
        slot
    }

    /// Deactivate, cancel any armed timer and force both light sinks dark.
    ///
    /// Safe to call in any state; calling it twice leaves the same end state.
    /// If the torch cannot be released right now (another consumer holds
    /// it), the off-write is retried from [`SignalPlayer::poll`] every
    /// [`TORCH_OFF_RETRY_MS`] until it lands.
    pub fn stop(&mut self, hw: &mut impl SignalOutputs) {
        let was = self.state;
        self.timer = None;
        self.active = false;
        self.state = PlayerState::Idle;

        self.force_torch_off(hw);
        hw.set_screen_fill(false);

        if was != PlayerState::Idle {
            info!("SOS: stopped from {:?} at slot {}", was, self.cursor);
        }
    }

    // ── Timer callbacks ───────────────────────────────────────

    /// Handle the timer identified by `token` firing.
    pub fn tick(&mut self, token: TimerToken, hw: &mut impl SignalOutputs) -> TickOutcome {
        let Some(timer) = self.timer.filter(|t| t.token == token) else {
            debug!("SOS: ignoring stale timer {:?}", token);
            return TickOutcome::Stale;
        };
        if !self.active {
            self.timer = None;
            return TickOutcome::Stale;
        }

        match timer.kind {
            TimerKind::Repeating => match step(&self.timeline, self.cursor) {
                Step::Emit { slot, next } => {
                    let index = self.cursor;
                    self.cursor = next;
                    self.timer = Some(ArmedTimer {
                        due_ms: timer.due_ms + self.period_ms(),
                        ..timer
                    });
                    self.emit(slot, hw);
                    TickOutcome::Emitted { index, slot }
                }
                Step::Exhausted => {
                    self.cycles_completed += 1;
                    self.state = PlayerState::PausedBetweenCycles;
                    self.arm(
                        TimerKind::OneShot,
                        timer.due_ms + u64::from(self.cycle_pause_ms),
                    );
                    debug!(
                        "SOS: cycle {} complete, pausing {}ms",
                        self.cycles_completed, self.cycle_pause_ms
                    );
                    TickOutcome::CycleComplete {
                        cycles: self.cycles_completed,
                    }
                }
            },
            TimerKind::OneShot => {
                self.timer = None;
                let slot = self.begin_cycle(timer.due_ms, hw);
                TickOutcome::Restarted { slot }
            }
        }
    }

    /// Fire every timer due at or before `now_ms`, in due order.
    ///
    /// Each tick runs at its own due time, so a late poll catches up
    /// without drifting the slot grid.  Returns the number of ticks run.
    pub fn poll(
        &mut self,
        now_ms: u64,
        hw: &mut impl SignalOutputs,
        mut on_tick: impl FnMut(TickOutcome),
    ) -> usize {
        self.clock_ms = self.clock_ms.max(now_ms);
        if !self.active && self.torch_off_retry_ms.is_some_and(|due| due <= now_ms) {
            self.force_torch_off(hw);
        }

        let mut fired = 0;
        while let Some(timer) = self.timer {
            if timer.due_ms > now_ms {
                break;
            }
            on_tick(self.tick(timer.token, hw));
            fired += 1;
        }
        fired
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The armed timer, if any.
    pub fn next_timer(&self) -> Option<ArmedTimer> {
        self.timer
    }

    /// Earliest time `poll` has work: the armed timer or a pending
    /// torch-off retry.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.timer.map(|t| t.due_ms), self.torch_off_retry_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// A forced-off torch write failed and is still waiting to be retried.
    pub fn torch_off_pending(&self) -> bool {
        self.torch_off_retry_ms.is_some()
    }

    /// Index of the next slot to emit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// Torch emissions dropped because the device was unavailable.
    pub fn torch_drops(&self) -> u64 {
        self.torch_drops
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    // ── Internal ──────────────────────────────────────────────

    fn begin_cycle(&mut self, now_ms: u64, hw: &mut impl SignalOutputs) -> Slot {
        self.timeline = build_timeline();
        self.cursor = 0;
        self.state = PlayerState::Running;
        self.arm(TimerKind::Repeating, now_ms + self.period_ms());

        match step(&self.timeline, self.cursor) {
            Step::Emit { slot, next } => {
                self.cursor = next;
                self.emit(slot, hw);
                slot
            }
            Step::Exhausted => Slot::Off,
        }
    }

    fn arm(&mut self, kind: TimerKind, due_ms: u64) -> TimerToken {
        self.next_token = self.next_token.wrapping_add(1);
        let token = TimerToken(self.next_token);
        self.timer = Some(ArmedTimer {
            token,
            kind,
            due_ms,
        });
        token
    }

    /// Torch and screen get the same value in one call.
    fn emit(&mut self, slot: Slot, hw: &mut impl SignalOutputs) {
        let on = slot.is_on();

        match hw.set_torch(on) {
            Ok(()) => {
                if !self.torch_ok {
                    info!("SOS: torch available again");
                }
                self.torch_ok = true;
                self.torch_off_retry_ms = None;
            }
            Err(e) => {
                self.torch_drops += 1;
                if self.torch_ok {
                    warn!("SOS: torch unavailable ({}), screen only", e);
                }
                self.torch_ok = false;
            }
        }
        hw.set_screen_fill(on);

        if on && self.sound_enabled {
            hw.play_pulse();
        }
    }

    fn force_torch_off(&mut self, hw: &mut impl SignalOutputs) {
        match hw.set_torch(false) {
            Ok(()) => {
                if self.torch_off_retry_ms.take().is_some() {
                    info!("SOS: torch released");
                }
            }
            // Nothing to switch off.
            Err(TorchError::NoHardware) => self.torch_off_retry_ms = None,
            Err(e) => {
                if self.torch_off_retry_ms.is_none() {
                    warn!("SOS: torch off failed ({}), retrying", e);
                }
                self.torch_off_retry_ms = Some(self.clock_ms + TORCH_OFF_RETRY_MS);
            }
        }
    }

    fn period_ms(&self) -> u64 {
        u64::from(self.slot_period_ms.max(1))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
