//! Application service: the hexagonal core.
//!
//! [`SosService`] owns the signal player (and with it the activation
//! state), the live settings, the walk-back tracker and the diary.  All
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!                 ┌───────────────────────────┐ ──▶ EventSink
//!  AppCommand ──▶ │        SosService         │
//!                 │ Player · Waypoint · Diary │ ──▶ Torch / Screen / Audio
//!                 └───────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::{SosConfig, validate_config};
use crate::diary::Diary;
use crate::error::Error;
use crate::nav::WaypointTracker;
use crate::signal::{PlayerState, SignalPlayer, TickOutcome};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ConfigPort, DiaryPort, EventSink, SignalOutputs};

/// The application service orchestrates all domain logic.
pub struct SosService {
    player: SignalPlayer,
    config: SosConfig,
    tracker: WaypointTracker,
    diary: Diary,
    /// Timer ticks handled since construction.
    tick_count: u64,
    config_dirty: bool,
    diary_dirty: bool,
}

impl SosService {
    /// Construct the service.  Signalling starts inactive.
    pub fn new(config: SosConfig) -> Self {
        Self::with_diary(config, Diary::new())
    }

    /// Construct around a diary restored from storage.
    pub fn with_diary(config: SosConfig, diary: Diary) -> Self {
        Self {
            player: SignalPlayer::new(&config),
            config,
            tracker: WaypointTracker::new(),
            diary,
            tick_count: 0,
            config_dirty: false,
            diary_dirty: false,
        }
    }

    // ── Activation ────────────────────────────────────────────

    pub fn start(&mut self, now_ms: u64, hw: &mut impl SignalOutputs, sink: &mut impl EventSink) {
        let restarted = self.player.is_active();
        self.player.start(now_ms, hw);
        sink.emit(&AppEvent::Activated { restarted });
    }

    /// Idempotent; only the first stop after activation emits an event.
    pub fn stop(&mut self, hw: &mut impl SignalOutputs, sink: &mut impl EventSink) {
        let was_active = self.player.is_active();
        self.player.stop(hw);
        if was_active {
            sink.emit(&AppEvent::Deactivated);
        }
    }

    /// Flip the activation state.  Returns the new state.
    pub fn toggle(
        &mut self,
        now_ms: u64,
        hw: &mut impl SignalOutputs,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.player.is_active() {
            self.stop(hw, sink);
        } else {
            self.start(now_ms, hw, sink);
        }
        self.player.is_active()
    }

    // ── Clock ─────────────────────────────────────────────────

    /// Run every player timer due at or before `now_ms`.
    pub fn poll(
        &mut self,
        now_ms: u64,
        hw: &mut impl SignalOutputs,
        sink: &mut impl EventSink,
    ) -> usize {
        let fired = self.player.poll(now_ms, hw, |outcome| {
            if let TickOutcome::CycleComplete { cycles } = outcome {
                sink.emit(&AppEvent::CycleCompleted { cycles });
            }
        });
        self.tick_count += fired as u64;
        fired
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        hw: &mut impl SignalOutputs,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::Start => self.start(now_ms, hw, sink),
            AppCommand::Stop | AppCommand::Shutdown => self.stop(hw, sink),
            AppCommand::Toggle => {
                self.toggle(now_ms, hw, sink);
            }
            AppCommand::SetSoundEnabled(enabled) => {
                let next = SosConfig {
                    sound_enabled: enabled,
                    ..self.config.clone()
                };
                self.update_config(next, sink);
            }
            AppCommand::UpdateConfig(next) => self.update_config(next, sink),
            AppCommand::SaveConfig => {
                self.mark_config_dirty();
                info!("Explicit settings save requested");
            }
            AppCommand::UpdatePosition(fix) => {
                self.tracker.update_position(fix);
                self.emit_guidance(sink);
            }
            AppCommand::UpdateHeading(deg) => {
                self.tracker.update_heading(deg);
                self.emit_guidance(sink);
            }
            AppCommand::SaveWaypoint => match self.tracker.save_current() {
                Ok(at) => sink.emit(&AppEvent::WaypointSaved(at)),
                Err(e) => sink.emit(&AppEvent::CommandFailed(e.into())),
            },
            AppCommand::LockWaypoint(locked) => {
                self.tracker.set_locked(locked);
                info!("Waypoint {}", if locked { "locked" } else { "unlocked" });
            }
            AppCommand::AddDiaryEntry { at, text, priority } => {
                match self.diary.add(at, &text, priority) {
                    Ok(entry) => {
                        let id = entry.id;
                        self.diary_dirty = true;
                        sink.emit(&AppEvent::DiaryEntryAdded { id, priority });
                    }
                    Err(e) => sink.emit(&AppEvent::CommandFailed(e.into())),
                }
            }
            AppCommand::RemoveDiaryEntry(id) => match self.diary.remove(id) {
                Ok(_) => {
                    self.diary_dirty = true;
                    sink.emit(&AppEvent::DiaryEntryRemoved(id));
                }
                Err(e) => sink.emit(&AppEvent::CommandFailed(e.into())),
            },
            AppCommand::ExportDiary => {
                sink.emit(&AppEvent::DiaryExported(self.diary.export()));
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.player.is_active()
    }

    pub fn player_state(&self) -> PlayerState {
        self.player.state()
    }

    pub fn player(&self) -> &SignalPlayer {
        &self.player
    }

    pub fn tracker(&self) -> &WaypointTracker {
        &self.tracker
    }

    pub fn diary(&self) -> &Diary {
        &self.diary
    }

    /// Absolute time the next player timer is due, if one is armed.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.player.next_deadline_ms()
    }

    /// Timer ticks handled since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn current_config(&self) -> SosConfig {
        self.config.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    fn update_config(&mut self, next: SosConfig, sink: &mut impl EventSink) {
        if let Err(e) = validate_config(&next) {
            warn!("Rejected settings update: {}", e);
            sink.emit(&AppEvent::CommandFailed(Error::Config(e)));
            return;
        }
        self.player.apply_config(&next);
        self.config = next;
        self.mark_config_dirty();
        sink.emit(&AppEvent::ConfigChanged {
            sound_enabled: self.config.sound_enabled,
        });
        info!("Settings updated at runtime");
    }

    fn emit_guidance(&self, sink: &mut impl EventSink) {
        if let Some(g) = self.tracker.guidance() {
            sink.emit(&AppEvent::Guidance(g));
        }
    }

    // ── Settings dirty-flag management ────────────────────────

    pub fn mark_config_dirty(&mut self) {
        self.config_dirty = true;
    }

    /// Persist if anything changed since the last save.  Returns `true`
    /// when a save happened.
    pub fn force_save_if_dirty(&mut self, storage: &impl ConfigPort) -> bool {
        if !self.config_dirty {
            return false;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                info!("Settings saved");
                true
            }
            Err(e) => {
                warn!("Settings save failed: {}", e);
                false
            }
        }
    }

    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }

    /// Persist the diary if an entry was added or removed since the last
    /// save.
    pub fn force_save_diary_if_dirty(&mut self, storage: &impl DiaryPort) -> bool {
        if !self.diary_dirty {
            return false;
        }
        match storage.save_diary(&self.diary) {
            Ok(()) => {
                self.diary_dirty = false;
                info!("Diary saved ({} entries)", self.diary.len());
                true
            }
            Err(e) => {
                warn!("Diary save failed: {}", e);
                false
            }
        }
    }

    pub fn is_diary_dirty(&self) -> bool {
        self.diary_dirty
    }
}
