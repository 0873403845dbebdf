//! Signal player tests against the recording mock.
//!
//! Times are in milliseconds on a virtual clock driven by `poll`.

use sos_light::config::SosConfig;
use sos_light::signal::morse::TIMELINE_LEN;
use sos_light::signal::player::TORCH_OFF_RETRY_MS;
use sos_light::signal::{PlayerState, SignalPlayer, Slot, TickOutcome, build_timeline};

use crate::mock_hw::{HwCall, MockHardware};

const SOS_PATTERN: [bool; TIMELINE_LEN] = [
    true, false, true, false, true, false, // S
    true, true, true, false, true, true, true, false, true, true, true, false, // O
    true, false, true, false, true, false, // S
];

fn player(sound: bool) -> SignalPlayer {
    SignalPlayer::new(&SosConfig {
        sound_enabled: sound,
        ..SosConfig::default()
    })
}

/// Advance in 1 ms steps, collecting every outcome.
fn run_until(p: &mut SignalPlayer, hw: &mut MockHardware, from: u64, to: u64) -> Vec<(u64, TickOutcome)> {
    let mut out = Vec::new();
    for now in from..=to {
        p.poll(now, hw, |o| out.push((now, o)));
    }
    out
}

#[test]
fn first_cycle_plays_exact_pattern_on_slot_grid() {
    let mut hw = MockHardware::new();
    let mut p = player(false);

    assert_eq!(p.start(0, &mut hw), Slot::On);
    let outcomes = run_until(&mut p, &mut hw, 1, 11_999);

    let emitted: Vec<(u64, usize)> = outcomes
        .iter()
        .filter_map(|(t, o)| match o {
            TickOutcome::Emitted { index, .. } => Some((*t, *index)),
            _ => None,
        })
        .collect();
    assert_eq!(emitted.len(), TIMELINE_LEN - 1);
    for (t, index) in emitted {
        assert_eq!(t, index as u64 * 500, "slot {index} off the grid");
    }

    assert_eq!(hw.torch_writes(), SOS_PATTERN.to_vec());
    assert_eq!(hw.screen_writes(), SOS_PATTERN.to_vec());
}

#[test]
fn pause_then_restart_at_slot_zero() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);

    let outcomes = run_until(&mut p, &mut hw, 1, 15_000);
    assert!(outcomes.contains(&(12_000, TickOutcome::CycleComplete { cycles: 1 })));
    assert!(outcomes.contains(&(15_000, TickOutcome::Restarted { slot: Slot::On })));

    // Nothing goes out during the pause.
    assert!(
        outcomes
            .iter()
            .all(|(t, _)| !(12_001..15_000).contains(t))
    );
    assert_eq!(p.state(), PlayerState::Running);
    assert_eq!(p.cursor(), 1);
    assert_eq!(hw.torch_writes().len(), TIMELINE_LEN + 1);
}

#[test]
fn second_cycle_matches_first() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 14_999);
    let first = hw.torch_writes();
    hw.clear();

    run_until(&mut p, &mut hw, 15_000, 26_999);
    assert_eq!(hw.torch_writes(), first);
}

#[test]
fn stop_before_first_boundary_leaves_everything_dark() {
    let mut hw = MockHardware::new();
    let mut p = player(true);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 300);
    p.stop(&mut hw);
    let after_stop = hw.calls.len();

    assert!(!hw.torch_on());
    assert!(!hw.screen_on());

    let outcomes = run_until(&mut p, &mut hw, 301, 40_000);
    assert!(outcomes.is_empty());
    assert_eq!(hw.calls.len(), after_stop);
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.next_timer(), None);
}

#[test]
fn stop_during_pause_prevents_restart() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 13_000);
    assert_eq!(p.state(), PlayerState::PausedBetweenCycles);

    p.stop(&mut hw);
    let after_stop = hw.calls.len();
    run_until(&mut p, &mut hw, 13_001, 20_000);
    assert_eq!(hw.calls.len(), after_stop);
}

#[test]
fn stale_token_after_stop_is_ignored() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    let pending = p.next_timer().unwrap();

    // The timer fires on another thread just as stop() lands.
    p.stop(&mut hw);
    let after_stop = hw.calls.clone();
    assert_eq!(p.tick(pending.token, &mut hw), TickOutcome::Stale);
    assert_eq!(hw.calls, after_stop);
}

#[test]
fn stale_token_after_restart_is_ignored() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    let old = p.next_timer().unwrap();
    p.start(200, &mut hw);

    assert_eq!(p.tick(old.token, &mut hw), TickOutcome::Stale);
    assert_eq!(p.next_deadline_ms(), Some(700));
}

#[test]
fn stop_is_idempotent() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.stop(&mut hw);
    p.stop(&mut hw);
    assert_eq!(p.state(), PlayerState::Idle);
    assert!(!hw.torch_on());
    assert!(!hw.screen_on());
}

#[test]
fn restart_mid_cycle_begins_at_slot_zero() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 4_000);
    assert_eq!(p.cursor(), 9);

    p.start(4_100, &mut hw);
    assert_eq!(p.cursor(), 1);
    assert_eq!(hw.calls[hw.calls.len() - 2..], [HwCall::Torch(true), HwCall::Screen(true)]);
}

#[test]
fn missing_torch_keeps_screen_on_grid() {
    let mut hw = MockHardware::without_torch();
    let mut p = player(false);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 11_999);

    assert!(hw.torch_writes().is_empty());
    assert_eq!(hw.screen_writes(), SOS_PATTERN.to_vec());
    assert_eq!(p.torch_drops(), TIMELINE_LEN as u64);
    assert!(p.is_active());
}

#[test]
fn busy_torch_drops_single_emission() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);

    let other_app = hw.claim.clone();
    let held = other_app.try_acquire().unwrap();
    run_until(&mut p, &mut hw, 1, 500);
    drop(held);
    run_until(&mut p, &mut hw, 501, 1_000);

    assert_eq!(hw.torch_writes(), vec![true, true]);
    assert_eq!(hw.screen_writes(), vec![true, false, true]);
    assert_eq!(p.torch_drops(), 1);
}

#[test]
fn torch_claim_never_outlives_a_write() {
    let mut hw = MockHardware::new();
    let mut p = player(true);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 16_000);
    p.stop(&mut hw);
    assert!(!hw.overlapping_claims);
    assert!(!hw.claim.is_held());
}

#[test]
fn sound_pulses_only_on_lit_slots() {
    let mut hw = MockHardware::new();
    let mut p = player(true);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 11_999);

    assert_eq!(hw.pulses(), build_timeline().on_count());
    assert_eq!(hw.pulses(), 15);

    // Each pulse directly follows a lit screen write.
    for (i, call) in hw.calls.iter().enumerate() {
        if *call == HwCall::Pulse {
            assert_eq!(hw.calls[i - 1], HwCall::Screen(true));
        }
    }
}

#[test]
fn sound_disabled_never_pulses() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 30_000);
    assert_eq!(hw.pulses(), 0);
}

#[test]
fn late_poll_catches_up_without_drift() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);

    // One poll far past several boundaries.
    let fired = p.poll(2_250, &mut hw, |_| {});
    assert_eq!(fired, 4);
    assert_eq!(p.next_deadline_ms(), Some(2_500));
}

#[test]
fn config_change_applies_from_next_timer() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    p.apply_config(&SosConfig {
        slot_period_ms: 100,
        ..SosConfig::default()
    });
    assert_eq!(p.next_deadline_ms(), Some(500));
    p.poll(500, &mut hw, |_| {});
    assert_eq!(p.next_deadline_ms(), Some(600));
}

#[test]
fn torch_held_elsewhere_at_stop_is_released_later() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);
    run_until(&mut p, &mut hw, 1, 100);

    let other_app = hw.claim.clone();
    let held = other_app.try_acquire().unwrap();
    p.stop(&mut hw);
    assert!(hw.torch_on());
    assert!(!hw.screen_on());
    assert!(p.torch_off_pending());
    assert_eq!(p.next_deadline_ms(), Some(100 + TORCH_OFF_RETRY_MS));

    // Still held at the first retry: back off again, nothing else written.
    let screen_before = hw.screen_writes().len();
    p.poll(350, &mut hw, |_| {});
    assert!(hw.torch_on());
    assert_eq!(p.next_deadline_ms(), Some(350 + TORCH_OFF_RETRY_MS));

    drop(held);
    assert_eq!(p.poll(60_000, &mut hw, |_| {}), 0);
    assert!(!hw.torch_on());
    assert!(!p.torch_off_pending());
    assert_eq!(p.next_deadline_ms(), None);
    assert_eq!(hw.screen_writes().len(), screen_before);
    assert!(!p.is_active());
    assert_eq!(p.state(), PlayerState::Idle);
}

#[test]
fn start_clears_pending_torch_release() {
    let mut hw = MockHardware::new();
    let mut p = player(false);
    p.start(0, &mut hw);

    let other_app = hw.claim.clone();
    let held = other_app.try_acquire().unwrap();
    p.stop(&mut hw);
    drop(held);

    p.start(1_000, &mut hw);
    assert!(!p.torch_off_pending());
    assert_eq!(p.next_deadline_ms(), Some(1_500));
}
