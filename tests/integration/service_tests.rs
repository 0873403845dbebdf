//! SosService command handling against mock adapters.

use sos_light::app::commands::AppCommand;
use sos_light::app::events::AppEvent;
use sos_light::app::service::SosService;
use sos_light::config::SosConfig;
use sos_light::error::{Error, NavError};
use sos_light::nav::Coordinate;
use sos_light::signal::PlayerState;

use crate::mock_hw::{MockHardware, MockSettings, VecSink};

fn setup() -> (SosService, MockHardware, VecSink) {
    (
        SosService::new(SosConfig::default()),
        MockHardware::new(),
        VecSink::new(),
    )
}

#[test]
fn starts_inactive_and_dark() {
    let (svc, hw, _) = setup();
    assert!(!svc.is_active());
    assert_eq!(svc.player_state(), PlayerState::Idle);
    assert_eq!(svc.next_deadline_ms(), None);
    assert!(hw.calls.is_empty());
}

#[test]
fn start_command_lights_immediately() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(AppCommand::Start, 0, &mut hw, &mut sink);
    assert!(hw.torch_on());
    assert!(hw.screen_on());
    assert_eq!(sink.events, vec![AppEvent::Activated { restarted: false }]);
    assert_eq!(svc.next_deadline_ms(), Some(500));
}

#[test]
fn second_start_reports_restart() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(AppCommand::Start, 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::Start, 900, &mut hw, &mut sink);
    assert_eq!(sink.events[1], AppEvent::Activated { restarted: true });
    assert_eq!(svc.next_deadline_ms(), Some(1_400));
}

#[test]
fn stop_when_idle_emits_nothing() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(AppCommand::Stop, 0, &mut hw, &mut sink);
    assert!(sink.events.is_empty());
    assert!(!hw.torch_on());
}

#[test]
fn poll_reports_completed_cycles() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(AppCommand::Start, 0, &mut hw, &mut sink);
    for now in (500..=27_000).step_by(500) {
        svc.poll(now, &mut hw, &mut sink);
    }
    let cycles: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CycleCompleted { cycles } => Some(*cycles),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, vec![1, 2]);
    // 23 + exhaustion + restart + 23 + exhaustion
    assert_eq!(svc.tick_count(), 49);
}

#[test]
fn sound_toggle_takes_effect_on_next_lit_slot() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(AppCommand::Start, 0, &mut hw, &mut sink);
    assert_eq!(hw.pulses(), 0);

    svc.handle_command(AppCommand::SetSoundEnabled(true), 100, &mut hw, &mut sink);
    svc.poll(1_000, &mut hw, &mut sink);
    assert_eq!(hw.pulses(), 1);
    assert!(svc.current_config().sound_enabled);
    assert!(svc.is_config_dirty());
    assert!(sink.events.contains(&AppEvent::ConfigChanged { sound_enabled: true }));
}

#[test]
fn dirty_settings_are_saved_once() {
    let (mut svc, mut hw, mut sink) = setup();
    let store = MockSettings::new();

    assert!(!svc.force_save_if_dirty(&store));
    svc.handle_command(AppCommand::SetSoundEnabled(true), 0, &mut hw, &mut sink);
    assert!(svc.force_save_if_dirty(&store));
    assert!(!svc.force_save_if_dirty(&store));
    assert_eq!(store.saves.get(), 1);
    assert!(store.stored.borrow().as_ref().is_some_and(|c| c.sound_enabled));
}

#[test]
fn failed_save_stays_dirty() {
    let (mut svc, mut hw, mut sink) = setup();
    let store = MockSettings {
        fail_saves: true,
        ..MockSettings::new()
    };
    svc.handle_command(AppCommand::SaveConfig, 0, &mut hw, &mut sink);
    assert!(!svc.force_save_if_dirty(&store));
    assert!(svc.is_config_dirty());
}

#[test]
fn shutdown_stops_signal() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(AppCommand::Start, 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::Shutdown, 10, &mut hw, &mut sink);
    assert!(!svc.is_active());
    assert!(!hw.torch_on());
    assert_eq!(sink.events.last(), Some(&AppEvent::Deactivated));
}

#[test]
fn waypoint_flow_emits_guidance() {
    let (mut svc, mut hw, mut sink) = setup();
    let camp = Coordinate::new(0.0, 0.01).unwrap();
    let here = Coordinate::new(0.0, 0.0).unwrap();

    svc.handle_command(AppCommand::SaveWaypoint, 0, &mut hw, &mut sink);
    assert_eq!(
        sink.events[0],
        AppEvent::CommandFailed(Error::Nav(NavError::NoFix))
    );

    svc.handle_command(AppCommand::UpdatePosition(camp), 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::SaveWaypoint, 0, &mut hw, &mut sink);
    assert_eq!(sink.events.last(), Some(&AppEvent::WaypointSaved(camp)));

    svc.handle_command(AppCommand::UpdatePosition(here), 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::UpdateHeading(90.0), 0, &mut hw, &mut sink);
    let Some(AppEvent::Guidance(g)) = sink.events.last() else {
        panic!("expected guidance, got {:?}", sink.events.last());
    };
    assert!((g.bearing_deg - 90.0).abs() < 1e-6);
    assert!(g.arrow_deg.is_some_and(|a| a.abs() < 1e-6));
    assert!((g.distance_m - 1_112.0).abs() < 1.0);

    // Navigation never touches the light sinks.
    assert!(hw.calls.is_empty());
}

#[test]
fn locked_waypoint_rejects_save() {
    let (mut svc, mut hw, mut sink) = setup();
    svc.handle_command(
        AppCommand::UpdatePosition(Coordinate::new(1.0, 1.0).unwrap()),
        0,
        &mut hw,
        &mut sink,
    );
    svc.handle_command(AppCommand::LockWaypoint(true), 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::SaveWaypoint, 0, &mut hw, &mut sink);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::CommandFailed(Error::Nav(NavError::Locked)))
    );
    assert!(svc.tracker().waypoint().is_none());
}
