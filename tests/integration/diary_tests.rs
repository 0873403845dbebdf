//! Diary commands through the service, with persistence.

use chrono::{DateTime, TimeZone, Utc};

use sos_light::app::commands::AppCommand;
use sos_light::app::events::AppEvent;
use sos_light::app::ports::DiaryPort;
use sos_light::app::service::SosService;
use sos_light::config::SosConfig;
use sos_light::diary::{EXPORT_HEADER, Priority};
use sos_light::error::{DiaryError, Error};

use crate::mock_hw::{MockHardware, MockSettings, VecSink};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 2, h, m, 0).unwrap()
}

fn note(h: u32, m: u32, text: &str, priority: Priority) -> AppCommand {
    AppCommand::AddDiaryEntry {
        at: at(h, m),
        text: text.to_string(),
        priority,
    }
}

#[test]
fn add_remove_export() {
    let mut svc = SosService::new(SosConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = VecSink::new();

    svc.handle_command(note(15, 4, "Twisted ankle", Priority::High), 0, &mut hw, &mut sink);
    svc.handle_command(note(15, 30, "Signal seen", Priority::Low), 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::RemoveDiaryEntry(1), 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::ExportDiary, 0, &mut hw, &mut sink);

    assert_eq!(
        sink.events,
        vec![
            AppEvent::DiaryEntryAdded { id: 0, priority: Priority::High },
            AppEvent::DiaryEntryAdded { id: 1, priority: Priority::Low },
            AppEvent::DiaryEntryRemoved(1),
            AppEvent::DiaryExported(format!(
                "{EXPORT_HEADER}\n\nDec 2, 2024 at 3:04 PM - Twisted ankle - Priority Level: High"
            )),
        ]
    );
    // Diary work never touches the light sinks.
    assert!(hw.calls.is_empty());
}

#[test]
fn rejected_edits_do_not_dirty() {
    let mut svc = SosService::new(SosConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = VecSink::new();

    svc.handle_command(note(9, 0, "  ", Priority::Low), 0, &mut hw, &mut sink);
    svc.handle_command(AppCommand::RemoveDiaryEntry(7), 0, &mut hw, &mut sink);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CommandFailed(Error::Diary(DiaryError::EmptyText)),
            AppEvent::CommandFailed(Error::Diary(DiaryError::NotFound(7))),
        ]
    );
    assert!(!svc.is_diary_dirty());
    assert!(svc.diary().is_empty());
}

#[test]
fn diary_survives_restart() {
    let store = MockSettings::new();
    let mut svc = SosService::new(SosConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = VecSink::new();

    svc.handle_command(note(8, 0, "Left camp", Priority::Medium), 0, &mut hw, &mut sink);
    assert!(svc.force_save_diary_if_dirty(&store));
    assert!(!svc.force_save_diary_if_dirty(&store));
    assert_eq!(store.diary_saves.get(), 1);

    let restored = SosService::with_diary(SosConfig::default(), store.load_diary().unwrap());
    assert_eq!(restored.diary(), svc.diary());

    // Ids keep counting after a restore.
    let mut restored = restored;
    restored.handle_command(note(9, 0, "Back", Priority::Low), 0, &mut hw, &mut sink);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::DiaryEntryAdded { id: 1, priority: Priority::Low })
    );
}

#[test]
fn failed_diary_save_stays_dirty() {
    let store = MockSettings {
        fail_saves: true,
        ..MockSettings::new()
    };
    let mut svc = SosService::new(SosConfig::default());
    svc.handle_command(
        note(8, 0, "Left camp", Priority::Low),
        0,
        &mut MockHardware::new(),
        &mut VecSink::new(),
    );
    assert!(!svc.force_save_diary_if_dirty(&store));
    assert!(svc.is_diary_dirty());
}
