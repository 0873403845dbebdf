//! Line-oriented console front end.
//!
//! Stands in for the on-screen controls on a host build: each stdin line
//! maps to one [`AppCommand`].
//!
//! | Line                 | Command          |
//! |----------------------|------------------|
//! | `start` / `stop`     | Start / Stop     |
//! | `toggle`             | Toggle           |
//! | `sound on\|off`      | SetSoundEnabled  |
//! | `save`               | SaveConfig       |
//! | `pos <lat> <lon>`    | UpdatePosition   |
//! | `heading <deg>`      | UpdateHeading    |
//! | `mark`               | SaveWaypoint     |
//! | `lock` / `unlock`    | LockWaypoint     |
//! | `note <prio> <text>` | AddDiaryEntry    |
//! | `forget <id>`        | RemoveDiaryEntry |
//! | `export`             | ExportDiary      |
//! | `quit` / `exit`      | Shutdown         |

use chrono::{DateTime, Utc};

use crate::app::commands::AppCommand;
use crate::nav::Coordinate;

/// Parse one console line, stamping diary notes with the current time.
pub fn parse_command(line: &str) -> Option<AppCommand> {
    parse_command_at(line, Utc::now())
}

/// Parse one console line.  Blank, unknown or malformed input yields
/// `None`; a stray Enter never changes the signal.
pub fn parse_command_at(line: &str, now: DateTime<Utc>) -> Option<AppCommand> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "start" | "sos" => AppCommand::Start,
        "stop" => AppCommand::Stop,
        "toggle" => AppCommand::Toggle,
        "sound" => match words.next()? {
            "on" => AppCommand::SetSoundEnabled(true),
            "off" => AppCommand::SetSoundEnabled(false),
            _ => return None,
        },
        "save" => AppCommand::SaveConfig,
        "pos" => {
            let lat = words.next()?.trim_end_matches(',').parse().ok()?;
            let lon = words.next()?.parse().ok()?;
            AppCommand::UpdatePosition(Coordinate::new(lat, lon).ok()?)
        }
        "heading" => {
            let deg: f64 = words.next()?.parse().ok()?;
            if !deg.is_finite() {
                return None;
            }
            AppCommand::UpdateHeading(deg)
        }
        "mark" => AppCommand::SaveWaypoint,
        "lock" => AppCommand::LockWaypoint(true),
        "unlock" => AppCommand::LockWaypoint(false),
        "note" => {
            let priority = words.next()?.parse().ok()?;
            let text = words.collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            return Some(AppCommand::AddDiaryEntry {
                at: now,
                text,
                priority,
            });
        }
        "forget" => {
            let id = words.next()?.trim_start_matches('#').parse().ok()?;
            AppCommand::RemoveDiaryEntry(id)
        }
        "export" => AppCommand::ExportDiary,
        "quit" | "exit" => AppCommand::Shutdown,
        _ => return None,
    };

    // Trailing junk makes the whole line invalid.
    if words.next().is_some() {
        return None;
    }
    Some(cmd)
}
