//! Situation diary.
//!
//! Short dated notes with a priority level, kept next to the signal so a
//! user can log what happened and where (coordinates can be pasted from
//! the compass readout).  The whole diary exports as plain text for
//! sharing:
//!
//! ```text
//! Export From SOS Diary
//!
//! Dec 2, 2024 at 3:04 PM - Twisted ankle at -6.200000, 106.816666 - Priority Level: High
//! Dec 2, 2024 at 3:30 PM - Torch battery low - Priority Level: Medium
//! ```

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::DiaryError;

/// First line of every export.
pub const EXPORT_HEADER: &str = "Export From SOS Diary";

/// Date rendering for exports, e.g. `Dec 2, 2024 at 3:04 PM`.
const EXPORT_DATE_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = DiaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DiaryError::UnknownPriority),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: u32,
    pub date: DateTime<Utc>,
    pub text: String,
    pub priority: Priority,
}

impl DiaryEntry {
    /// `<date> - <text> - Priority Level: <level>`
    pub fn export_line(&self) -> String {
        format!(
            "{} - {} - Priority Level: {}",
            self.date.format(EXPORT_DATE_FORMAT),
            self.text,
            self.priority
        )
    }
}

/// Entries in insertion order.  Ids are never reused, even after removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diary {
    entries: Vec<DiaryEntry>,
    next_id: u32,
}

impl Diary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.  Blank text is rejected; surrounding whitespace is
    /// trimmed.
    pub fn add(
        &mut self,
        date: DateTime<Utc>,
        text: &str,
        priority: Priority,
    ) -> Result<&DiaryEntry, DiaryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DiaryError::EmptyText);
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(DiaryEntry {
            id,
            date,
            text: text.to_string(),
            priority,
        });
        info!("Diary: entry #{} added ({})", id, priority);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn remove(&mut self, id: u32) -> Result<DiaryEntry, DiaryError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(DiaryError::NotFound(id))?;
        info!("Diary: entry #{} removed", id);
        Ok(self.entries.remove(pos))
    }

    pub fn get(&self, id: u32) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header, blank line, then one line per entry in insertion order.
    pub fn export(&self) -> String {
        let lines: Vec<String> = self.entries.iter().map(DiaryEntry::export_line).collect();
        format!("{}\n\n{}", EXPORT_HEADER, lines.join("\n"))
    }
}
