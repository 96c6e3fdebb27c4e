//! Task types for the daily timetable.
//!
//! A task is either fixed (bound to an exact hour range) or flexible
//! (only a requested duration). Tasks are immutable once created; the
//! only lifecycle operation after creation is deletion.

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::board::HOURS_PER_DAY;
use crate::error::ValidationError;

pub use store::TaskStore;

/// Priority tier of a task.
///
/// Ordering is explicit: `High < Medium < Low`, so sorting ascending yields
/// the most important work first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All tiers, most important first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Tiers in the order work gets sacrificed (least important first).
    pub const EVICTION_ORDER: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Rank used for ordering; lower rank is placed first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::High
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" | "med" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority".to_string(),
                message: format!("'{other}' is not one of high, medium, low"),
            }),
        }
    }
}

/// Scheduling semantics of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// Occupies exactly `[start_hour, end_hour)`.
    Fixed { start_hour: u8, end_hour: u8 },
    /// Needs `duration` hours wherever the packer finds room.
    Flexible { duration: u8 },
}

impl TaskKind {
    pub fn is_fixed(&self) -> bool {
        matches!(self, TaskKind::Fixed { .. })
    }

    pub fn is_flexible(&self) -> bool {
        matches!(self, TaskKind::Flexible { .. })
    }

    /// Number of hours this task asks for.
    pub fn hours(&self) -> usize {
        match *self {
            TaskKind::Fixed { start_hour, end_hour } => {
                usize::from(end_hour.saturating_sub(start_hour))
            }
            TaskKind::Flexible { duration } => usize::from(duration),
        }
    }
}

/// A user-declared task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Monotonic id assigned in creation order.
    pub id: u64,
    pub title: String,
    pub priority: Priority,
    #[serde(flatten)]
    pub kind: TaskKind,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_fixed(&self) -> bool {
        self.kind.is_fixed()
    }

    pub fn is_flexible(&self) -> bool {
        self.kind.is_flexible()
    }
}

/// Unvalidated input for [`TaskStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub kind: TaskKind,
}

impl NewTask {
    pub fn fixed(title: impl Into<String>, priority: Priority, start_hour: u8, end_hour: u8) -> Self {
        Self {
            title: title.into(),
            priority,
            kind: TaskKind::Fixed { start_hour, end_hour },
        }
    }

    pub fn flexible(title: impl Into<String>, priority: Priority, duration: u8) -> Self {
        Self {
            title: title.into(),
            priority,
            kind: TaskKind::Flexible { duration },
        }
    }

    /// Check the creation-boundary rules. The scheduler never re-validates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        match self.kind {
            TaskKind::Flexible { duration } => {
                if duration == 0 || usize::from(duration) > HOURS_PER_DAY {
                    return Err(ValidationError::InvalidDuration(u32::from(duration)));
                }
            }
            TaskKind::Fixed { start_hour, end_hour } => {
                if start_hour >= end_hour || usize::from(end_hour) > HOURS_PER_DAY {
                    return Err(ValidationError::InvalidTimeRange {
                        start: u32::from(start_hour),
                        end: u32::from(end_hour),
                    });
                }
            }
        }
        Ok(())
    }
}
