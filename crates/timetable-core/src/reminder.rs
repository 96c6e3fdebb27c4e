//! Time-of-day reminders.
//!
//! A reminder fires once when the wall clock reaches its minute. Which
//! reminders already fired is tracked in an explicit set keyed by reminder
//! id; rescheduling or reopening a reminder clears its entry.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;

/// A single reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    pub id: u64,
    pub text: String,
    /// Time of day, minute precision.
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub done: bool,
}

/// Reminders plus the set of ids that already notified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderBook {
    reminders: Vec<Reminder>,
    #[serde(default)]
    notified: BTreeSet<u64>,
    #[serde(default)]
    next_id: u64,
}

/// Parse `HH:MM` into a time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| ValidationError::InvalidValue {
        field: "time".to_string(),
        message: format!("'{value}' is not HH:MM ({e})"),
    })
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

impl ReminderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str, time: NaiveTime) -> Result<&Reminder, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "text".to_string(),
                message: "reminder text must not be empty".to_string(),
            });
        }
        let floor = self.reminders.iter().map(|r| r.id + 1).max().unwrap_or(1);
        let id = self.next_id.max(floor);
        self.next_id = id + 1;

        self.reminders.push(Reminder {
            id,
            text: text.to_string(),
            time: truncate_to_minute(time),
            done: false,
        });
        Ok(&self.reminders[self.reminders.len() - 1])
    }

    pub fn remove(&mut self, id: u64) -> Option<Reminder> {
        let index = self.reminders.iter().position(|r| r.id == id)?;
        self.notified.remove(&id);
        Some(self.reminders.remove(index))
    }

    /// Flip the done flag. Reopening a reminder lets it notify again.
    pub fn toggle_done(&mut self, id: u64) -> Option<bool> {
        let reminder = self.reminders.iter_mut().find(|r| r.id == id)?;
        reminder.done = !reminder.done;
        if !reminder.done {
            self.notified.remove(&id);
        }
        Some(reminder.done)
    }

    /// Move a reminder to a new time and forget that it already fired.
    pub fn reschedule(&mut self, id: u64, time: NaiveTime) -> Option<&Reminder> {
        let reminder = self.reminders.iter_mut().find(|r| r.id == id)?;
        reminder.time = truncate_to_minute(time);
        self.notified.remove(&id);
        Some(reminder)
    }

    pub fn get(&self, id: u64) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn is_notified(&self, id: u64) -> bool {
        self.notified.contains(&id)
    }

    /// Reminders whose minute matches `now`, not done, not yet notified.
    pub fn due(&self, now: NaiveTime) -> Vec<&Reminder> {
        let now = truncate_to_minute(now);
        self.reminders
            .iter()
            .filter(|r| r.time == now && !r.done && !self.notified.contains(&r.id))
            .collect()
    }

    pub fn mark_notified(&mut self, id: u64) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.notified.insert(id)
    }

    /// Collect due reminders and mark them notified in one step.
    pub fn take_due(&mut self, now: NaiveTime) -> Vec<Reminder> {
        let due: Vec<Reminder> = self.due(now).into_iter().cloned().collect();
        for reminder in &due {
            self.notified.insert(reminder.id);
        }
        due
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
