//! The 24-hour slot board.
//!
//! A day is divided into [`HOURS_PER_DAY`] one-hour cells indexed by
//! hour-of-day. Each cell is either free (`None`) or holds an
//! [`Assignment`]. The board never changes length and never reorders.

use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// Number of one-hour slots in a day.
pub const HOURS_PER_DAY: usize = 24;

/// Label used for hours reserved for sleep.
pub const SLEEP_TITLE: &str = "Sleep";

/// What kind of work occupies a slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Fixed,
    Flex,
    Sleep,
}

/// An occupied slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub title: String,
    #[serde(rename = "type")]
    pub category: SlotCategory,
    /// Present for fixed and flex work, absent for sleep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Assignment {
    pub fn fixed(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            category: SlotCategory::Fixed,
            priority: Some(priority),
        }
    }

    pub fn flex(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            category: SlotCategory::Flex,
            priority: Some(priority),
        }
    }

    pub fn sleep() -> Self {
        Self {
            title: SLEEP_TITLE.to_string(),
            category: SlotCategory::Sleep,
            priority: None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.category == SlotCategory::Fixed
    }

    pub fn is_flex(&self) -> bool {
        self.category == SlotCategory::Flex
    }

    pub fn is_sleep(&self) -> bool {
        self.category == SlotCategory::Sleep
    }
}

/// One cell of the board; `None` means free.
pub type SlotCell = Option<Assignment>;

/// Fixed-size array of hourly cells.
///
/// Serialized as a plain JSON array of 24 nullable cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SlotBoard {
    cells: [SlotCell; HOURS_PER_DAY],
}

impl SlotBoard {
    /// An entirely free day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at `hour`; out-of-range hours read as free.
    pub fn get(&self, hour: usize) -> Option<&Assignment> {
        self.cells.get(hour).and_then(Option::as_ref)
    }

    /// Occupy `hour`. Out-of-range hours are ignored.
    pub fn set(&mut self, hour: usize, assignment: Assignment) {
        if let Some(cell) = self.cells.get_mut(hour) {
            *cell = Some(assignment);
        }
    }

    /// Free `hour`, returning what was there.
    pub fn clear(&mut self, hour: usize) -> Option<Assignment> {
        self.cells.get_mut(hour).and_then(Option::take)
    }

    pub fn clear_all(&mut self) {
        self.cells = Default::default();
    }

    pub fn is_free(&self, hour: usize) -> bool {
        hour < HOURS_PER_DAY && self.cells[hour].is_none()
    }

    /// True when every hour in `[start, start + len)` is free and in range.
    pub fn is_range_free(&self, start: usize, len: usize) -> bool {
        start + len <= HOURS_PER_DAY && (start..start + len).all(|h| self.cells[h].is_none())
    }

    pub fn cells(&self) -> &[SlotCell; HOURS_PER_DAY] {
        &self.cells
    }

    /// `(hour, cell)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&Assignment>)> {
        self.cells.iter().enumerate().map(|(h, c)| (h, c.as_ref()))
    }

    pub fn free_hours(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn count(&self, category: SlotCategory) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|a| a.category == category)
            .count()
    }

    /// Hours whose label equals `title`, ascending.
    pub fn hours_for(&self, title: &str) -> Vec<usize> {
        self.iter()
            .filter(|(_, c)| c.is_some_and(|a| a.title == title))
            .map(|(h, _)| h)
            .collect()
    }
}
