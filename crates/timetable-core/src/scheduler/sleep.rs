//! Sleep insertion.
//!
//! Reserves enough hours for a minimum number of 90-minute sleep cycles.
//! Hours are taken in four phases, stopping as soon as the quota is met:
//!
//! 1. free hours inside the night window,
//! 2. flex hours inside the night window, evicting low before medium before high,
//! 3. free hours outside the night window,
//! 4. flex hours outside the night window, same tier order.
//!
//! Fixed hours are never touched. Hours already labelled as sleep count
//! toward the quota, so rerunning with the same target adds nothing.

use serde::{Deserialize, Serialize};

use crate::board::{Assignment, SlotBoard, SlotCategory, HOURS_PER_DAY};
use crate::error::ValidationError;
use crate::task::Priority;

/// Length of one sleep cycle.
pub const CYCLE_MINUTES: usize = 90;

/// Sleep target and preferred night window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepConfig {
    /// Minimum number of 90-minute cycles to reserve.
    pub min_cycles: u32,
    /// First hour of the night window (0-23).
    pub night_start: u8,
    /// Hour the night window ends, exclusive (0-23). Wraps past midnight
    /// when `night_start >= night_end`.
    pub night_end: u8,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            min_cycles: 4,
            night_start: 22,
            night_end: 7,
        }
    }
}

impl SleepConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_cycles < 1 {
            return Err(ValidationError::InvalidValue {
                field: "min_cycles".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        for hour in [self.night_start, self.night_end] {
            if usize::from(hour) >= HOURS_PER_DAY {
                return Err(ValidationError::HourOutOfRange(u32::from(hour)));
            }
        }
        Ok(())
    }

    pub fn required_hours(&self) -> usize {
        required_hours(self.min_cycles)
    }

    /// Night hours in window order (wrapping past midnight when needed).
    pub fn night_indices(&self) -> Vec<usize> {
        night_indices(self.night_start, self.night_end)
    }
}

/// Hours needed for `cycles` sleep cycles, rounded up.
pub fn required_hours(cycles: u32) -> usize {
    let minutes = cycles as usize * CYCLE_MINUTES;
    minutes.div_ceil(60)
}

/// Build the ordered hour list for a night window.
///
/// `start < end` yields `[start, end)`; otherwise the window wraps and
/// yields `[start, 24)` followed by `[0, end)`.
pub fn night_indices(night_start: u8, night_end: u8) -> Vec<usize> {
    let start = usize::from(night_start).min(HOURS_PER_DAY);
    let end = usize::from(night_end).min(HOURS_PER_DAY);
    if start < end {
        (start..end).collect()
    } else {
        (start..HOURS_PER_DAY).chain(0..end).collect()
    }
}

/// Diagnostics for one sleep insertion run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SleepReport {
    /// Hours the requested cycle count needs.
    pub required_hours: usize,
    /// Hours still missing after all four phases.
    pub remaining: usize,
    /// Whether the board holds any sleep hour after the run.
    pub any_sleep_inserted: bool,
    /// Hours this run added.
    pub inserted_hours: usize,
}

impl SleepReport {
    pub fn is_satisfied(&self) -> bool {
        self.remaining == 0
    }
}

/// Reserve sleep hours on `board` according to `config`.
pub fn insert_sleep(mut board: SlotBoard, config: &SleepConfig) -> (SlotBoard, SleepReport) {
    let required = config.required_hours();
    let already = board.count(SlotCategory::Sleep);
    let mut remaining = required.saturating_sub(already);
    let start_remaining = remaining;
    tracing::debug!(
        "sleep: requested {} cycles, {} hours required, {} already reserved",
        config.min_cycles,
        required,
        already
    );

    let night = config.night_indices();
    let other: Vec<usize> = (0..HOURS_PER_DAY).filter(|h| !night.contains(h)).collect();
    tracing::debug!("sleep: night indices {:?}", night);

    fill_free(&mut board, &night, &mut remaining);
    tracing::debug!("sleep: after filling free night hours, remaining {}", remaining);

    evict_flex(&mut board, &night, &mut remaining);
    tracing::debug!("sleep: after evicting night flex, remaining {}", remaining);

    fill_free(&mut board, &other, &mut remaining);
    tracing::debug!("sleep: after filling free other hours, remaining {}", remaining);

    evict_flex(&mut board, &other, &mut remaining);
    tracing::debug!("sleep: after evicting other flex, remaining {}", remaining);

    if remaining > 0 {
        tracing::warn!(
            "sleep quota short by {} of {} hours",
            remaining,
            required
        );
    }

    let report = SleepReport {
        required_hours: required,
        remaining,
        any_sleep_inserted: board.count(SlotCategory::Sleep) > 0,
        inserted_hours: start_remaining - remaining,
    };
    (board, report)
}

fn fill_free(board: &mut SlotBoard, hours: &[usize], remaining: &mut usize) {
    for &hour in hours {
        if *remaining == 0 {
            return;
        }
        if board.is_free(hour) {
            board.set(hour, Assignment::sleep());
            *remaining -= 1;
        }
    }
}

fn evict_flex(board: &mut SlotBoard, hours: &[usize], remaining: &mut usize) {
    for tier in Priority::EVICTION_ORDER {
        for &hour in hours {
            if *remaining == 0 {
                return;
            }
            let evictable = board
                .get(hour)
                .is_some_and(|a| a.is_flex() && a.priority == Some(tier));
            if evictable {
                if let Some(evicted) = board.get(hour) {
                    tracing::debug!("sleep: evicting '{}' ({}) at {}:00", evicted.title, tier, hour);
                }
                board.set(hour, Assignment::sleep());
                *remaining -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_cycles: u32, night_start: u8, night_end: u8) -> SleepConfig {
        SleepConfig {
            min_cycles,
            night_start,
            night_end,
        }
    }

    #[test]
    fn required_hours_rounds_up() {
        assert_eq!(required_hours(1), 2);
        assert_eq!(required_hours(2), 3);
        assert_eq!(required_hours(4), 6);
        assert_eq!(required_hours(5), 8);
    }

    #[test]
    fn night_indices_handle_plain_and_wrapping_windows() {
        assert_eq!(night_indices(1, 5), vec![1, 2, 3, 4]);
        assert_eq!(night_indices(22, 2), vec![22, 23, 0, 1]);
        assert_eq!(night_indices(5, 5).len(), HOURS_PER_DAY);
    }

    #[test]
    fn fills_free_night_hours_in_window_order() {
        let (board, report) = insert_sleep(SlotBoard::new(), &config(4, 22, 7));
        assert_eq!(board.hours_for("Sleep"), vec![0, 1, 2, 3, 22, 23]);
        assert_eq!(report.required_hours, 6);
        assert_eq!(report.remaining, 0);
        assert_eq!(report.inserted_hours, 6);
        assert!(report.any_sleep_inserted);
    }

    #[test]
    fn evicts_low_priority_flex_before_high() {
        let mut board = SlotBoard::new();
        board.set(1, Assignment::flex("Essay", Priority::High));
        board.set(2, Assignment::flex("Games", Priority::Low));
        board.set(3, Assignment::flex("Email", Priority::Medium));

        let (board, report) = insert_sleep(board, &config(1, 1, 4));
        assert_eq!(board.hours_for("Sleep"), vec![2, 3]);
        assert_eq!(board.hours_for("Essay"), vec![1]);
        assert!(report.is_satisfied());
    }

    #[test]
    fn prefers_free_outside_hours_over_evicting_outside_flex() {
        let mut board = SlotBoard::new();
        board.set(0, Assignment::fixed("Shift", Priority::High));
        board.set(1, Assignment::flex("Reading", Priority::Low));

        let (board, report) = insert_sleep(board, &config(1, 0, 1));
        assert_eq!(board.get(0).unwrap().title, "Shift");
        assert_eq!(board.hours_for("Reading"), vec![1]);
        assert_eq!(board.hours_for("Sleep"), vec![2, 3]);
        assert_eq!(report.remaining, 0);
    }

    #[test]
    fn evicts_daytime_flex_lowest_tier_first_when_night_is_full() {
        let mut board = SlotBoard::new();
        for hour in 0..HOURS_PER_DAY {
            board.set(hour, Assignment::fixed("Duty", Priority::Low));
        }
        board.set(10, Assignment::flex("Hi", Priority::High));
        board.set(12, Assignment::flex("Lo", Priority::Low));
        board.set(14, Assignment::flex("Mid", Priority::Medium));
        board.set(23, Assignment::flex("Late", Priority::High));

        let (board, report) = insert_sleep(board, &config(2, 22, 7));
        assert_eq!(board.hours_for("Sleep"), vec![12, 14, 23]);
        assert_eq!(board.get(10).unwrap().title, "Hi");
        assert_eq!(board.count(SlotCategory::Fixed), HOURS_PER_DAY - 4);
        assert_eq!(report.required_hours, 3);
        assert_eq!(report.remaining, 0);
        assert_eq!(report.inserted_hours, 3);
    }

    #[test]
    fn never_evicts_fixed_and_reports_shortfall() {
        let mut board = SlotBoard::new();
        for hour in 0..HOURS_PER_DAY {
            board.set(hour, Assignment::fixed("Duty", Priority::Low));
        }

        let (after, report) = insert_sleep(board.clone(), &config(1, 22, 7));
        assert_eq!(after, board);
        assert_eq!(report.required_hours, 2);
        assert_eq!(report.remaining, 2);
        assert!(!report.any_sleep_inserted);
        assert_eq!(report.inserted_hours, 0);
    }

    #[test]
    fn rerun_with_same_target_adds_nothing() {
        let cfg = config(3, 23, 6);
        let (once, _) = insert_sleep(SlotBoard::new(), &cfg);
        let (twice, report) = insert_sleep(once.clone(), &cfg);
        assert_eq!(once, twice);
        assert_eq!(report.inserted_hours, 0);
        assert!(report.any_sleep_inserted);
    }

    #[test]
    fn larger_target_only_adds_sleep() {
        let (small, _) = insert_sleep(SlotBoard::new(), &config(1, 22, 7));
        let (large, report) = insert_sleep(small.clone(), &config(4, 22, 7));
        for hour in small.hours_for("Sleep") {
            assert!(large.get(hour).unwrap().is_sleep());
        }
        assert_eq!(large.count(SlotCategory::Sleep), 6);
        assert_eq!(report.inserted_hours, 4);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(config(0, 22, 7).validate().is_err());
        assert!(config(4, 24, 7).validate().is_err());
        assert!(config(4, 22, 7).validate().is_ok());
    }
}
