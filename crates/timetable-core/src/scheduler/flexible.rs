//! Flexible task packing.
//!
//! Flexible tasks are placed one at a time, most important tier first.
//! Each task tries a first-fit contiguous window; when none exists it is
//! scattered over the earliest free hours instead. A task that still does
//! not fit is left partially placed.

use serde::{Deserialize, Serialize};

use crate::board::{Assignment, SlotBoard, HOURS_PER_DAY};
use crate::task::Task;

/// Outcome of packing one flexible task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub task_id: u64,
    pub title: String,
    pub requested_hours: usize,
    pub placed_hours: usize,
    /// True when the task landed in a single contiguous window.
    pub contiguous: bool,
}

impl Placement {
    pub fn is_complete(&self) -> bool {
        self.placed_hours >= self.requested_hours
    }

    pub fn shortfall(&self) -> usize {
        self.requested_hours.saturating_sub(self.placed_hours)
    }
}

/// Pack flexible tasks into the free hours of `board`.
///
/// Non-flexible tasks in the input are ignored.
pub fn pack_flexible<'a, I>(board: SlotBoard, tasks: I) -> SlotBoard
where
    I: IntoIterator<Item = &'a Task>,
{
    pack_flexible_with_report(board, tasks).0
}

/// Same as [`pack_flexible`], also returning one [`Placement`] per task in
/// packing order.
pub fn pack_flexible_with_report<'a, I>(mut board: SlotBoard, tasks: I) -> (SlotBoard, Vec<Placement>)
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut flexible: Vec<(&Task, usize)> = tasks
        .into_iter()
        .filter(|task| task.kind.is_flexible())
        .map(|task| (task, task.kind.hours()))
        .collect();
    // sort_by_key is stable, so creation order breaks ties within a tier.
    flexible.sort_by_key(|(task, _)| task.priority);

    let mut placements = Vec::with_capacity(flexible.len());
    for (task, duration) in flexible {
        let placement = place_one(&mut board, task, duration);
        if !placement.is_complete() {
            tracing::warn!(
                "flexible task '{}' placed {} of {} hours",
                placement.title,
                placement.placed_hours,
                placement.requested_hours
            );
        }
        placements.push(placement);
    }

    (board, placements)
}

fn place_one(board: &mut SlotBoard, task: &Task, duration: usize) -> Placement {
    let mut placement = Placement {
        task_id: task.id,
        title: task.title.clone(),
        requested_hours: duration,
        placed_hours: 0,
        contiguous: false,
    };

    if let Some(start) = first_fit(board, duration) {
        for hour in start..start + duration {
            board.set(hour, Assignment::flex(task.title.clone(), task.priority));
        }
        tracing::debug!(
            "flexible task '{}' placed contiguously at {}:00-{}:00",
            task.title,
            start,
            start + duration
        );
        placement.placed_hours = duration;
        placement.contiguous = true;
        return placement;
    }

    let mut remaining = duration;
    for hour in 0..HOURS_PER_DAY {
        if remaining == 0 {
            break;
        }
        if board.is_free(hour) {
            board.set(hour, Assignment::flex(task.title.clone(), task.priority));
            remaining -= 1;
        }
    }
    placement.placed_hours = duration - remaining;
    tracing::debug!(
        "flexible task '{}' scattered over {} hours",
        task.title,
        placement.placed_hours
    );
    placement
}

/// Lowest start hour whose `duration`-hour window is entirely free.
fn first_fit(board: &SlotBoard, duration: usize) -> Option<usize> {
    if duration == 0 || duration > HOURS_PER_DAY {
        return None;
    }
    (0..=HOURS_PER_DAY - duration).find(|&start| board.is_range_free(start, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SlotCategory;
    use crate::scheduler::place_fixed;
    use crate::task::{NewTask, Priority, TaskStore};

    #[test]
    fn first_fit_starts_at_midnight_on_empty_board() {
        let mut store = TaskStore::new();
        store.add(NewTask::flexible("Study", Priority::High, 3)).unwrap();

        let board = pack_flexible(SlotBoard::new(), store.flexible());
        assert_eq!(board.hours_for("Study"), vec![0, 1, 2]);
    }

    #[test]
    fn higher_priority_is_packed_first() {
        let mut store = TaskStore::new();
        store.add(NewTask::flexible("Chores", Priority::Low, 2)).unwrap();
        store.add(NewTask::flexible("Study", Priority::High, 2)).unwrap();

        let board = pack_flexible(SlotBoard::new(), store.flexible());
        assert_eq!(board.hours_for("Study"), vec![0, 1]);
        assert_eq!(board.hours_for("Chores"), vec![2, 3]);
    }

    #[test]
    fn ties_keep_creation_order() {
        let mut store = TaskStore::new();
        store.add(NewTask::flexible("First", Priority::Medium, 1)).unwrap();
        store.add(NewTask::flexible("Second", Priority::Medium, 1)).unwrap();
        store.add(NewTask::flexible("Third", Priority::Medium, 1)).unwrap();

        let (board, placements) = pack_flexible_with_report(SlotBoard::new(), store.flexible());
        assert_eq!(board.hours_for("First"), vec![0]);
        assert_eq!(board.hours_for("Second"), vec![1]);
        assert_eq!(board.hours_for("Third"), vec![2]);
        let order: Vec<_> = placements.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(order, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn skips_windows_blocked_by_fixed_work() {
        let mut store = TaskStore::new();
        store.add(NewTask::fixed("Class", Priority::High, 1, 2)).unwrap();
        store.add(NewTask::flexible("Study", Priority::High, 2)).unwrap();

        let board = place_fixed(store.fixed());
        let board = pack_flexible(board, store.flexible());
        assert_eq!(board.hours_for("Study"), vec![2, 3]);
        assert_eq!(board.hours_for("Class"), vec![1]);
    }

    #[test]
    fn scatters_when_no_window_fits() {
        let mut store = TaskStore::new();
        // Every free run is at most two hours long.
        for (start, end) in [(1, 2), (3, 4), (6, 7), (9, 10), (12, 13), (15, 16), (18, 19), (21, 22)] {
            store.add(NewTask::fixed("Busy", Priority::High, start, end)).unwrap();
        }
        store.add(NewTask::flexible("Reading", Priority::Low, 3)).unwrap();

        let board = place_fixed(store.fixed());
        let (board, placements) = pack_flexible_with_report(board, store.flexible());
        assert_eq!(board.hours_for("Reading"), vec![0, 2, 4]);
        assert!(!placements[0].contiguous);
        assert!(placements[0].is_complete());
    }

    #[test]
    fn reports_partial_placement_when_day_is_full() {
        let mut store = TaskStore::new();
        store.add(NewTask::fixed("Work", Priority::High, 0, 22)).unwrap();
        store.add(NewTask::flexible("Gym", Priority::Medium, 4)).unwrap();

        let board = place_fixed(store.fixed());
        let (board, placements) = pack_flexible_with_report(board, store.flexible());
        assert_eq!(board.hours_for("Gym"), vec![22, 23]);
        assert_eq!(placements[0].placed_hours, 2);
        assert_eq!(placements[0].shortfall(), 2);
        assert!(!placements[0].is_complete());
        assert_eq!(board.count(SlotCategory::Fixed), 22);
    }

    #[test]
    fn full_day_task_fills_every_hour() {
        let mut store = TaskStore::new();
        store.add(NewTask::flexible("Marathon", Priority::High, 24)).unwrap();

        let board = pack_flexible(SlotBoard::new(), store.flexible());
        assert_eq!(board.free_hours(), 0);
    }
}
