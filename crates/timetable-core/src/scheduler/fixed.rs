//! Fixed task placement.

use crate::board::{Assignment, SlotBoard, HOURS_PER_DAY};
use crate::task::{Task, TaskKind};

/// Stamp every fixed task onto a fresh board.
///
/// Hours are taken verbatim from `[start_hour, end_hour)` and clipped to the
/// day. On overlap the later task in iteration order wins. Flexible tasks
/// in the input are ignored.
pub fn place_fixed<'a, I>(tasks: I) -> SlotBoard
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut board = SlotBoard::new();
    let mut stamped = 0usize;

    for task in tasks {
        let TaskKind::Fixed { start_hour, end_hour } = task.kind else {
            continue;
        };
        let end = usize::from(end_hour).min(HOURS_PER_DAY);
        for hour in usize::from(start_hour)..end {
            if let Some(previous) = board.get(hour) {
                tracing::debug!(
                    "fixed task '{}' overwrites '{}' at {}:00",
                    task.title,
                    previous.title,
                    hour
                );
            }
            board.set(hour, Assignment::fixed(task.title.clone(), task.priority));
            stamped += 1;
        }
    }

    tracing::debug!("fixed placement stamped {} hours", stamped);
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SlotCategory;
    use crate::task::{NewTask, Priority, TaskStore};

    #[test]
    fn stamps_declared_interval() {
        let mut store = TaskStore::new();
        store.add(NewTask::fixed("Class", Priority::High, 9, 11)).unwrap();

        let board = place_fixed(store.fixed());
        assert_eq!(board.hours_for("Class"), vec![9, 10]);
        assert_eq!(board.count(SlotCategory::Fixed), 2);
        assert_eq!(board.get(9).unwrap().priority, Some(Priority::High));
    }

    #[test]
    fn later_task_wins_on_overlap() {
        let mut store = TaskStore::new();
        store.add(NewTask::fixed("Early", Priority::Low, 8, 11)).unwrap();
        store.add(NewTask::fixed("Late", Priority::High, 10, 12)).unwrap();

        let board = place_fixed(store.iter());
        assert_eq!(board.hours_for("Early"), vec![8, 9]);
        assert_eq!(board.hours_for("Late"), vec![10, 11]);
    }

    #[test]
    fn ignores_flexible_tasks() {
        let mut store = TaskStore::new();
        store.add(NewTask::flexible("Study", Priority::High, 3)).unwrap();

        let board = place_fixed(store.iter());
        assert_eq!(board.free_hours(), HOURS_PER_DAY);
    }

    #[test]
    fn clips_to_end_of_day() {
        let task = Task {
            id: 1,
            title: "Night shift".to_string(),
            priority: Priority::Medium,
            kind: TaskKind::Fixed { start_hour: 22, end_hour: 30 },
            created_at: chrono::Utc::now(),
        };

        let board = place_fixed([&task]);
        assert_eq!(board.hours_for("Night shift"), vec![22, 23]);
    }
}
