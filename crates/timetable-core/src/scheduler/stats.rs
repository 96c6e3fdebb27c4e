//! Sleep calculator over a finished board.

use serde::{Deserialize, Serialize};

use crate::board::{SlotBoard, HOURS_PER_DAY};
use crate::scheduler::sleep::CYCLE_MINUTES;

/// A maximal run of free hours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeBlock {
    pub start_hour: usize,
    pub length_hours: usize,
    /// Whole 90-minute cycles that fit in the run.
    pub cycles: usize,
}

/// How many sleep cycles the free time on a board could hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepStats {
    pub max_contiguous_cycles: usize,
    pub total_cycles: usize,
    pub blocks: Vec<FreeBlock>,
}

/// Whole cycles that fit in `hours` hours.
pub fn cycles_in(hours: usize) -> usize {
    hours * 60 / CYCLE_MINUTES
}

/// Scan the board for maximal free runs and count the cycles each holds.
pub fn compute_stats(board: &SlotBoard) -> SleepStats {
    let mut blocks = Vec::new();
    let mut run = 0usize;

    // Hour 24 acts as an implicit boundary so a run reaching 23 is closed.
    for hour in 0..=HOURS_PER_DAY {
        if hour < HOURS_PER_DAY && board.is_free(hour) {
            run += 1;
            continue;
        }
        if run > 0 {
            blocks.push(FreeBlock {
                start_hour: hour - run,
                length_hours: run,
                cycles: cycles_in(run),
            });
        }
        run = 0;
    }

    SleepStats {
        max_contiguous_cycles: blocks.iter().map(|b| b.cycles).max().unwrap_or(0),
        total_cycles: blocks.iter().map(|b| b.cycles).sum(),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Assignment;
    use crate::task::Priority;

    #[test]
    fn empty_board_is_one_block() {
        let stats = compute_stats(&SlotBoard::new());
        assert_eq!(stats.blocks.len(), 1);
        assert_eq!(stats.blocks[0].length_hours, 24);
        assert_eq!(stats.blocks[0].cycles, 16);
        assert_eq!(stats.total_cycles, 16);
        assert_eq!(stats.max_contiguous_cycles, 16);
    }

    #[test]
    fn full_board_has_no_blocks() {
        let mut board = SlotBoard::new();
        for hour in 0..HOURS_PER_DAY {
            board.set(hour, Assignment::sleep());
        }
        let stats = compute_stats(&board);
        assert!(stats.blocks.is_empty());
        assert_eq!(stats.max_contiguous_cycles, 0);
        assert_eq!(stats.total_cycles, 0);
    }

    #[test]
    fn closes_run_that_reaches_end_of_day() {
        let mut board = SlotBoard::new();
        for hour in 0..21 {
            board.set(hour, Assignment::fixed("Work", Priority::High));
        }
        let stats = compute_stats(&board);
        assert_eq!(
            stats.blocks,
            vec![FreeBlock {
                start_hour: 21,
                length_hours: 3,
                cycles: 2
            }]
        );
    }

    #[test]
    fn splits_runs_and_floors_cycles() {
        let mut board = SlotBoard::new();
        board.set(1, Assignment::flex("A", Priority::Low));
        board.set(5, Assignment::flex("B", Priority::Low));
        for hour in 8..HOURS_PER_DAY {
            board.set(hour, Assignment::fixed("C", Priority::Low));
        }

        let stats = compute_stats(&board);
        let lengths: Vec<_> = stats.blocks.iter().map(|b| b.length_hours).collect();
        assert_eq!(lengths, vec![1, 3, 2]);
        let cycles: Vec<_> = stats.blocks.iter().map(|b| b.cycles).collect();
        assert_eq!(cycles, vec![0, 2, 1]);
        assert_eq!(stats.total_cycles, 3);
        assert_eq!(stats.max_contiguous_cycles, 2);
    }

    #[test]
    fn cycles_in_floors() {
        assert_eq!(cycles_in(1), 0);
        assert_eq!(cycles_in(2), 1);
        assert_eq!(cycles_in(3), 2);
        assert_eq!(cycles_in(6), 4);
        assert_eq!(cycles_in(7), 4);
    }
}
