//! Daily slot allocator.
//!
//! The pipeline runs leaf-first over an explicit [`SlotBoard`] value:
//! - [`place_fixed`] stamps fixed tasks onto a fresh board
//! - [`pack_flexible`] packs flexible tasks by priority, first-fit
//! - [`insert_sleep`] optionally reserves hours for sleep cycles
//! - [`compute_stats`] summarizes the free time that is left
//!
//! Every stage takes a board and returns a new one; nothing here fails.

pub mod fixed;
pub mod flexible;
pub mod sleep;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::board::SlotBoard;
use crate::task::TaskStore;

pub use fixed::place_fixed;
pub use flexible::{pack_flexible, pack_flexible_with_report, Placement};
pub use sleep::{insert_sleep, night_indices, required_hours, SleepConfig, SleepReport};
pub use stats::{compute_stats, cycles_in, FreeBlock, SleepStats};

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub board: SlotBoard,
    pub stats: SleepStats,
    /// Present when sleep insertion ran.
    pub sleep: Option<SleepReport>,
    /// One entry per flexible task, in packing order.
    pub placements: Vec<Placement>,
}

impl DayPlan {
    /// Plan for an untouched board.
    pub fn empty() -> Self {
        Self::from_board(SlotBoard::new())
    }

    /// Wrap an existing board, recomputing its stats.
    pub fn from_board(board: SlotBoard) -> Self {
        let stats = compute_stats(&board);
        Self {
            board,
            stats,
            sleep: None,
            placements: Vec::new(),
        }
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    pub sleep: SleepConfig,
    /// Run sleep insertion as part of `generate`.
    pub auto_sleep_insert: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            sleep: SleepConfig::default(),
            auto_sleep_insert: true,
        }
    }
}

/// Entry points used by the presentation layer.
pub struct DayPlanner {
    config: PlannerConfig,
}

impl DayPlanner {
    /// Create a new planner with default config
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Build a day from scratch: fixed, flexible, optional sleep, stats.
    pub fn generate(&self, tasks: &TaskStore) -> DayPlan {
        let board = place_fixed(tasks.fixed());
        let (board, placements) = pack_flexible_with_report(board, tasks.flexible());

        let (board, sleep) = if self.config.auto_sleep_insert {
            let (board, report) = insert_sleep(board, &self.config.sleep);
            (board, Some(report))
        } else {
            (board, None)
        };

        tracing::debug!(
            "generated plan for {} tasks, {} hours free",
            tasks.len(),
            board.free_hours()
        );
        let stats = compute_stats(&board);
        DayPlan {
            board,
            stats,
            sleep,
            placements,
        }
    }

    /// Insert sleep into an existing board regardless of `auto_sleep_insert`.
    pub fn force_insert_sleep(&self, board: SlotBoard) -> DayPlan {
        let (board, report) = insert_sleep(board, &self.config.sleep);
        let stats = compute_stats(&board);
        DayPlan {
            board,
            stats,
            sleep: Some(report),
            placements: Vec::new(),
        }
    }
}

impl Default for DayPlanner {
    fn default() -> Self {
        Self::new()
    }
}
