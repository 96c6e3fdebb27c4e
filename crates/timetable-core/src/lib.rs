//! # Timetable Core Library
//!
//! This library provides the core logic for the Timetable daily planner.
//! It follows the same CLI-first split as the rest of the project: every
//! operation lives here, and the `timetable` binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Slot board**: a fixed array of 24 one-hour cells
//! - **Scheduler**: a pure pipeline (fixed placement, flexible packing,
//!   sleep insertion, sleep statistics) over explicit board values
//! - **Storage**: SQLite key-value snapshots and TOML configuration
//! - **Reminders**: time-of-day reminders with an explicit notified set
//!
//! ## Key Components
//!
//! - [`TaskStore`]: user-declared fixed and flexible tasks
//! - [`SlotBoard`]: the 24-hour assignment array
//! - [`DayPlanner`]: `generate` and `force_insert_sleep` entry points
//! - [`TimetableDb`]: persistence of tasks, board and reminders
//! - [`Config`]: sleep planning preferences

pub mod board;
pub mod error;
pub mod reminder;
pub mod scheduler;
pub mod storage;
pub mod task;

pub use board::{Assignment, SlotBoard, SlotCategory, SlotCell, HOURS_PER_DAY, SLEEP_TITLE};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use reminder::{Reminder, ReminderBook};
pub use scheduler::{
    compute_stats, insert_sleep, pack_flexible, place_fixed, DayPlan, DayPlanner, FreeBlock,
    Placement, PlannerConfig, SleepConfig, SleepReport, SleepStats,
};
pub use storage::{Config, TimetableDb};
pub use task::{NewTask, Priority, Task, TaskKind, TaskStore};
