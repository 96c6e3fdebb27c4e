pub mod config;
pub mod reminder;
pub mod schedule;
pub mod task;
