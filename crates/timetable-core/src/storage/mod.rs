mod config;
pub mod timetable_db;

pub use config::{Config, SleepSection};
pub use timetable_db::TimetableDb;

use std::path::PathBuf;

use crate::error::StorageError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "TIMETABLE_HOME";

/// Returns `$TIMETABLE_HOME` when set, otherwise `~/.config/timetable/`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("timetable"),
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
