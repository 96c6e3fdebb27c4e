//! SQLite-backed key-value storage for tasks, the last board and reminders.
//!
//! Every record is a JSON snapshot stored under a fixed key, so the layout
//! stays opaque to the planner: a task list, a 24-element schedule array,
//! the reminder book and the last sleep diagnostics.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::data_dir;
use crate::board::SlotBoard;
use crate::error::{CoreError, StorageError};
use crate::reminder::ReminderBook;
use crate::scheduler::{DayPlan, SleepReport};
use crate::task::TaskStore;

pub const TASKS_KEY: &str = "tasks_v1";
pub const TIMETABLE_KEY: &str = "timetable_v1";
pub const REMINDERS_KEY: &str = "reminders_v1";
pub const SLEEP_REPORT_KEY: &str = "last_sleep_report_v1";

/// Current schema version.
const SCHEMA_VERSION: i32 = 1;

/// SQLite database for timetable storage.
pub struct TimetableDb {
    conn: Connection,
}

impl TimetableDb {
    /// Open the database at `<data dir>/timetable.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        Self::open_at(&data_dir()?.join("timetable.db"))
    }

    /// Open a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );",
        )?;

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .optional()?
            .unwrap_or(0);

        if current < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS records (
                    key         TEXT PRIMARY KEY,
                    value       TEXT NOT NULL,
                    updated_at  TEXT NOT NULL
                );",
            )?;
        }

        if current < SCHEMA_VERSION {
            self.conn.execute("DELETE FROM schema_version", [])?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
            tracing::debug!("schema migrated from v{} to v{}", current, SCHEMA_VERSION);
        }
        Ok(())
    }

    /// Store a JSON snapshot under `key`, replacing any previous value.
    pub fn put_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Load the snapshot under `key`, if any.
    pub fn get_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                StorageError::CorruptRecord {
                    key: key.to_string(),
                    message: e.to_string(),
                }
                .into()
            }),
            None => Ok(None),
        }
    }

    pub fn delete_record(&self, key: &str) -> Result<bool, CoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM records WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }

    pub fn load_tasks(&self) -> Result<TaskStore, CoreError> {
        Ok(self.get_record(TASKS_KEY)?.unwrap_or_default())
    }

    pub fn save_tasks(&self, tasks: &TaskStore) -> Result<(), CoreError> {
        self.put_record(TASKS_KEY, tasks)
    }

    /// Last saved board, or an empty day when none was saved.
    pub fn load_board(&self) -> Result<SlotBoard, CoreError> {
        Ok(self.get_record(TIMETABLE_KEY)?.unwrap_or_default())
    }

    pub fn save_board(&self, board: &SlotBoard) -> Result<(), CoreError> {
        self.put_record(TIMETABLE_KEY, board)
    }

    pub fn load_reminders(&self) -> Result<ReminderBook, CoreError> {
        Ok(self.get_record(REMINDERS_KEY)?.unwrap_or_default())
    }

    pub fn save_reminders(&self, book: &ReminderBook) -> Result<(), CoreError> {
        self.put_record(REMINDERS_KEY, book)
    }

    pub fn load_sleep_report(&self) -> Result<Option<SleepReport>, CoreError> {
        self.get_record(SLEEP_REPORT_KEY)
    }

    /// Persist the board of a plan together with its sleep diagnostics.
    ///
    /// A plan without a sleep run clears the stored diagnostics.
    pub fn save_plan(&mut self, plan: &DayPlan) -> Result<(), CoreError> {
        let board = serde_json::to_string(&plan.board)?;
        let report = plan.sleep.as_ref().map(serde_json::to_string).transpose()?;
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![TIMETABLE_KEY, board, now],
        )?;
        match report {
            Some(json) => {
                tx.execute(
                    "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    params![SLEEP_REPORT_KEY, json, now],
                )?;
            }
            None => {
                tx.execute("DELETE FROM records WHERE key = ?1", params![SLEEP_REPORT_KEY])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
