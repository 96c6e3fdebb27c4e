//! Reminder commands for CLI.

use chrono::{Local, NaiveTime};
use clap::Subcommand;
use timetable_core::reminder::parse_time;
use timetable_core::{CoreError, Reminder, TimetableDb};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Add a reminder
    Add {
        /// Reminder text
        text: String,
        /// Time of day (HH:MM)
        #[arg(long, default_value = "12:00")]
        at: String,
    },
    /// List reminders
    List {
        #[arg(long)]
        json: bool,
    },
    /// Toggle a reminder's done flag
    Done {
        /// Reminder ID
        id: u64,
    },
    /// Move a reminder to another time
    Reschedule {
        id: u64,
        /// New time of day (HH:MM)
        at: String,
    },
    /// Delete a reminder
    Remove {
        id: u64,
    },
    /// Print reminders due now and mark them notified
    Due {
        /// Check against this time instead of the local clock (HH:MM)
        #[arg(long)]
        at: Option<String>,
    },
}

fn describe(reminder: &Reminder) -> String {
    let mark = if reminder.done { "x" } else { " " };
    format!("[{mark}] #{:<4} {} {}", reminder.id, reminder.time.format("%H:%M"), reminder.text)
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TimetableDb::open()?;
    let mut book = db.load_reminders()?;
    let not_found = |id| CoreError::NotFound { kind: "reminder", id };

    match action {
        ReminderAction::Add { text, at } => {
            let reminder = book.add(&text, parse_time(&at)?)?.clone();
            db.save_reminders(&book)?;
            println!("Reminder created: {}", reminder.id);
            println!("{}", describe(&reminder));
        }
        ReminderAction::List { json } => {
            if json {
                let all: Vec<&Reminder> = book.iter().collect();
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if book.is_empty() {
                println!("No reminders yet.");
            } else {
                for reminder in book.iter() {
                    println!("{}", describe(reminder));
                }
            }
        }
        ReminderAction::Done { id } => {
            let done = book.toggle_done(id).ok_or_else(|| not_found(id))?;
            db.save_reminders(&book)?;
            println!("Reminder {id} {}", if done { "done" } else { "reopened" });
        }
        ReminderAction::Reschedule { id, at } => {
            let time = parse_time(&at)?;
            let reminder = book.reschedule(id, time).ok_or_else(|| not_found(id))?.clone();
            db.save_reminders(&book)?;
            println!("{}", describe(&reminder));
        }
        ReminderAction::Remove { id } => {
            book.remove(id).ok_or_else(|| not_found(id))?;
            db.save_reminders(&book)?;
            println!("Reminder deleted: {id}");
        }
        ReminderAction::Due { at } => {
            let now: NaiveTime = match at {
                Some(value) => parse_time(&value)?,
                None => Local::now().time(),
            };
            let due = book.take_due(now);
            db.save_reminders(&book)?;
            if due.is_empty() {
                println!("Nothing due at {}", now.format("%H:%M"));
            }
            for reminder in &due {
                println!("Reminder: {}", reminder.text);
            }
        }
    }
    Ok(())
}
