//! Task management commands for CLI.

use clap::Subcommand;
use timetable_core::{CoreError, DayPlan, NewTask, Priority, Task, TaskKind, TimetableDb};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Hours needed for a flexible task
        #[arg(long, conflicts_with_all = ["start", "end"], required_unless_present = "start")]
        duration: Option<u8>,
        /// Start hour of a fixed task (0-23)
        #[arg(long, requires = "end")]
        start: Option<u8>,
        /// End hour of a fixed task, exclusive (1-24)
        #[arg(long, requires = "start")]
        end: Option<u8>,
        /// Priority: high, medium or low
        #[arg(long, default_value = "high")]
        priority: Priority,
    },
    /// List tasks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: u64,
    },
    /// Delete every task and reset the timetable
    Clear,
}

fn describe(task: &Task) -> String {
    let timing = match task.kind {
        TaskKind::Fixed { start_hour, end_hour } => format!("fixed {start_hour:02}:00-{end_hour:02}:00"),
        TaskKind::Flexible { duration } => format!("flexible {duration}h"),
    };
    format!("#{:<4} {:<24} {:<20} {}", task.id, task.title, timing, task.priority)
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = TimetableDb::open()?;
    let mut store = db.load_tasks()?;

    match action {
        TaskAction::Add {
            title,
            duration,
            start,
            end,
            priority,
        } => {
            let new_task = match (duration, start, end) {
                (Some(duration), _, _) => NewTask::flexible(title, priority, duration),
                (None, Some(start), Some(end)) => NewTask::fixed(title, priority, start, end),
                _ => return Err("either --duration or --start/--end is required".into()),
            };
            let task = store.add(new_task)?.clone();
            db.save_tasks(&store)?;
            println!("Task created: {}", task.id);
            println!("{}", describe(&task));
        }
        TaskAction::List { json } => {
            if json {
                let tasks: Vec<&Task> = store.iter().collect();
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if store.is_empty() {
                println!("No tasks yet.");
            } else {
                for task in store.iter() {
                    println!("{}", describe(task));
                }
            }
        }
        TaskAction::Remove { id } => {
            store
                .remove(id)
                .ok_or(CoreError::NotFound { kind: "task", id })?;
            db.save_tasks(&store)?;
            println!("Task deleted: {id}");
        }
        TaskAction::Clear => {
            let removed = store.clear();
            db.save_tasks(&store)?;
            db.save_plan(&DayPlan::empty())?;
            println!("Cleared {removed} tasks; timetable reset");
        }
    }
    Ok(())
}
