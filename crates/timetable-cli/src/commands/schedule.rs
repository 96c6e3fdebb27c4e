//! Timetable generation and display.

use clap::Subcommand;
use timetable_core::{
    compute_stats, Config, DayPlan, DayPlanner, SleepReport, SleepStats, SlotBoard, SlotCategory,
    TimetableDb,
};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Rebuild the timetable from the task list
    Generate {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the last generated timetable
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Force sleep insertion into the current timetable
    Sleep {
        #[arg(long)]
        json: bool,
    },
    /// Show the sleep calculator for the current timetable
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Clear the timetable
    Reset,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = TimetableDb::open()?;
    let config = Config::load_or_default();
    let planner = DayPlanner::with_config(config.planner_config());

    match action {
        ScheduleAction::Generate { json } => {
            let tasks = db.load_tasks()?;
            let plan = planner.generate(&tasks);
            db.save_plan(&plan)?;
            print_plan(&plan, plan.sleep.as_ref(), json)?;
        }
        ScheduleAction::Show { json } => {
            let plan = DayPlan::from_board(db.load_board()?);
            let last = db.load_sleep_report()?;
            print_plan(&plan, last.as_ref(), json)?;
        }
        ScheduleAction::Sleep { json } => {
            let plan = planner.force_insert_sleep(db.load_board()?);
            db.save_plan(&plan)?;
            print_plan(&plan, plan.sleep.as_ref(), json)?;
        }
        ScheduleAction::Stats { json } => {
            let stats = compute_stats(&db.load_board()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats, db.load_sleep_report()?.as_ref());
            }
        }
        ScheduleAction::Reset => {
            db.save_plan(&DayPlan::empty())?;
            println!("timetable reset");
        }
    }
    Ok(())
}

fn print_plan(
    plan: &DayPlan,
    last_sleep: Option<&SleepReport>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
    } else {
        print_board(&plan.board);
        println!();
        print_stats(&plan.stats, last_sleep);
    }
    Ok(())
}

fn print_board(board: &SlotBoard) {
    for (hour, cell) in board.iter() {
        let label = match cell {
            None => "Free".to_string(),
            Some(a) if a.category == SlotCategory::Sleep => a.title.clone(),
            Some(a) => match a.priority {
                Some(p) => format!("{} ({p})", a.title),
                None => a.title.clone(),
            },
        };
        println!("{:02}:00 - {:02}:00  {}", hour, hour + 1, label);
    }
}

fn print_stats(stats: &SleepStats, last_sleep: Option<&SleepReport>) {
    println!("Sleep calculator");
    println!("  Max contiguous sleep cycles (90m): {}", stats.max_contiguous_cycles);
    println!("  Total possible cycles across day: {}", stats.total_cycles);
    let blocks = if stats.blocks.is_empty() {
        "None".to_string()
    } else {
        stats
            .blocks
            .iter()
            .map(|b| format!("{}h→{}c", b.length_hours, b.cycles))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("  Blocks: {blocks}");
    if let Some(report) = last_sleep {
        println!(
            "  Last insert attempt: required {}h, remaining {}h, inserted: {}",
            report.required_hours, report.remaining, report.any_sleep_inserted
        );
    }
}
