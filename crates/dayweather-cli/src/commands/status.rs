//! Current capacity, time left and guidance.
//!
//! `--watch` keeps re-reading state and re-rendering once a minute, which
//! is the cadence the hard stop needs.

use chrono::{Local, NaiveDate, Timelike};
use clap::Args;
use std::time::Duration;

use dayweather_core::{Config, Database, DaySnapshot};

use super::task::print_tasks;
use super::{clock_for, load_plan, units, CmdResult};

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Refresh every minute until interrupted
    #[arg(long, conflicts_with = "json")]
    watch: bool,
}

pub fn run(args: StatusArgs, date: NaiveDate) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;

    if !args.watch {
        return render(&db, &config, date, args.json);
    }

    loop {
        // Clear screen and home the cursor.
        print!("\x1b[2J\x1b[H");
        render(&db, &config, date, false)?;
        let wait = 60 - u64::from(Local::now().second().min(59));
        tracing::debug!(wait_secs = wait, "waiting for next tick");
        std::thread::sleep(Duration::from_secs(wait));
    }
}

fn render(db: &Database, config: &Config, date: NaiveDate, json: bool) -> CmdResult {
    let plan = load_plan(db, config, date)?;
    let snapshot = plan.recompute(clock_for(date));

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_snapshot(&snapshot);
    if !plan.tasks().is_empty() {
        println!("\nTasks:");
        print_tasks(plan.tasks());
    }
    Ok(())
}

fn print_snapshot(snapshot: &DaySnapshot) {
    match snapshot.energy {
        Some(level) => println!("Weather:   {level}. {}", level.forecast()),
        None => println!("Weather:   not checked in"),
    }

    let capacity = &snapshot.capacity;
    let mut line = format!(
        "Capacity:  {} of {} used ({:.0}%), {} left",
        units(capacity.used_capacity),
        units(capacity.total_capacity),
        capacity.percent_used,
        units(capacity.remaining_capacity)
    );
    if let Some(complexity) = capacity.recommended_complexity {
        line.push_str(&format!(", room for a {complexity} task"));
    }
    println!("{line}");

    println!("Hard stop: {} ({})", snapshot.hard_stop, snapshot.time.message);

    let guidance = &snapshot.guidance;
    if !guidance.is_empty() {
        match guidance.action {
            Some(action) => println!("\n> {} [{action}]", guidance.message),
            None => println!("\n> {}", guidance.message),
        }
    }
}
