use chrono::NaiveDate;
use clap::Subcommand;

use dayweather_core::{Barrier, Database};

use super::task::{resolve_task_id, short_id};
use super::CmdResult;

#[derive(Subcommand)]
pub enum BarrierAction {
    /// Note something that got in the way
    Add {
        description: String,
        /// Task the barrier blocked (ID or unique prefix)
        #[arg(long)]
        task: Option<String>,
    },
    /// List the day's barriers
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: BarrierAction, date: NaiveDate) -> CmdResult {
    let db = Database::open()?;

    match action {
        BarrierAction::Add { description, task } => {
            let task_id = task
                .map(|id| resolve_task_id(&db, date, &id))
                .transpose()?;
            let barrier = Barrier::new(date, task_id, &description)?;
            db.add_barrier(&barrier)?;
            println!("Barrier noted: {}", barrier.description);
        }
        BarrierAction::List { json } => {
            let barriers = db.barriers_for(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&barriers)?);
            } else if barriers.is_empty() {
                println!("No barriers noted for {date}.");
            } else {
                for barrier in &barriers {
                    match &barrier.task_id {
                        Some(task_id) => {
                            println!("  - {} (task {})", barrier.description, short_id(task_id))
                        }
                        None => println!("  - {}", barrier.description),
                    }
                }
            }
        }
    }
    Ok(())
}
