use chrono::NaiveDate;
use clap::Subcommand;

use dayweather_core::{Config, Database, NewTask, Task, TaskComplexity, TaskType};

use super::{load_plan, units, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// What needs doing
        description: String,
        /// quick, medium or deep
        #[arg(long, short, default_value = "medium")]
        complexity: TaskComplexity,
        /// Life maintenance task (does not use focus capacity)
        #[arg(long)]
        life: bool,
    },
    /// List the day's tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done
    Done {
        /// Task ID or unique prefix
        id: String,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID or unique prefix
        id: String,
    },
    /// Delete a task
    Remove {
        /// Task ID or unique prefix
        id: String,
    },
}

pub fn run(action: TaskAction, date: NaiveDate) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            description,
            complexity,
            life,
        } => {
            let task_type = if life { TaskType::Life } else { TaskType::Focus };
            let new_task = NewTask::new(&description, complexity, task_type)?;

            let plan = load_plan(&db, &config, date)?;
            plan.ensure_room_for(task_type)?;

            let task = db.create_task(date, new_task)?;
            println!("Task added: {} [{}]", task.description, short_id(&task.id));

            if task_type == TaskType::Focus {
                let focus_count = plan.tasks().iter().filter(|t| t.is_focus()).count() + 1;
                if focus_count as u32 > config.day.max_focus_tasks {
                    println!(
                        "  Note: that's {focus_count} focus tasks. Fewer is usually kinder."
                    );
                }
            }
        }
        TaskAction::List { json } => {
            let tasks = db.tasks_for(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks for {date}.");
            } else {
                let plan = load_plan(&db, &config, date)?;
                print_tasks(&tasks);
                let capacity = plan.capacity();
                println!(
                    "\nFocus capacity: {} of {} used",
                    units(capacity.used_capacity),
                    units(capacity.total_capacity)
                );
            }
        }
        TaskAction::Done { id } => {
            let id = resolve_task_id(&db, date, &id)?;
            db.set_task_completed(&id, true)?;
            println!("Done: {}", db.task(&id)?.description);
        }
        TaskAction::Toggle { id } => {
            let id = resolve_task_id(&db, date, &id)?;
            let completed = db.toggle_task(&id)?;
            let state = if completed { "done" } else { "open" };
            println!("Task {} is now {state}", short_id(&id));
        }
        TaskAction::Remove { id } => {
            let id = resolve_task_id(&db, date, &id)?;
            let task = db.task(&id)?;
            db.delete_task(&id)?;
            println!("Removed: {}", task.description);
        }
    }
    Ok(())
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn print_tasks(tasks: &[Task]) {
    for task in tasks {
        let check = if task.completed { "x" } else { " " };
        let kind = match task.task_type {
            TaskType::Focus => format!("focus/{}", task.complexity),
            TaskType::Life => "life".to_string(),
        };
        println!(
            "  [{check}] {:<8} {:<12} {}",
            short_id(&task.id),
            kind,
            task.description
        );
    }
}

/// Match a full id or a unique prefix among the day's tasks.
pub fn resolve_task_id(
    db: &Database,
    date: NaiveDate,
    id: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let tasks = db.tasks_for(date)?;
    if let Some(task) = tasks.iter().find(|t| t.id == id) {
        return Ok(task.id.clone());
    }

    let matches: Vec<&Task> = tasks.iter().filter(|t| t.id.starts_with(id)).collect();
    match matches.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => Err(format!("no task matching '{id}' on {date}").into()),
        _ => Err(format!("'{id}' matches {} tasks; use more characters", matches.len()).into()),
    }
}
