use chrono::NaiveDate;
use clap::Subcommand;

use dayweather_core::{Database, Reflection};

use super::CmdResult;

#[derive(Subcommand)]
pub enum ReflectAction {
    /// Write (or rewrite) the evening reflection
    Write {
        /// What went well
        went_well: String,
        /// What was hard
        #[arg(default_value = "")]
        was_hard: String,
        /// How the energy actually felt, 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
    },
    /// Show the day's reflection
    Show,
}

pub fn run(action: ReflectAction, date: NaiveDate) -> CmdResult {
    let db = Database::open()?;

    match action {
        ReflectAction::Write {
            went_well,
            was_hard,
            rating,
        } => {
            let reflection = Reflection::new(date, &went_well, &was_hard, rating)?;
            db.upsert_reflection(&reflection)?;
            println!("Reflection saved for {date}");
        }
        ReflectAction::Show => match db.reflection_for(date)? {
            Some(r) => {
                if !r.went_well.is_empty() {
                    println!("Went well: {}", r.went_well);
                }
                if !r.was_hard.is_empty() {
                    println!("Was hard:  {}", r.was_hard);
                }
                if let Some(rating) = r.energy_rating {
                    println!("Energy:    {rating}/5");
                }
            }
            None => println!("No reflection for {date} yet."),
        },
    }
    Ok(())
}
