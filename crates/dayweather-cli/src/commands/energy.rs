//! Internal weather check-in.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use dayweather_core::{Config, Database, EnergyLevel};

use super::{checkin_or_default, units, CmdResult};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Set today's energy (sparky, steady, flowing, foggy, resting)
    Set {
        level: EnergyLevel,
    },
    /// Show today's energy and what it allows
    Show,
    /// Forget today's energy
    Clear,
    /// List all levels with their capacity
    Levels,
}

pub fn run(action: EnergyAction, date: NaiveDate) -> CmdResult {
    match action {
        EnergyAction::Set { level } => save(date, Some(level)),
        EnergyAction::Clear => save(date, None),
        EnergyAction::Show => show(date),
        EnergyAction::Levels => levels(),
    }
}

fn save(date: NaiveDate, energy: Option<EnergyLevel>) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut checkin = checkin_or_default(&db, &config, date)?;
    checkin.energy = energy;
    checkin.updated_at = Utc::now();
    db.upsert_checkin(&checkin)?;

    match energy {
        Some(level) => {
            let policy = config.policy()?;
            println!("Energy set: {level}");
            println!("  {}", level.forecast());
            println!("  Capacity today: {}", units(policy.ceiling(level)));
        }
        None => println!("Energy cleared for {date}"),
    }
    Ok(())
}

fn show(date: NaiveDate) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let checkin = checkin_or_default(&db, &config, date)?;

    match checkin.energy {
        Some(level) => {
            let policy = config.policy()?;
            println!("{level}: {}", level.forecast());
            println!("Capacity: {}", units(policy.ceiling(level)));
        }
        None => {
            println!("No energy set for {date}.");
            println!("Run `dayweather energy set <level>` to check in.");
        }
    }
    Ok(())
}

fn levels() -> CmdResult {
    let policy = Config::load()?.policy()?;
    for level in EnergyLevel::ALL {
        println!(
            "{:<8} {:>4}  {}",
            level.as_str(),
            units(policy.ceiling(level)),
            level.forecast()
        );
    }
    Ok(())
}
