use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use dayweather_core::{time_until_stop, Config, Database, HardStop};

use super::{checkin_or_default, clock_for, CmdResult};

#[derive(Subcommand)]
pub enum StopAction {
    /// Set the day's hard stop (HH:MM, 24-hour)
    Set {
        time: HardStop,
    },
    /// Show the hard stop and the time left
    Show,
}

pub fn run(action: StopAction, date: NaiveDate) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut checkin = checkin_or_default(&db, &config, date)?;

    match action {
        StopAction::Set { time } => {
            checkin.hard_stop = time;
            checkin.updated_at = Utc::now();
            db.upsert_checkin(&checkin)?;
            println!("Hard stop for {date} set to {time}");
        }
        StopAction::Show => {
            let info = time_until_stop(checkin.hard_stop, clock_for(date));
            println!("Hard stop: {} ({})", checkin.hard_stop, info.message);
        }
    }
    Ok(())
}
