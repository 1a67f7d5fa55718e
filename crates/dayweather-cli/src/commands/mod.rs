pub mod barrier;
pub mod config;
pub mod energy;
pub mod reflect;
pub mod status;
pub mod stop;
pub mod task;

use std::cmp::Ordering;

use chrono::{Local, NaiveDate, NaiveTime};

use dayweather_core::{CheckIn, Config, Database, DayPlan};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// The date commands operate on: `--date` if given, else today.
pub fn plan_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// The time of day to measure the hard stop against on `date`.
///
/// Today uses the wall clock. A future day has not started, so it is
/// measured from midnight; a past day is over and measured from its last
/// minute, which is always at or past any stop.
pub fn clock_for(date: NaiveDate) -> NaiveTime {
    let now = Local::now();
    match date.cmp(&now.date_naive()) {
        Ordering::Equal => now.time(),
        Ordering::Greater => NaiveTime::MIN,
        Ordering::Less => NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN),
    }
}

/// The stored check-in for `date`, or a fresh one using the configured
/// default hard stop.
pub fn checkin_or_default(
    db: &Database,
    config: &Config,
    date: NaiveDate,
) -> Result<CheckIn, Box<dyn std::error::Error>> {
    Ok(db
        .checkin_for(date)?
        .unwrap_or_else(|| CheckIn::new(date, config.hard_stop())))
}

/// Load everything the engine needs for `date` into a plan.
pub fn load_plan(
    db: &Database,
    config: &Config,
    date: NaiveDate,
) -> Result<DayPlan, Box<dyn std::error::Error>> {
    let checkin = checkin_or_default(db, config, date)?;
    let mut plan = DayPlan::new(checkin.hard_stop).with_policy(config.policy()?);
    plan.set_energy(checkin.energy);
    plan.replace_tasks(db.tasks_for(date)?);
    Ok(plan)
}

/// Render a capacity number without a trailing `.0`.
pub fn units(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
