//! Integration tests: storage feeding the day plan.

use chrono::{NaiveDate, NaiveTime};
use dayweather_core::{
    Barrier, CheckIn, Config, Database, DayPlan, EnergyLevel, MessageType, NewTask, Reflection,
    TaskComplexity,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn load_plan(db: &Database, config: &Config, date: NaiveDate) -> DayPlan {
    let checkin = db
        .checkin_for(date)
        .unwrap()
        .unwrap_or_else(|| CheckIn::new(date, config.hard_stop()));
    let mut plan = DayPlan::new(checkin.hard_stop).with_policy(config.policy().unwrap());
    plan.set_energy(checkin.energy);
    plan.replace_tasks(db.tasks_for(date).unwrap());
    plan
}

#[test]
fn full_day_walkthrough() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();

    // Morning: nothing set yet.
    let snap = load_plan(&db, &config, day()).recompute(at(8, 30));
    assert_eq!(snap.guidance.message_type, MessageType::SetEnergy);
    assert!(!snap.capacity.can_add_task);
    assert_eq!(snap.hard_stop.to_string(), "18:00");

    // Check in as steady with an early stop.
    let mut checkin = CheckIn::new(day(), "16:00".parse().unwrap());
    checkin.energy = Some(EnergyLevel::Steady);
    db.upsert_checkin(&checkin).unwrap();

    let snap = load_plan(&db, &config, day()).recompute(at(8, 30));
    assert_eq!(snap.guidance.message_type, MessageType::AddFirstTask);
    assert_eq!(snap.capacity.total_capacity, 3.0);

    // Plan the day.
    let deep = db
        .create_task(day(), NewTask::focus("draft proposal", TaskComplexity::Deep).unwrap())
        .unwrap();
    db.create_task(day(), NewTask::life("take meds").unwrap()).unwrap();

    let snap = load_plan(&db, &config, day()).recompute(at(9, 0));
    assert_eq!(snap.capacity.used_capacity, 2.0);
    assert_eq!(snap.capacity.remaining_capacity, 1.0);
    assert_eq!(snap.time.total_minutes, 7 * 60);
    assert_eq!(snap.time.message, "7h left");
    assert!(snap.guidance.is_empty());

    // Still working after the stop.
    let snap = load_plan(&db, &config, day()).recompute(at(16, 20));
    assert!(snap.time.is_past_stop);
    assert_eq!(snap.guidance.message_type, MessageType::RestNow);

    // Finish it.
    db.set_task_completed(&deep.id, true).unwrap();
    let snap = load_plan(&db, &config, day()).recompute(at(16, 25));
    assert_eq!(snap.guidance.message_type, MessageType::Celebrate);

    // Evening.
    db.add_barrier(&Barrier::new(day(), Some(deep.id.clone()), "kept checking mail").unwrap())
        .unwrap();
    db.upsert_reflection(&Reflection::new(day(), "finished the draft", "afternoon slump", Some(3)).unwrap())
        .unwrap();
    assert_eq!(db.barriers_for(day()).unwrap().len(), 1);
    assert_eq!(
        db.reflection_for(day()).unwrap().unwrap().energy_rating,
        Some(3)
    );
}

#[test]
fn plan_refuses_focus_work_on_a_resting_day() {
    let mut plan = DayPlan::default();
    plan.set_energy(Some(EnergyLevel::Resting));
    let task = NewTask::focus("refactor", TaskComplexity::Quick)
        .unwrap()
        .with_id("r");
    assert!(plan.add_task(task).is_err());

    let snap = plan.recompute(at(10, 0));
    assert!(snap.guidance.is_empty());
    assert_eq!(snap.capacity.recommended_complexity, None);
}

#[test]
fn snapshot_serializes_for_json_output() {
    let mut plan = DayPlan::default();
    plan.set_energy(Some(EnergyLevel::Sparky));
    let json = serde_json::to_value(plan.recompute(at(12, 0))).unwrap();
    assert_eq!(json["energy"], "sparky");
    assert_eq!(json["hard_stop"], "18:00");
    assert_eq!(json["capacity"]["total_capacity"], 4.0);
    assert_eq!(json["time"]["total_minutes"], 360);
    assert_eq!(json["guidance"]["action"], "add task");
}
