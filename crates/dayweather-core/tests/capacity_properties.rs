//! Property tests for the capacity, hard stop and guidance functions.

use chrono::NaiveTime;
use dayweather_core::{
    capacity_info, contextual_message, time_until_stop, CapacityPolicy, EnergyLevel, GuidanceAction,
    HardStop, MessageType, Task, TaskComplexity, TaskType,
};
use proptest::prelude::*;

fn energy_strategy() -> impl Strategy<Value = EnergyLevel> {
    prop::sample::select(EnergyLevel::ALL.to_vec())
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        "[a-z]{1,8}",
        any::<bool>(),
        prop::sample::select(TaskComplexity::ALL.to_vec()),
        prop::sample::select(vec![TaskType::Focus, TaskType::Life]),
    )
        .prop_map(|(id, completed, complexity, task_type)| Task {
            description: format!("task {id}"),
            id,
            completed,
            complexity,
            task_type,
        })
}

fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60, 0u32..60)
        .prop_map(|(h, m, s)| NaiveTime::from_hms_opt(h, m, s).unwrap())
}

fn hard_stop_strategy() -> impl Strategy<Value = HardStop> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| HardStop::new(h, m).unwrap())
}

#[test]
fn ceilings_strictly_decrease_to_zero() {
    let policy = CapacityPolicy::default();
    for pair in EnergyLevel::ALL.windows(2) {
        assert!(policy.ceiling(pair[0]) > policy.ceiling(pair[1]));
    }
    assert_eq!(policy.ceiling(EnergyLevel::Resting), 0.0);
}

#[test]
fn weights_strictly_increase() {
    let policy = CapacityPolicy::default();
    assert!(policy.weight(TaskComplexity::Quick) < policy.weight(TaskComplexity::Medium));
    assert!(policy.weight(TaskComplexity::Medium) < policy.weight(TaskComplexity::Deep));
}

#[test]
fn steady_day_with_one_deep_task() {
    let deep = Task {
        id: "deep".into(),
        description: "quarterly report".into(),
        completed: false,
        complexity: TaskComplexity::Deep,
        task_type: TaskType::Focus,
    };
    let info = capacity_info(Some(EnergyLevel::Steady), &[deep]);
    assert_eq!(info.total_capacity, 3.0);
    assert_eq!(info.used_capacity, 2.0);
    assert_eq!(info.remaining_capacity, 1.0);
    assert!(info.can_add_task);
    // Medium weighs exactly 1, so it is the largest tier that still fits.
    assert_eq!(info.recommended_complexity, Some(TaskComplexity::Medium));
}

#[test]
fn no_energy_asks_for_energy_regardless_of_tasks() {
    let msg = contextual_message(&[], false, None);
    assert_eq!(msg.action, Some(GuidanceAction::SetEnergy));
}

proptest! {
    #[test]
    fn remaining_is_clamped_difference(
        energy in energy_strategy(),
        tasks in prop::collection::vec(task_strategy(), 0..10),
    ) {
        let info = capacity_info(Some(energy), &tasks);
        prop_assert!(info.used_capacity >= 0.0);
        prop_assert!(info.remaining_capacity >= 0.0);
        prop_assert_eq!(
            info.remaining_capacity,
            (info.total_capacity - info.used_capacity).max(0.0)
        );
        prop_assert_eq!(info.can_add_task, info.remaining_capacity > 0.0);
        prop_assert!((0.0..=100.0).contains(&info.percent_used));
    }

    #[test]
    fn recommendation_fits_remaining(
        energy in energy_strategy(),
        tasks in prop::collection::vec(task_strategy(), 0..10),
    ) {
        let policy = CapacityPolicy::default();
        let info = policy.capacity_info(Some(energy), &tasks);
        match info.recommended_complexity {
            Some(c) => {
                prop_assert!(policy.weight(c) <= info.remaining_capacity);
                for larger in TaskComplexity::ALL.iter().filter(|l| **l > c) {
                    prop_assert!(policy.weight(*larger) > info.remaining_capacity);
                }
            }
            None => prop_assert!(policy.weight(TaskComplexity::Quick) > info.remaining_capacity),
        }
    }

    #[test]
    fn adding_a_task_never_increases_remaining(
        energy in energy_strategy(),
        tasks in prop::collection::vec(task_strategy(), 0..10),
        extra in task_strategy(),
    ) {
        let before = capacity_info(Some(energy), &tasks);
        let mut more = tasks.clone();
        more.push(extra);
        let after = capacity_info(Some(energy), &more);
        prop_assert!(after.remaining_capacity <= before.remaining_capacity);
    }

    #[test]
    fn life_tasks_never_change_capacity(
        energy in energy_strategy(),
        tasks in prop::collection::vec(task_strategy(), 0..10),
    ) {
        let focus_only: Vec<Task> = tasks.iter().filter(|t| t.is_focus()).cloned().collect();
        prop_assert_eq!(
            capacity_info(Some(energy), &tasks),
            capacity_info(Some(energy), &focus_only)
        );
    }

    #[test]
    fn time_until_stop_matches_minute_difference(
        stop in hard_stop_strategy(),
        now in time_strategy(),
    ) {
        let info = time_until_stop(stop, now);
        let now_minutes = i64::from(chrono::Timelike::hour(&now)) * 60
            + i64::from(chrono::Timelike::minute(&now));
        prop_assert_eq!(info.total_minutes, stop.minutes_since_midnight() - now_minutes);
        prop_assert_eq!(info.is_past_stop, info.total_minutes <= 0);
        prop_assert!(!info.message.starts_with("0 "));
        prop_assert!(info.total_minutes >= -(24 * 60) && info.total_minutes < 24 * 60);
    }

    #[test]
    fn engine_functions_are_idempotent(
        energy in prop::option::of(energy_strategy()),
        tasks in prop::collection::vec(task_strategy(), 0..10),
        stop in hard_stop_strategy(),
        now in time_strategy(),
    ) {
        prop_assert_eq!(capacity_info(energy, &tasks), capacity_info(energy, &tasks));
        prop_assert_eq!(time_until_stop(stop, now), time_until_stop(stop, now));
        let past = time_until_stop(stop, now).is_past_stop;
        prop_assert_eq!(
            contextual_message(&tasks, past, energy),
            contextual_message(&tasks, past, energy)
        );
    }

    #[test]
    fn unset_energy_always_prompts(
        tasks in prop::collection::vec(task_strategy(), 0..10),
        past in any::<bool>(),
    ) {
        let msg = contextual_message(&tasks, past, None);
        prop_assert_eq!(msg.message_type, MessageType::SetEnergy);
        prop_assert_eq!(msg.action, Some(GuidanceAction::SetEnergy));
        prop_assert!(!capacity_info(None, &tasks).can_add_task);
    }
}
