//! The day's plan and its derived snapshot.
//!
//! `DayPlan` holds the inputs (energy, hard stop, tasks). Nothing is derived
//! eagerly: the caller invokes [`DayPlan::recompute`] after a mutation and
//! on a timer tick, typically once per minute.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::boundary::{time_until_stop, HardStop, TimeInfo};
use crate::energy::{CapacityInfo, CapacityPolicy, EnergyLevel};
use crate::error::ValidationError;
use crate::guidance::{contextual_message_with_policy, ContextualMessage};
use crate::task::{Task, TaskType};

/// Everything the caller renders for the current moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub energy: Option<EnergyLevel>,
    pub hard_stop: HardStop,
    pub capacity: CapacityInfo,
    pub time: TimeInfo,
    pub guidance: ContextualMessage,
}

#[derive(Debug, Clone, Default)]
pub struct DayPlan {
    policy: CapacityPolicy,
    energy: Option<EnergyLevel>,
    hard_stop: HardStop,
    tasks: Vec<Task>,
}

impl DayPlan {
    pub fn new(hard_stop: HardStop) -> Self {
        Self {
            hard_stop,
            ..Self::default()
        }
    }

    /// Use a non-default capacity policy. The policy is assumed validated.
    pub fn with_policy(mut self, policy: CapacityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn energy(&self) -> Option<EnergyLevel> {
        self.energy
    }

    pub fn hard_stop(&self) -> HardStop {
        self.hard_stop
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn policy(&self) -> &CapacityPolicy {
        &self.policy
    }

    pub fn set_energy(&mut self, energy: Option<EnergyLevel>) {
        self.energy = energy;
    }

    /// Replace the snapshot with tasks loaded from storage.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Current capacity view.
    pub fn capacity(&self) -> CapacityInfo {
        self.policy.capacity_info(self.energy, &self.tasks)
    }

    /// Add a task to the plan.
    ///
    /// # Errors
    /// Focus tasks are refused with [`ValidationError::CapacityExhausted`]
    /// once no capacity remains. Life tasks are always accepted.
    pub fn add_task(&mut self, task: Task) -> Result<(), ValidationError> {
        self.ensure_room_for(task.task_type)?;
        self.tasks.push(task);
        Ok(())
    }

    /// Check whether a task of this type may be added right now.
    ///
    /// # Errors
    /// [`ValidationError::CapacityExhausted`] for a focus task when the
    /// budget is spent or energy is unset.
    pub fn ensure_room_for(&self, task_type: TaskType) -> Result<(), ValidationError> {
        if task_type == TaskType::Life {
            return Ok(());
        }
        let capacity = self.capacity();
        if !capacity.can_add_task {
            return Err(ValidationError::CapacityExhausted {
                used: capacity.used_capacity,
                total: capacity.total_capacity,
            });
        }
        Ok(())
    }

    /// Toggle a task's completion. Returns the new state, or `None` if
    /// no task has that id.
    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.toggle();
        Some(task.completed)
    }

    /// Remove a task. Returns it if it was present.
    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Derive capacity, time and guidance for `now`.
    pub fn recompute(&self, now: NaiveTime) -> DaySnapshot {
        let capacity = self.capacity();
        let time = time_until_stop(self.hard_stop, now);
        let guidance =
            contextual_message_with_policy(&self.policy, &self.tasks, time.is_past_stop, self.energy);

        tracing::debug!(
            energy = ?self.energy,
            tasks = self.tasks.len(),
            remaining = capacity.remaining_capacity,
            minutes_left = time.total_minutes,
            guidance = ?guidance.message_type,
            "recomputed day snapshot"
        );

        DaySnapshot {
            energy: self.energy,
            hard_stop: self.hard_stop,
            capacity,
            time,
            guidance,
        }
    }
}
