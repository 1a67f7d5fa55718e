//! Capacity policy and the derived budget view.

use serde::{Deserialize, Serialize};

use super::EnergyLevel;
use crate::error::ConfigError;
use crate::task::{Task, TaskComplexity};

/// Remainders at or below this are float residue from summing weights and
/// count as an exhausted budget.
const CAPACITY_EPSILON: f64 = 1e-9;

/// Static table of capacity ceilings per energy level and weights per
/// task complexity.
///
/// Ceilings must strictly decrease from `sparky` to `resting` with
/// `resting == 0`; weights must be positive and strictly increase from
/// `quick` to `deep`. [`CapacityPolicy::validate`] enforces both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPolicy {
    #[serde(default = "default_sparky")]
    pub sparky: f64,
    #[serde(default = "default_steady")]
    pub steady: f64,
    #[serde(default = "default_flowing")]
    pub flowing: f64,
    #[serde(default = "default_foggy")]
    pub foggy: f64,
    #[serde(default)]
    pub resting: f64,
    #[serde(default = "default_quick")]
    pub quick: f64,
    #[serde(default = "default_medium")]
    pub medium: f64,
    #[serde(default = "default_deep")]
    pub deep: f64,
}

fn default_sparky() -> f64 {
    4.0
}
fn default_steady() -> f64 {
    3.0
}
fn default_flowing() -> f64 {
    2.0
}
fn default_foggy() -> f64 {
    1.0
}
fn default_quick() -> f64 {
    0.5
}
fn default_medium() -> f64 {
    1.0
}
fn default_deep() -> f64 {
    2.0
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            sparky: default_sparky(),
            steady: default_steady(),
            flowing: default_flowing(),
            foggy: default_foggy(),
            resting: 0.0,
            quick: default_quick(),
            medium: default_medium(),
            deep: default_deep(),
        }
    }
}

/// Budget view derived from an energy level and a task snapshot.
///
/// Recomputed whenever tasks or energy change; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityInfo {
    pub total_capacity: f64,
    pub used_capacity: f64,
    pub remaining_capacity: f64,
    /// Share of the ceiling already spent, 0-100
    pub percent_used: f64,
    pub can_add_task: bool,
    /// Largest complexity that still fits, if any
    pub recommended_complexity: Option<TaskComplexity>,
}

impl CapacityPolicy {
    /// Capacity ceiling for an energy level.
    pub fn ceiling(&self, energy: EnergyLevel) -> f64 {
        match energy {
            EnergyLevel::Sparky => self.sparky,
            EnergyLevel::Steady => self.steady,
            EnergyLevel::Flowing => self.flowing,
            EnergyLevel::Foggy => self.foggy,
            EnergyLevel::Resting => self.resting,
        }
    }

    /// Budget consumed by one task of the given complexity.
    pub fn weight(&self, complexity: TaskComplexity) -> f64 {
        match complexity {
            TaskComplexity::Quick => self.quick,
            TaskComplexity::Medium => self.medium,
            TaskComplexity::Deep => self.deep,
        }
    }

    /// Sum of weights over focus tasks. Life tasks and completion state
    /// do not matter.
    pub fn used(&self, tasks: &[Task]) -> f64 {
        tasks
            .iter()
            .filter(|t| t.is_focus())
            .map(|t| self.weight(t.complexity))
            .sum()
    }

    /// Largest complexity tier whose weight fits within `remaining`.
    pub fn recommend(&self, remaining: f64) -> Option<TaskComplexity> {
        TaskComplexity::ALL
            .iter()
            .rev()
            .copied()
            .find(|c| self.weight(*c) <= remaining + CAPACITY_EPSILON)
    }

    /// Derive the budget view. An unset energy is the empty state: zero
    /// ceiling and no room for tasks.
    pub fn capacity_info(&self, energy: Option<EnergyLevel>, tasks: &[Task]) -> CapacityInfo {
        let total = energy.map(|e| self.ceiling(e)).unwrap_or(0.0);
        let used = self.used(tasks);
        let remaining = match total - used {
            left if left > CAPACITY_EPSILON => left,
            _ => 0.0,
        };
        let percent_used = if total > 0.0 {
            (used / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        CapacityInfo {
            total_capacity: total,
            used_capacity: used,
            remaining_capacity: remaining,
            percent_used,
            can_add_task: remaining > 0.0,
            recommended_complexity: self.recommend(remaining),
        }
    }

    /// Check the ordering contract of the table.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first broken rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: format!("capacity.{key}"),
            message,
        };

        for (key, value) in [
            ("sparky", self.sparky),
            ("steady", self.steady),
            ("flowing", self.flowing),
            ("foggy", self.foggy),
            ("resting", self.resting),
            ("quick", self.quick),
            ("medium", self.medium),
            ("deep", self.deep),
        ] {
            if !value.is_finite() {
                return Err(invalid(key, format!("{value} is not a finite number")));
            }
        }

        if self.resting != 0.0 {
            return Err(invalid("resting", "resting capacity must be 0".into()));
        }

        for pair in EnergyLevel::ALL.windows(2) {
            let (higher, lower) = (pair[0], pair[1]);
            if self.ceiling(higher) <= self.ceiling(lower) {
                return Err(invalid(
                    higher.as_str(),
                    format!(
                        "must be greater than {} ({} <= {})",
                        lower,
                        self.ceiling(higher),
                        self.ceiling(lower)
                    ),
                ));
            }
        }

        if self.quick <= 0.0 {
            return Err(invalid("quick", "weights must be positive".into()));
        }
        for pair in TaskComplexity::ALL.windows(2) {
            let (smaller, larger) = (pair[0], pair[1]);
            if self.weight(smaller) >= self.weight(larger) {
                return Err(invalid(
                    larger.as_str(),
                    format!(
                        "must be greater than {} ({} >= {})",
                        smaller,
                        self.weight(smaller),
                        self.weight(larger)
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// [`CapacityPolicy::capacity_info`] with the default policy.
pub fn capacity_info(energy: Option<EnergyLevel>, tasks: &[Task]) -> CapacityInfo {
    CapacityPolicy::default().capacity_info(energy, tasks)
}
