//! Task types.
//!
//! Tasks come in two kinds: focus tasks count against the day's capacity,
//! life (maintenance) tasks are tracked for completion only. Task shape is
//! validated when a [`NewTask`] is built, so the capacity engine can treat
//! every [`Task`] it receives as well-formed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How much effort a task takes.
///
/// Ordered from smallest to largest; the derived `Ord` follows declaration
/// order and the capacity weights follow the same order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    Quick,
    Medium,
    Deep,
}

impl TaskComplexity {
    /// All tiers, smallest first.
    pub const ALL: [TaskComplexity; 3] = [
        TaskComplexity::Quick,
        TaskComplexity::Medium,
        TaskComplexity::Deep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskComplexity::Quick => "quick",
            TaskComplexity::Medium => "medium",
            TaskComplexity::Deep => "deep",
        }
    }
}

impl Default for TaskComplexity {
    fn default() -> Self {
        TaskComplexity::Medium
    }
}

impl fmt::Display for TaskComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskComplexity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(TaskComplexity::Quick),
            "medium" => Ok(TaskComplexity::Medium),
            "deep" => Ok(TaskComplexity::Deep),
            _ => Err(ValidationError::UnknownComplexity(s.to_string())),
        }
    }
}

/// Whether a task is meaningful work or maintenance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Counted against the capacity budget
    Focus,
    /// Life maintenance; tracked but never consumes capacity
    Life,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Focus => "focus",
            TaskType::Life => "life",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focus" => Ok(TaskType::Focus),
            "life" => Ok(TaskType::Life),
            _ => Err(ValidationError::UnknownTaskType(s.to_string())),
        }
    }
}

/// A task as seen by the capacity engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub completed: bool,
    pub complexity: TaskComplexity,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

impl Task {
    pub fn is_focus(&self) -> bool {
        self.task_type == TaskType::Focus
    }

    /// Flip the completed flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// A validated task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    description: String,
    complexity: TaskComplexity,
    task_type: TaskType,
}

impl NewTask {
    /// Build a new task, trimming the description.
    ///
    /// # Errors
    /// Returns [`ValidationError::Empty`] if the description is blank.
    pub fn new(
        description: &str,
        complexity: TaskComplexity,
        task_type: TaskType,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::Empty("description"));
        }
        Ok(Self {
            description: description.to_string(),
            complexity,
            task_type,
        })
    }

    pub fn focus(description: &str, complexity: TaskComplexity) -> Result<Self, ValidationError> {
        Self::new(description, complexity, TaskType::Focus)
    }

    pub fn life(description: &str) -> Result<Self, ValidationError> {
        Self::new(description, TaskComplexity::Quick, TaskType::Life)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn complexity(&self) -> TaskComplexity {
        self.complexity
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Attach an id, producing an incomplete [`Task`].
    pub fn with_id(self, id: impl Into<String>) -> Task {
        Task {
            id: id.into(),
            description: self.description,
            completed: false,
            complexity: self.complexity,
            task_type: self.task_type,
        }
    }
}
