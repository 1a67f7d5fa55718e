//! Persisted day records that sit around the task list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::boundary::HardStop;
use crate::energy::EnergyLevel;
use crate::error::ValidationError;

/// The morning check-in: energy and hard stop for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub date: NaiveDate,
    pub energy: Option<EnergyLevel>,
    pub hard_stop: HardStop,
    pub updated_at: DateTime<Utc>,
}

impl CheckIn {
    /// A fresh check-in with no energy picked yet.
    pub fn new(date: NaiveDate, hard_stop: HardStop) -> Self {
        Self {
            date,
            energy: None,
            hard_stop,
            updated_at: Utc::now(),
        }
    }
}

/// Something that got in the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub id: String,
    pub date: NaiveDate,
    /// Task the barrier blocked, if any
    pub task_id: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Barrier {
    /// # Errors
    /// Returns [`ValidationError::Empty`] for a blank description.
    pub fn new(
        date: NaiveDate,
        task_id: Option<String>,
        description: &str,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::Empty("barrier"));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            task_id,
            description: description.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Evening reflection, one per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub date: NaiveDate,
    pub went_well: String,
    pub was_hard: String,
    /// How the energy actually felt, 1 (drained) to 5 (great)
    pub energy_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl Reflection {
    /// # Errors
    /// At least one of the two prompts must be answered, and the rating
    /// must be within 1..=5.
    pub fn new(
        date: NaiveDate,
        went_well: &str,
        was_hard: &str,
        energy_rating: Option<u8>,
    ) -> Result<Self, ValidationError> {
        let went_well = went_well.trim();
        let was_hard = was_hard.trim();
        if went_well.is_empty() && was_hard.is_empty() {
            return Err(ValidationError::Empty("reflection"));
        }
        if let Some(rating) = energy_rating {
            if !(1..=5).contains(&rating) {
                return Err(ValidationError::InvalidValue {
                    field: "energy_rating".into(),
                    message: format!("{rating} is outside 1-5"),
                });
            }
        }
        Ok(Self {
            date,
            went_well: went_well.to_string(),
            was_hard: was_hard.to_string(),
            energy_rating,
            created_at: Utc::now(),
        })
    }
}
