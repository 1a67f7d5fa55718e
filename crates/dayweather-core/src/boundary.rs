//! Time remaining until the hard stop.
//!
//! The hard stop is compared against `now` on the same day only. Once the
//! clock passes it, the result stays "past" with a negative overage until
//! midnight; it never rolls over to tomorrow's stop.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A validated 24-hour `HH:MM` time of day after which focus work stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HardStop {
    minutes: u16,
}

impl HardStop {
    /// Build from hour and minute.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidHardStop`] when out of range.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidHardStop(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.minutes)
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl Default for HardStop {
    fn default() -> Self {
        Self { minutes: 18 * 60 }
    }
}

impl fmt::Display for HardStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for HardStop {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidHardStop(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for HardStop {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HardStop> for String {
    fn from(value: HardStop) -> Self {
        value.to_string()
    }
}

/// Time left before the hard stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInfo {
    /// Minutes until the stop; zero or negative once past it
    pub total_minutes: i64,
    pub is_past_stop: bool,
    pub message: String,
}

/// Compute the time left until `hard_stop` as seen at `now`.
///
/// Seconds are ignored. Reaching the stop minute counts as past.
pub fn time_until_stop(hard_stop: HardStop, now: NaiveTime) -> TimeInfo {
    let now_minutes = i64::from(now.hour()) * 60 + i64::from(now.minute());
    let total_minutes = hard_stop.minutes_since_midnight() - now_minutes;
    let is_past_stop = total_minutes <= 0;

    TimeInfo {
        total_minutes,
        is_past_stop,
        message: format_remaining(total_minutes, is_past_stop),
    }
}

fn format_remaining(total_minutes: i64, is_past_stop: bool) -> String {
    if is_past_stop {
        return "Past your hard stop".to_string();
    }
    if total_minutes >= 60 {
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        if minutes == 0 {
            format!("{hours}h left")
        } else {
            format!("{hours}h {minutes}m left")
        }
    } else {
        format!("{} min left", total_minutes.max(1))
    }
}
