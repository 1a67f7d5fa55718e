//! # Dayweather Core Library
//!
//! Core logic for a gentle daily planner. The CLI binary is a thin layer
//! over this crate: it loads state from storage, hands plain data to the
//! engine, and prints what comes back.
//!
//! ## Architecture
//!
//! - **Capacity model**: maps the day's energy level ("internal weather")
//!   to a budget of complexity-weighted focus work
//! - **Hard stop**: minutes left until the configured end of the work day,
//!   evaluated against an injected `now`
//! - **Guidance**: one coaching message chosen from a fixed rule table
//! - **Storage**: SQLite for tasks, check-ins, barriers and reflections,
//!   TOML for configuration
//!
//! The first three are pure functions. Callers re-run them after every
//! mutation and on a timer tick; [`DayPlan::recompute`] bundles all three.
//!
//! ## Key Components
//!
//! - [`capacity_info`]: Budget view for an energy level and task list
//! - [`time_until_stop`]: Time left before the hard stop
//! - [`contextual_message`]: The coaching message to show
//! - [`Database`]: Day persistence
//! - [`Config`]: Application configuration management

pub mod boundary;
pub mod energy;
pub mod error;
pub mod guidance;
pub mod plan;
pub mod storage;
pub mod task;

pub use boundary::{time_until_stop, HardStop, TimeInfo};
pub use energy::{capacity_info, CapacityInfo, CapacityPolicy, EnergyLevel};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use guidance::{contextual_message, ContextualMessage, GuidanceAction, MessageType};
pub use plan::{DayPlan, DaySnapshot};
pub use storage::{Barrier, CheckIn, Config, Database, Reflection};
pub use task::{NewTask, Task, TaskComplexity, TaskType};
