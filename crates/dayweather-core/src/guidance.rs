//! Picks the one coaching message to show for the current day state.
//!
//! Rules are checked in order and the first match wins:
//!
//! 1. energy not set yet
//! 2. past the hard stop with focus work still open
//! 3. every focus task done
//! 4. no focus tasks yet and the energy level has room for some
//! 5. nothing to say

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::energy::{CapacityPolicy, EnergyLevel};
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    SetEnergy,
    RestNow,
    Celebrate,
    AddFirstTask,
    None,
}

/// What the caller should offer as a button next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidanceAction {
    #[serde(rename = "set energy")]
    SetEnergy,
    #[serde(rename = "add task")]
    AddTask,
}

impl GuidanceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuidanceAction::SetEnergy => "set energy",
            GuidanceAction::AddTask => "add task",
        }
    }
}

impl fmt::Display for GuidanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub message: String,
    pub action: Option<GuidanceAction>,
}

impl ContextualMessage {
    fn new(message_type: MessageType, message: &str, action: Option<GuidanceAction>) -> Self {
        Self {
            message_type,
            message: message.to_string(),
            action,
        }
    }

    /// Whether the caller should render anything.
    pub fn is_empty(&self) -> bool {
        self.message_type == MessageType::None
    }
}

/// Select the message using the default capacity policy.
pub fn contextual_message(
    tasks: &[Task],
    is_past_stop: bool,
    energy: Option<EnergyLevel>,
) -> ContextualMessage {
    contextual_message_with_policy(&CapacityPolicy::default(), tasks, is_past_stop, energy)
}

/// Select the message, judging "energy allows tasks" against `policy`.
pub fn contextual_message_with_policy(
    policy: &CapacityPolicy,
    tasks: &[Task],
    is_past_stop: bool,
    energy: Option<EnergyLevel>,
) -> ContextualMessage {
    let Some(energy) = energy else {
        return ContextualMessage::new(
            MessageType::SetEnergy,
            "How's your internal weather today? Check in with your energy first.",
            Some(GuidanceAction::SetEnergy),
        );
    };

    let mut focus = tasks.iter().filter(|t| t.is_focus()).peekable();
    let has_focus = focus.peek().is_some();
    let all_done = focus.all(|t| t.completed);

    if is_past_stop && has_focus && !all_done {
        return ContextualMessage::new(
            MessageType::RestNow,
            "You're past your hard stop. Whatever is left can wait for tomorrow.",
            None,
        );
    }

    if has_focus && all_done {
        return ContextualMessage::new(
            MessageType::Celebrate,
            "Every focus task is done. That counts, let it land.",
            None,
        );
    }

    if !has_focus && policy.ceiling(energy) > 0.0 {
        return ContextualMessage::new(
            MessageType::AddFirstTask,
            "Energy is set. Pick one thing that matters today.",
            Some(GuidanceAction::AddTask),
        );
    }

    ContextualMessage::new(MessageType::None, "", None)
}
