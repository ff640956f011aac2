//! # Operator Signalling Equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Kinds of feedback the rover gives the operator through tones and lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Something went well, e.g. mission completed
    Positive,

    /// Informational, e.g. a new heading has been chosen
    Neutral,

    /// Something went wrong, e.g. an obstacle was hit
    Negative,

    /// The rover is returning to its start point
    GoingBack,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Operator facing signals. The autonomy system calls these at defined points of the mission but
/// leaves the actual behaviour to the implementation.
pub trait UserSignal {
    /// Signal readiness and block until the operator confirms the mission may start.
    fn wait_for_user(&mut self) -> Result<(), EqptError>;

    /// Give the operator a feedback signal.
    fn feedback(&mut self, feedback: Feedback) -> Result<(), EqptError>;

    /// Show a message on the rover's display.
    fn display(&mut self, message: &str) -> Result<(), EqptError>;
}
