//! Manoeuvre control module
//!
//! Executes the rover's two motion primitives, point turns and straight line travel, while
//! polling for obstacles. Any requested primitive either finishes or is safely halted.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use eqpt_if::{BumpEvent, EqptError};
use serde::Serialize;

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Result of a motion primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MnvrOutcome {
    /// The drive reported the motion finished.
    Completed,

    /// An obstacle was sensed and the drive halted.
    Interrupted(Interruption),

    /// The operator stop token was triggered and the drive halted.
    Cancelled,
}

/// Reason a primitive was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Interruption {
    /// A bumper was pressed.
    Bump(BumpEvent),

    /// The range sensor measured an obstacle inside the safety distance.
    Range { distance: f64 },
}

/// Possible errors that can occur during MnvrCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum MnvrCtrlError {
    #[error("Equipment error during manoeuvre: {0}")]
    EqptError(#[from] EqptError),
}

