//! # Drive Equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptError;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Motion measured by the wheel encoders since the previous odometry report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdomDelta {
    /// Distance travelled along the rover's forward axis, negative when reversing.
    pub distance: f64,

    /// Rotation about the rover's centre, positive clockwise.
    ///
    /// Units: degrees
    pub rotation_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A differential drive unit able to point turn and travel in a straight line.
pub trait Drive {
    /// Start a point turn of `angle_deg` degrees, positive clockwise.
    ///
    /// If `immediate_return` is true the call returns as soon as the turn has started, otherwise
    /// it blocks until the turn is complete.
    fn rotate(&mut self, angle_deg: f64, immediate_return: bool) -> Result<(), EqptError>;

    /// Start a straight line move of `distance`, positive forwards.
    ///
    /// If `immediate_return` is true the call returns as soon as the move has started, otherwise
    /// it blocks until the move is complete.
    fn travel(&mut self, distance: f64, immediate_return: bool) -> Result<(), EqptError>;

    /// Halt any motion in progress.
    fn stop(&mut self) -> Result<(), EqptError>;

    /// Returns true while a commanded motion is still in progress.
    fn is_moving(&mut self) -> Result<bool, EqptError>;

    /// Return the odometry accumulated since the last call, and reset the accumulator.
    fn take_odometry(&mut self) -> Result<OdomDelta, EqptError>;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OdomDelta {
    /// Returns true if no motion was measured.
    pub fn is_zero(&self) -> bool {
        self.distance == 0.0 && self.rotation_deg == 0.0
    }
}
