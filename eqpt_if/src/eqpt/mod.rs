//! # Equipment Interface
//!
//! This module defines the traits implemented by each piece of equipment, and the bundle handed to
//! the autonomy system.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod bump;
pub mod drive;
pub mod range;
pub mod signal;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// All equipment of the rover.
pub struct Eqpt {
    /// Differential drive unit
    pub drive: Box<dyn drive::Drive>,

    /// Forward-looking range sensor
    pub range: Box<dyn range::RangeSensor>,

    /// Motor steering the range sensor
    pub head: Box<dyn range::SensorHead>,

    /// Front left and right bumpers
    pub bumpers: Box<dyn bump::BumpSensors>,

    /// Sound, light, and display used to talk to the operator
    pub signal: Box<dyn signal::UserSignal>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors raised by equipment.
///
/// These are hardware layer faults and are not expected to be transient, users should abort
/// rather than retry.
#[derive(Debug, Error)]
pub enum EqptError {
    #[error("Equipment {0} is not connected")]
    NotConnected(&'static str),

    #[error("Equipment {0} did not acknowledge the command: {1}")]
    NoAck(&'static str, String),

    #[error("Equipment {0} reported a fault: {1}")]
    Fault(&'static str, String),
}
