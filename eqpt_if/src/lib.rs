//! # Equipment interface crate.
//!
//! Provides the interfaces through which the rover software reaches its
//! equipment: the drive, the range sensor and its steerable head, the bumpers,
//! and the operator signalling devices. Hardware drivers and simulations
//! implement these traits, the autonomy code only ever talks to the traits.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Equipment traits and the data they exchange
pub mod eqpt;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use eqpt::{
    bump::{BumpEvent, BumpSensors},
    drive::{Drive, OdomDelta},
    range::{RangeSensor, SensorHead},
    signal::{Feedback, UserSignal},
    Eqpt, EqptError,
};
