//! # Rover library.
//!
//! This library allows other crates in the workspace to access items defined inside the rover
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomy - exploration, navigation, localisation and mapping
pub mod auto;

/// Manoeuvre control module - executes interruptible rotate and travel primitives
pub mod mnvr_ctrl;

/// Mission driver - start, run and finish a mission
pub mod mission;

/// Rover executable parameters
pub mod params;

/// Simulated rover - provides equipment when no hardware is attached
pub mod sim;
