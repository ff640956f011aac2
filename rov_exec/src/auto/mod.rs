//! # Autonomy Module
//!
//! This module provides the autonomy of the rover, allowing it to explore its surroundings by
//! itself while mapping the obstacles it finds.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use explore_mgr::ExploreMgr;

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Exploration Manager module
pub mod explore_mgr;

/// Localisation module - provides the rover with an idea of where it is in the world
pub mod loc;

/// Navigation module - drives the rover through a queue of waypoints
pub mod nav;

/// Map module - provides the obstacle map and its export
pub mod map;

/// Perception module - sweeps the range sensor
pub mod per;
