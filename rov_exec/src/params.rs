//! # Rover Executable Parameters
//!
//! This module provide parameters for a mission of the rover executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{
    auto::{explore_mgr::ExploreParams, loc::Point},
    mnvr_ctrl,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionParams {
    /// Parameters of the motion primitives
    pub mnvr_ctrl: mnvr_ctrl::Params,

    /// Parameters of the exploration behaviour
    pub explore: ExploreParams,

    /// Waypoints visited in order before free exploration starts
    #[serde(default)]
    pub waypoints: Vec<Point>,
}
