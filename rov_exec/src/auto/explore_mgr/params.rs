//! # Exploration Manager Parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::auto::per::SweepParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the exploration manager and all its states.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExploreParams {
    /// Distance of each free exploration advance.
    pub advance_step: f64,

    /// Signed distance travelled after an interruption, negative to reverse away from it.
    pub backoff_distance: f64,

    /// Number of backoffs attempted when backing off is itself interrupted.
    pub max_backoff_attempts: u32,

    /// Sweep samples closer than this are added to the obstacle map.
    pub clutter_threshold: f64,

    /// If no sweep sample is clearer than this the rover turns around.
    pub min_clearance: f64,

    /// The directional sweep made while recovering.
    pub sweep: SweepParams,

    /// Length of the exploration phase.
    ///
    /// Units: seconds
    pub mission_duration_s: f64,

    /// Optional limit on the number of completed advances, used for scripted plans.
    pub max_advances: Option<u64>,

    /// Distance travelled on the new heading after a blocked attempt to return home.
    pub home_detour_distance: f64,

    /// Number of attempts made to return home before giving up.
    pub max_home_attempts: u32,

    /// Seed for the heading tie-break, entropy is used if not set.
    pub rng_seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ExploreParams {
    fn default() -> Self {
        Self {
            advance_step: 100.0,
            backoff_distance: -15.0,
            max_backoff_attempts: 3,
            clutter_threshold: 150.0,
            min_clearance: 30.0,
            sweep: SweepParams::default(),
            mission_duration_s: 180.0,
            max_advances: None,
            home_detour_distance: 50.0,
            max_home_attempts: 20,
            rng_seed: None,
        }
    }
}
