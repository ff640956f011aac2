//! Parameters of the simulated rover and its world

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Simulated time advanced by each drive poll.
    ///
    /// Units: seconds
    pub dt_s: f64,

    /// Units: distance/second
    pub linear_speed: f64,

    /// Units: degrees/second
    pub angular_speed_deg: f64,

    /// Radius of the rover body around its centre.
    pub body_radius: f64,

    /// Gap to an obstacle surface under which a bumper closes.
    pub contact_tolerance: f64,

    /// Reading returned when nothing is in range.
    pub max_range: f64,

    /// Walls of the rectangular arena.
    pub arena: Arena,

    /// Maximum relative error added to each odometry increment, 0 disables noise.
    pub odom_noise: f64,

    /// Seed of the odometry noise generator.
    pub noise_seed: u64,

    /// Time the mission against the wall clock rather than simulated time.
    pub realtime_clock: bool,

    #[serde(default)]
    pub obstacles: Vec<CircleObstacle>,
}

/// Axis aligned walls enclosing the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// A circular obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleObstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            dt_s: 0.05,
            linear_speed: 20.0,
            angular_speed_deg: 90.0,
            body_radius: 8.0,
            contact_tolerance: 1.0,
            max_range: 255.0,
            arena: Arena::default(),
            odom_noise: 0.0,
            noise_seed: 0,
            realtime_clock: false,
            obstacles: Vec::new(),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            min_x: -500.0,
            max_x: 500.0,
            min_y: -500.0,
            max_y: 500.0,
        }
    }
}
