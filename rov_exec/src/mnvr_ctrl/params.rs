//! Parameters structure for MnvrCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Manoeuvre control.
///
/// The safety distance must exceed the distance the rover closes in one poll interval, with some
/// margin, or obstacles can be reached between two polls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Time between two obstacle polls during a primitive.
    ///
    /// Units: milliseconds
    pub poll_interval_ms: u64,

    /// Range reading below which travel is interrupted.
    pub safety_distance: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            safety_distance: 15.0,
        }
    }
}

impl Params {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
