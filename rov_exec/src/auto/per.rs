//! # Perception module
//!
//! Provides the [`Mast`], the rover's steerable range sensor, and the directional sweep used to
//! find the clearest way forward.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{thread, time::Duration};

use eqpt_if::{EqptError, RangeSensor, SensorHead};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The range sensor and the head it is mounted on.
pub struct Mast {
    range: Box<dyn RangeSensor>,
    head: Box<dyn SensorHead>,
}

/// One range reading of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSample {
    /// Head angle relative to the rover's heading, positive clockwise.
    ///
    /// Units: degrees
    pub bearing_deg: i32,

    /// Measured range
    pub range: f64,
}

/// The samples of a single sweep, in the order they were taken.
pub type ScanResult = Vec<ScanSample>;

/// Parameters of the directional sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepParams {
    /// First head angle of the sweep, degrees.
    pub min_deg: i32,

    /// Last head angle of the sweep, degrees. Included if it falls on a step.
    pub max_deg: i32,

    /// Angular step between samples, degrees.
    pub step_deg: u32,

    /// Time to wait after moving the head before pinging.
    pub settle_ms: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            min_deg: -90,
            max_deg: 90,
            step_deg: 10,
            settle_ms: 50,
        }
    }
}

impl SweepParams {
    /// Head angles visited by the sweep.
    pub fn bearings(&self) -> Vec<i32> {
        if self.step_deg == 0 || self.min_deg > self.max_deg {
            return Vec::new();
        }

        (self.min_deg..=self.max_deg)
            .step_by(self.step_deg as usize)
            .collect()
    }
}

impl Mast {
    pub fn new(range: Box<dyn RangeSensor>, head: Box<dyn SensorHead>) -> Self {
        Self { range, head }
    }

    /// Measure the range along the current head angle.
    pub fn distance(&mut self) -> Result<f64, EqptError> {
        self.range.ping()?;
        self.range.get_distance()
    }

    /// Sweep the head across the configured arc, returning to straight ahead afterwards.
    pub fn sweep(&mut self, params: &SweepParams) -> Result<ScanResult, EqptError> {
        let mut scan = ScanResult::new();

        for bearing_deg in params.bearings() {
            self.head.set_angle(bearing_deg)?;

            if params.settle_ms > 0 {
                thread::sleep(Duration::from_millis(params.settle_ms));
            }

            let range = self.distance()?;
            trace!("Sweep sample {:4} deg: {:.1}", bearing_deg, range);

            scan.push(ScanSample { bearing_deg, range });
        }

        self.head.set_angle(0)?;

        debug!("Sweep complete with {} samples", scan.len());

        Ok(scan)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Range sensor returning the head angle as its distance, so samples can be matched to angles.
    struct AngleRange(Rc<Cell<i32>>);
    struct TestHead(Rc<Cell<i32>>);

    impl RangeSensor for AngleRange {
        fn ping(&mut self) -> Result<(), EqptError> {
            Ok(())
        }

        fn get_distance(&mut self) -> Result<f64, EqptError> {
            Ok(100.0 + self.0.get() as f64)
        }
    }

    impl SensorHead for TestHead {
        fn set_angle(&mut self, angle_deg: i32) -> Result<(), EqptError> {
            self.0.set(angle_deg);
            Ok(())
        }

        fn get_angle(&mut self) -> Result<i32, EqptError> {
            Ok(self.0.get())
        }
    }

    #[test]
    fn test_sweep() {
        let angle = Rc::new(Cell::new(0));
        let mut mast = Mast::new(
            Box::new(AngleRange(angle.clone())),
            Box::new(TestHead(angle.clone())),
        );

        let params = SweepParams {
            settle_ms: 0,
            ..Default::default()
        };

        let scan = mast.sweep(&params).unwrap();

        assert_eq!(scan.len(), 19);
        assert_eq!(scan[0], ScanSample { bearing_deg: -90, range: 10.0 });
        assert_eq!(scan[18], ScanSample { bearing_deg: 90, range: 190.0 });
        assert_eq!(angle.get(), 0);
    }

    #[test]
    fn test_bearings() {
        let params = SweepParams {
            min_deg: -30,
            max_deg: 35,
            step_deg: 20,
            settle_ms: 0,
        };
        assert_eq!(params.bearings(), vec![-30, -10, 10, 30]);

        let params = SweepParams {
            step_deg: 0,
            ..Default::default()
        };
        assert!(params.bearings().is_empty());
    }
}
