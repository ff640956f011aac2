//! Implementations for the MnvrCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::thread;

use eqpt_if::{BumpSensors, Drive};
use log::{debug, trace};
use serde::Serialize;

// Internal
use super::{Interruption, MnvrCtrlError, MnvrOutcome, Params};
use crate::auto::{
    loc::{Point, Pose, PoseTracker},
    per::Mast,
};
use util::stop::StopToken;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Manoeuvre control module state
pub struct MnvrCtrl {
    params: Params,

    drive: Box<dyn Drive>,
    bumpers: Box<dyn BumpSensors>,
    mast: Mast,

    tracker: PoseTracker,
    stop: StopToken,

    trajectory: Vec<Point>,
    report: StatusReport,
}

/// Counters accumulated over all primitives executed by MnvrCtrl.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    pub num_rotations: u64,
    pub num_travels: u64,
    pub num_interruptions: u64,
    pub num_cancelled: u64,

    /// Total absolute distance reported by odometry.
    pub distance_travelled: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MnvrCtrl {
    pub fn new(
        params: Params,
        drive: Box<dyn Drive>,
        bumpers: Box<dyn BumpSensors>,
        mast: Mast,
        stop: StopToken,
    ) -> Self {
        let tracker = PoseTracker::new();

        Self {
            params,
            drive,
            bumpers,
            mast,
            trajectory: vec![tracker.current_pose().position],
            tracker,
            stop,
            report: StatusReport::default(),
        }
    }

    /// Turn on the spot by the given angle, positive clockwise.
    ///
    /// Only the bumpers are polled during a rotation, the range sensor looks along the heading
    /// and so sweeps across obstacles while turning.
    pub fn rotate_by(&mut self, angle_deg: f64) -> Result<MnvrOutcome, MnvrCtrlError> {
        debug!("Rotate by {:.1} deg", angle_deg);
        self.report.num_rotations += 1;

        self.drive.rotate(angle_deg, true)?;

        loop {
            self.wait_poll();
            self.update_pose()?;

            if self.stop.is_triggered() {
                return self.finish(MnvrOutcome::Cancelled);
            }

            let bump = self.bumpers.read()?;
            if bump.is_some() {
                return self.finish(MnvrOutcome::Interrupted(Interruption::Bump(bump)));
            }

            if !self.drive.is_moving()? {
                break;
            }
        }

        self.finish(MnvrOutcome::Completed)
    }

    /// Drive in a straight line along the current heading, negative distances drive backwards.
    ///
    /// The range sensor is only polled when driving forwards. A zero distance travel therefore
    /// only checks the bumpers.
    pub fn travel_distance(&mut self, distance: f64) -> Result<MnvrOutcome, MnvrCtrlError> {
        debug!("Travel {:.1}", distance);
        self.report.num_travels += 1;

        let reversing = distance < 0.0;
        let ranging = distance > 0.0;

        // A bumper closed at the start of a reverse is the contact being backed away from
        let mut bumpers_armed = !(reversing && self.bumpers.read()?.is_some());

        self.drive.travel(distance, true)?;

        loop {
            self.update_pose()?;

            if self.stop.is_triggered() {
                return self.finish(MnvrOutcome::Cancelled);
            }

            if let Some(interruption) = self.check_obstacle(ranging, &mut bumpers_armed)? {
                return self.finish(MnvrOutcome::Interrupted(interruption));
            }

            self.wait_poll();

            if !self.drive.is_moving()? {
                break;
            }
        }

        self.finish(MnvrOutcome::Completed)
    }

    /// Stop the drive regardless of what it is doing.
    pub fn halt(&mut self) -> Result<(), MnvrCtrlError> {
        debug!("Halting drive");
        self.drive.stop()?;
        self.update_pose()
    }

    /// Reset the pose estimate, only done at the start of a mission.
    pub fn reset_pose(&mut self, pose: Pose) {
        self.tracker.reset(pose);
        self.trajectory.clear();
        self.trajectory.push(pose.position);
    }

    pub fn pose(&self) -> &PoseTracker {
        &self.tracker
    }

    pub fn mast_mut(&mut self) -> &mut Mast {
        &mut self.mast
    }

    pub fn stop_token(&self) -> &StopToken {
        &self.stop
    }

    pub fn trajectory(&self) -> &[Point] {
        &self.trajectory
    }

    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Obstacle predicate polled during travel.
    fn check_obstacle(
        &mut self,
        ranging: bool,
        bumpers_armed: &mut bool,
    ) -> Result<Option<Interruption>, MnvrCtrlError> {
        let bump = self.bumpers.read()?;

        if bump.is_some() {
            if *bumpers_armed {
                return Ok(Some(Interruption::Bump(bump)));
            }
        } else {
            *bumpers_armed = true;
        }

        if ranging {
            let distance = self.mast.distance()?;
            trace!("Range ahead: {:.1}", distance);

            if distance < self.params.safety_distance {
                return Ok(Some(Interruption::Range { distance }));
            }
        }

        Ok(None)
    }

    /// Halt the drive if needed and record the end of a primitive.
    fn finish(&mut self, outcome: MnvrOutcome) -> Result<MnvrOutcome, MnvrCtrlError> {
        match outcome {
            MnvrOutcome::Completed => (),
            MnvrOutcome::Interrupted(_) => {
                self.report.num_interruptions += 1;
                self.drive.stop()?;
            }
            MnvrOutcome::Cancelled => {
                self.report.num_cancelled += 1;
                self.drive.stop()?;
            }
        }

        self.update_pose()?;
        self.trajectory.push(self.tracker.current_pose().position);

        debug!("Primitive ended: {:?}", outcome);

        Ok(outcome)
    }

    fn update_pose(&mut self) -> Result<(), MnvrCtrlError> {
        let delta = self.drive.take_odometry()?;

        if !delta.is_zero() {
            self.report.distance_travelled += delta.distance.abs();
            self.tracker.integrate(delta);
        }

        Ok(())
    }

    fn wait_poll(&self) {
        if self.params.poll_interval_ms > 0 {
            thread::sleep(self.params.poll_interval());
        }
    }
}
