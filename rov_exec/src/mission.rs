//! # Mission
//!
//! Runs a single mission of the rover: waits for the operator, explores until the mission ends,
//! and then exports the obstacle map, trajectory and a summary report.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use eqpt_if::{Eqpt, EqptError, Feedback};
use log::{error, info};
use serde::Serialize;

use crate::{
    auto::{
        explore_mgr::{ExploreMgr, ExploreMgrError, ExploreMode, ExploreStats},
        loc::Pose,
        map::{export, ExportError},
        nav::Navigator,
        per::Mast,
    },
    mnvr_ctrl::{MnvrCtrl, MnvrCtrlError, StatusReport},
    params::MissionParams,
};
use util::stop::StopToken;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

pub const MAP_FILE_NAME: &str = "obstacle_map.csv";
pub const TRAJECTORY_FILE_NAME: &str = "trajectory.csv";
pub const REPORT_FILE_NAME: &str = "mission_report.json";

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Source of the time used to enforce the mission duration.
pub trait MissionClock {
    /// Mark the start of the mission.
    fn start(&mut self);

    /// Seconds since the mission started.
    fn elapsed_s(&self) -> f64;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct Mission {
    explore: ExploreMgr,
}

/// Mission clock using the system's monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

/// Summary of a mission, saved alongside the exported map.
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub duration_s: f64,
    pub final_pose: Pose,
    pub num_obstacles: usize,
    pub stopped_by_operator: bool,
    pub explore: ExploreStats,
    pub mnvr_ctrl: StatusReport,
    pub mode_trace: Vec<ExploreMode>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("Exploration failed: {0}")]
    ExploreError(#[from] ExploreMgrError),

    #[error("Manoeuvre control error: {0}")]
    MnvrCtrlError(#[from] MnvrCtrlError),

    #[error("Equipment error: {0}")]
    EqptError(#[from] EqptError),

    #[error("Could not export mission data: {0}")]
    ExportError(#[from] ExportError),

    #[error("Could not create the output directory {0:?}: {1}")]
    OutputDirError(PathBuf, std::io::Error),

    #[error("Could not serialise the mission report: {0}")]
    ReportSerialiseError(serde_json::Error),

    #[error("Could not write the mission report to {0:?}: {1}")]
    ReportWriteError(PathBuf, std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Mission {
    pub fn new(
        params: &MissionParams,
        eqpt: Eqpt,
        stop: StopToken,
        clock: Box<dyn MissionClock>,
    ) -> Self {
        let Eqpt {
            drive,
            range,
            head,
            bumpers,
            signal,
        } = eqpt;

        let ctrl = MnvrCtrl::new(
            params.mnvr_ctrl.clone(),
            drive,
            bumpers,
            Mast::new(range, head),
            stop,
        );
        let nav = Navigator::with_waypoints(params.waypoints.iter().copied());

        Self {
            explore: ExploreMgr::new(params.explore.clone(), ctrl, nav, signal, clock),
        }
    }

    /// Reset the pose to the origin and wait for the operator to start the mission.
    pub fn start_mission(&mut self) -> Result<(), MissionError> {
        let data = &mut self.explore.persistant;

        data.ctrl.reset_pose(Pose::default());
        data.origin = data.ctrl.pose().current_pose().position;

        data.signal.wait_for_user()?;
        data.signal.display("Mission started")?;
        data.clock.start();

        info!(
            "Mission started with {} waypoint(s), lasting {:.0} s",
            data.nav.num_waypoints(),
            self.explore.params.mission_duration_s
        );

        Ok(())
    }

    /// Explore until the mission ends and the rover has tried to return home.
    pub fn main_behaviour(&mut self) -> Result<(), MissionError> {
        self.explore.run()?;
        Ok(())
    }

    /// Export the mission data into `out_dir`, then tell the operator how it went.
    pub fn finish_mission<P: AsRef<Path>>(
        &mut self,
        out_dir: P,
    ) -> Result<MissionReport, MissionError> {
        let result = self.export(out_dir.as_ref());

        let signal = &mut self.explore.persistant.signal;
        if result.is_ok() {
            signal.feedback(Feedback::Positive)?;
            signal.display("Mission complete")?;
        } else {
            signal.feedback(Feedback::Negative)?;
            signal.display("Mission failed")?;
        }

        result
    }

    /// Halt the rover after a fatal error.
    ///
    /// Failures here are only logged since the mission is already being abandoned.
    pub fn abort(&mut self, reason: &str) {
        error!("Mission aborted: {}", reason);

        let data = &mut self.explore.persistant;

        if let Err(e) = data.ctrl.halt() {
            error!("Could not halt the drive: {}", e);
        }

        if let Err(e) = data.signal.feedback(Feedback::Negative) {
            error!("Could not signal the abort: {}", e);
        }

        if let Err(e) = data.signal.display(&format!("Mission aborted: {}", reason)) {
            error!("Could not display the abort: {}", e);
        }
    }

    pub fn explore(&self) -> &ExploreMgr {
        &self.explore
    }

    pub fn report(&self) -> MissionReport {
        let data = &self.explore.persistant;

        MissionReport {
            duration_s: data.clock.elapsed_s(),
            final_pose: data.ctrl.pose().current_pose(),
            num_obstacles: data.map.len(),
            stopped_by_operator: data.stopped_by_operator,
            explore: data.stats,
            mnvr_ctrl: *data.ctrl.report(),
            mode_trace: self.explore.mode_trace().to_vec(),
        }
    }

    fn export(&self, out_dir: &Path) -> Result<MissionReport, MissionError> {
        fs::create_dir_all(out_dir)
            .map_err(|e| MissionError::OutputDirError(out_dir.to_path_buf(), e))?;

        let data = &self.explore.persistant;

        export::save_points(out_dir.join(MAP_FILE_NAME), data.map.points())?;
        export::save_points(out_dir.join(TRAJECTORY_FILE_NAME), data.ctrl.trajectory())?;

        let report = self.report();
        let report_path = out_dir.join(REPORT_FILE_NAME);

        let json =
            serde_json::to_string_pretty(&report).map_err(MissionError::ReportSerialiseError)?;
        fs::write(&report_path, json)
            .map_err(|e| MissionError::ReportWriteError(report_path.clone(), e))?;

        info!("Mission report saved to {:?}", report_path);

        Ok(report)
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionClock for WallClock {
    fn start(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    use eqpt_if::{Drive, OdomDelta};

    use crate::{
        auto::loc::Point,
        sim::{self, Arena, CircleObstacle, RecordingSignal, SimClock, SimWorld},
    };

    /// Drive which accepts turns but fails every travel command.
    struct FailingDrive {
        stopped: Rc<Cell<bool>>,
    }

    impl Drive for FailingDrive {
        fn rotate(&mut self, _: f64, _: bool) -> Result<(), EqptError> {
            Ok(())
        }

        fn travel(&mut self, _: f64, _: bool) -> Result<(), EqptError> {
            Err(EqptError::NoAck("drive", String::from("motor controller timeout")))
        }

        fn stop(&mut self) -> Result<(), EqptError> {
            self.stopped.set(true);
            Ok(())
        }

        fn is_moving(&mut self) -> Result<bool, EqptError> {
            Ok(false)
        }

        fn take_odometry(&mut self) -> Result<OdomDelta, EqptError> {
            Ok(OdomDelta::default())
        }
    }

    /// Obstacle on the path of the second advance of a rover starting at the origin.
    const OBSTACLE: CircleObstacle = CircleObstacle {
        x: 170.0,
        y: 0.0,
        radius: 10.0,
    };

    fn out_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rov_exec_test_{}_{}", name, std::process::id()))
    }

    fn scripted_params(max_advances: u64) -> MissionParams {
        let mut params = MissionParams::default();
        params.mnvr_ctrl.poll_interval_ms = 0;
        params.explore.sweep.settle_ms = 0;
        params.explore.max_advances = Some(max_advances);
        params.explore.rng_seed = Some(11);
        params
    }

    fn sim_mission(params: &MissionParams, sim_params: sim::Params) -> (Mission, sim::SharedWorld) {
        let world = SimWorld::shared(sim_params);

        let mission = Mission::new(
            params,
            sim::sim_eqpt(&world),
            StopToken::new(),
            Box::new(SimClock::new(&world)),
        );

        (mission, world)
    }

    #[test]
    fn test_obstructed_plan() {
        // The arena is off centre so the sweep after the obstruction has a single clearest bearing
        let sim_params = sim::Params {
            max_range: 1000.0,
            arena: Arena {
                min_x: -500.0,
                max_x: 500.0,
                min_y: -400.0,
                max_y: 600.0,
            },
            obstacles: vec![OBSTACLE],
            ..Default::default()
        };

        let (mut mission, world) = sim_mission(&scripted_params(3), sim_params);

        mission.start_mission().unwrap();
        mission.main_behaviour().unwrap();

        assert_eq!(
            mission.explore().mode_trace(),
            &[
                ExploreMode::Advancing,
                ExploreMode::Recovering,
                ExploreMode::Advancing,
                ExploreMode::Finished
            ]
        );

        let dir = out_dir("obstructed");
        let report = mission.finish_mission(&dir).unwrap();

        assert_eq!(report.explore.num_advances, 3);
        assert_eq!(report.explore.num_recoveries, 1);
        assert!(report.explore.returned_home);
        assert!(report.mnvr_ctrl.num_interruptions >= 1);

        // Back at the origin, in both the estimate and the world
        assert!(report.final_pose.distance_to(&Point::default()) < 1e-6);
        assert!(world.borrow().pose().distance_to(&Point::default()) < 1e-6);

        // The exported map shows the obstacle
        let file = fs::File::open(dir.join(MAP_FILE_NAME)).unwrap();
        let points = export::read_points(file).unwrap();
        assert_eq!(points.len(), report.num_obstacles);

        let centre = Point::new(OBSTACLE.x, OBSTACLE.y);
        assert!(points
            .iter()
            .any(|p| p.distance_to(&centre) <= OBSTACLE.radius + 2.0));

        let file = fs::File::open(dir.join(TRAJECTORY_FILE_NAME)).unwrap();
        assert!(export::read_points(file).unwrap().len() > 5);
        assert!(dir.join(REPORT_FILE_NAME).exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_waypoints_then_free() {
        let mut params = scripted_params(4);
        params.waypoints = vec![Point::new(100.0, 0.0), Point::new(100.0, 100.0)];

        let (mut mission, world) = sim_mission(&params, sim::Params::default());

        mission.start_mission().unwrap();
        mission.main_behaviour().unwrap();

        assert_eq!(
            mission.explore().mode_trace(),
            &[ExploreMode::Advancing, ExploreMode::Finished]
        );

        let report = mission.report();
        assert_eq!(report.explore.num_advances, 4);
        assert!(report.explore.returned_home);
        assert_eq!(report.num_obstacles, 0);
        assert!(world.borrow().pose().distance_to(&Point::default()) < 1e-6);
    }

    #[test]
    fn test_time_budget() {
        let mut params = MissionParams::default();
        params.mnvr_ctrl.poll_interval_ms = 0;
        params.explore.sweep.settle_ms = 0;
        params.explore.mission_duration_s = 12.0;
        params.explore.rng_seed = Some(5);

        let (mut mission, _) = sim_mission(&params, sim::Params::default());

        mission.start_mission().unwrap();
        mission.main_behaviour().unwrap();

        let report = mission.report();

        // Each free advance takes 5 s of simulated time
        assert_eq!(report.explore.num_advances, 3);
        assert_eq!(mission.explore().mode(), None);
        assert!(report.explore.returned_home);
    }

    #[test]
    fn test_operator_stop() {
        let params = scripted_params(10);
        let world = SimWorld::shared(sim::Params::default());
        let stop = StopToken::new();

        let mut mission = Mission::new(
            &params,
            sim::sim_eqpt(&world),
            stop.clone(),
            Box::new(SimClock::new(&world)),
        );

        mission.start_mission().unwrap();
        stop.trigger();
        mission.main_behaviour().unwrap();

        let report = mission.report();
        assert!(report.stopped_by_operator);
        assert_eq!(report.explore.num_advances, 0);
        assert_eq!(report.explore.num_home_attempts, 0);
        assert_eq!(
            mission.explore().mode_trace(),
            &[ExploreMode::Advancing, ExploreMode::Finished]
        );
    }

    #[test]
    fn test_equipment_failure_aborts() {
        let world = SimWorld::shared(sim::Params::default());
        let stopped = Rc::new(Cell::new(false));
        let signal = RecordingSignal::default();

        let mut eqpt = sim::sim_eqpt(&world);
        eqpt.drive = Box::new(FailingDrive {
            stopped: stopped.clone(),
        });
        eqpt.signal = Box::new(signal.clone());

        let mut mission = Mission::new(
            &scripted_params(3),
            eqpt,
            StopToken::new(),
            Box::new(SimClock::new(&world)),
        );

        mission.start_mission().unwrap();

        let err = mission.main_behaviour().unwrap_err();
        assert!(matches!(
            err,
            MissionError::ExploreError(ExploreMgrError::MnvrCtrlError(MnvrCtrlError::EqptError(
                EqptError::NoAck("drive", _)
            )))
        ));
        assert!(!stopped.get());

        mission.abort(&err.to_string());

        assert!(stopped.get());

        let log = signal.0.borrow();
        assert_eq!(log.feedback.last(), Some(&Feedback::Negative));

        let last = log.messages.last().unwrap();
        assert!(last.starts_with("Mission aborted: Exploration failed"));
        assert!(last.contains("motor controller timeout"));
    }
}
