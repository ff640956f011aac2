//! # Navigation
//!
//! This module drives the rover through a queue of waypoints. Each waypoint is reached by turning
//! to face it and then travelling the straight line distance, and is only removed from the queue
//! once the rover has arrived. The rover's pose is shown on its display each time a waypoint is
//! reached.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::VecDeque;

use eqpt_if::UserSignal;
use log::{debug, info};
use serde::Serialize;
use util::maths::get_ang_dist_deg;

use super::loc::{normalise_heading, Point};
use crate::mnvr_ctrl::{Interruption, MnvrCtrl, MnvrCtrlError, MnvrOutcome};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Waypoint follower.
#[derive(Debug, Default, Clone)]
pub struct Navigator {
    path: VecDeque<Point>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Result of following the queued path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathOutcome {
    /// Every queued waypoint was reached, or the queue was empty.
    AllReached,

    /// A manoeuvre towards the head waypoint was interrupted, the waypoint is still queued.
    Blocked(Interruption),

    /// The operator stopped the rover.
    Cancelled,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator with the given waypoints queued in order.
    pub fn with_waypoints<I: IntoIterator<Item = Point>>(waypoints: I) -> Self {
        Self {
            path: waypoints.into_iter().collect(),
        }
    }

    pub fn add_waypoint(&mut self, point: Point) {
        self.path.push_back(point);
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Point> {
        self.path.iter()
    }

    pub fn num_waypoints(&self) -> usize {
        self.path.len()
    }

    /// Visit the queued waypoints in order until they are all reached or a manoeuvre fails.
    pub fn follow_path(
        &mut self,
        ctrl: &mut MnvrCtrl,
        signal: &mut dyn UserSignal,
    ) -> Result<PathOutcome, MnvrCtrlError> {
        while let Some(target) = self.path.front().copied() {
            match Self::go_to(ctrl, target)? {
                MnvrOutcome::Completed => {
                    self.path.pop_front();
                    info!(
                        "Reached waypoint ({:.1}, {:.1}), {} remaining",
                        target.x,
                        target.y,
                        self.path.len()
                    );
                    signal.display(&ctrl.pose().current_pose().to_string())?;
                }
                MnvrOutcome::Interrupted(i) => return Ok(PathOutcome::Blocked(i)),
                MnvrOutcome::Cancelled => return Ok(PathOutcome::Cancelled),
            }
        }

        Ok(PathOutcome::AllReached)
    }

    /// Turn towards the target and travel to it.
    ///
    /// The travel is only made if the rotation completed.
    pub fn go_to(ctrl: &mut MnvrCtrl, target: Point) -> Result<MnvrOutcome, MnvrCtrlError> {
        let pose = ctrl.pose().current_pose();
        let bearing_deg = pose.relative_bearing_to(&target);
        let distance = pose.distance_to(&target);

        debug!(
            "Go to ({:.1}, {:.1}): bearing {:.1} deg, distance {:.1}",
            target.x, target.y, bearing_deg, distance
        );

        match ctrl.rotate_by(bearing_deg)? {
            MnvrOutcome::Completed => ctrl.travel_distance(distance),
            o => Ok(o),
        }
    }

    /// Turn the shortest way round to face the absolute heading `heading_deg`.
    pub fn rotate_to(ctrl: &mut MnvrCtrl, heading_deg: f64) -> Result<MnvrOutcome, MnvrCtrlError> {
        let current_deg = ctrl.pose().current_pose().heading_deg();
        let angle_deg = get_ang_dist_deg(current_deg, normalise_heading(heading_deg));

        debug!("Rotate to {:.1} deg: turning {:.1} deg", heading_deg, angle_deg);

        ctrl.rotate_by(angle_deg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::{test_mnvr_ctrl, CircleObstacle, LogSignal, Params, RecordingSignal};

    #[test]
    fn test_empty_path() {
        let (mut ctrl, world) = test_mnvr_ctrl(Params::default());
        let mut nav = Navigator::new();

        assert_eq!(
            nav.follow_path(&mut ctrl, &mut LogSignal).unwrap(),
            PathOutcome::AllReached
        );
        assert_eq!(ctrl.report().num_rotations, 0);
        assert_eq!(ctrl.report().num_travels, 0);
        assert_eq!(world.borrow().time_s(), 0.0);
    }

    #[test]
    fn test_go_to_clear() {
        let (mut ctrl, world) = test_mnvr_ctrl(Params::default());
        let target = Point::new(100.0, 50.0);

        assert_eq!(
            Navigator::go_to(&mut ctrl, target).unwrap(),
            MnvrOutcome::Completed
        );

        assert!(ctrl.pose().current_pose().distance_to(&target) < 1e-6);
        assert!(world.borrow().pose().distance_to(&target) < 1e-6);
    }

    #[test]
    fn test_follow_path() {
        let (mut ctrl, _) = test_mnvr_ctrl(Params::default());
        let mut nav = Navigator::with_waypoints(vec![
            Point::new(50.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(0.0, 0.0),
        ]);
        let signal = RecordingSignal::default();

        assert_eq!(
            nav.follow_path(&mut ctrl, &mut signal.clone()).unwrap(),
            PathOutcome::AllReached
        );
        assert_eq!(nav.num_waypoints(), 0);
        assert!(ctrl.pose().current_pose().distance_to(&Point::new(0.0, 0.0)) < 1e-6);

        // One pose line per waypoint reached
        let log = signal.0.borrow();
        assert_eq!(log.messages.len(), 3);
        assert!(log.messages[0].starts_with("X:50.0 Y:0.0"));
        assert!(log.messages.iter().all(|m| m.contains("Hdg:")));
    }

    #[test]
    fn test_waypoint_at_current_position() {
        // The obstacle surface is inside the safety distance of the rover
        let (mut ctrl, _) = test_mnvr_ctrl(Params {
            obstacles: vec![CircleObstacle {
                x: 20.0,
                y: 0.0,
                radius: 10.0,
            }],
            ..Default::default()
        });
        let mut nav = Navigator::with_waypoints(vec![Point::new(0.0, 0.0)]);

        assert_eq!(
            nav.follow_path(&mut ctrl, &mut LogSignal).unwrap(),
            PathOutcome::AllReached
        );
        assert_eq!(ctrl.report().num_interruptions, 0);
    }

    #[test]
    fn test_rotate_to() {
        let (mut ctrl, world) = test_mnvr_ctrl(Params::default());

        assert_eq!(
            Navigator::rotate_to(&mut ctrl, 270.0).unwrap(),
            MnvrOutcome::Completed
        );
        assert!((ctrl.pose().current_pose().heading_deg() - 270.0).abs() < 1e-6);

        // Shortest way round is a quarter turn back, not three quarters forward
        let before_s = world.borrow().time_s();
        assert_eq!(
            Navigator::rotate_to(&mut ctrl, -45.0).unwrap(),
            MnvrOutcome::Completed
        );
        assert!((ctrl.pose().current_pose().heading_deg() - 315.0).abs() < 1e-6);
        assert!(world.borrow().time_s() - before_s < 1.0);
        assert!((world.borrow().pose().heading_deg() - 315.0).abs() < 1e-6);
    }

    #[test]
    fn test_go_to_obstructed() {
        let (mut ctrl, _) = test_mnvr_ctrl(Params {
            obstacles: vec![CircleObstacle {
                x: 60.0,
                y: 0.0,
                radius: 10.0,
            }],
            ..Default::default()
        });

        let target = Point::new(100.0, 0.0);
        let mut nav = Navigator::with_waypoints(vec![target, Point::new(0.0, 100.0)]);

        let outcome = nav.follow_path(&mut ctrl, &mut LogSignal).unwrap();
        assert!(matches!(
            outcome,
            PathOutcome::Blocked(Interruption::Range { .. })
        ));

        // Partial progress and the waypoint is kept
        let x = ctrl.pose().current_pose().position.x;
        assert!(x > 30.0 && x < 50.0);
        assert_eq!(nav.waypoints().next(), Some(&target));

        // Following again resumes towards the same waypoint, which is still blocked
        let outcome = nav.follow_path(&mut ctrl, &mut LogSignal).unwrap();
        assert!(matches!(
            outcome,
            PathOutcome::Blocked(Interruption::Range { .. })
        ));
        assert_eq!(nav.num_waypoints(), 2);
        assert_eq!(nav.waypoints().next(), Some(&target));
        assert!((ctrl.pose().current_pose().position.x - x).abs() < 1e-6);
        assert_eq!(ctrl.report().num_travels, 2);
    }
}
