//! # Obstacle Map
//!
//! Sensor detections are given relative to the rover, they are projected into the world frame
//! using the pose at the moment they are added.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::BumpEvent;
use log::trace;

use crate::{
    auto::loc::{Point, PoseTracker},
    mnvr_ctrl::Interruption,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Bearing and distance of the obstacle implied by a single side bumper.
const SIDE_BUMP_BEARING_DEG: i32 = 45;
const SIDE_BUMP_DISTANCE: f64 = 10.0;

/// Distance of the obstacle implied by both bumpers closing, straight ahead.
const FRONT_BUMP_DISTANCE: f64 = 3.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// World frame obstacle points in the order they were detected.
///
/// Points are never removed or merged, repeated detections of the same obstacle show up as
/// duplicates.
#[derive(Debug, Default, Clone)]
pub struct ObstacleMap {
    points: Vec<Point>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ObstacleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detection at a bearing relative to the rover's heading and a distance from its
    /// centre.
    pub fn add_obstacle(&mut self, tracker: &PoseTracker, relative_bearing_deg: i32, distance: f64) {
        let pose = tracker.current_pose();
        let point = pose.project(relative_bearing_deg as f64, distance);

        trace!(
            "Obstacle at {} deg, {:.1} -> ({:.1}, {:.1})",
            relative_bearing_deg,
            distance,
            point.x,
            point.y
        );

        self.points.push(point);
    }

    /// Add the obstacle implied by a bumper contact.
    pub fn add_bump(&mut self, tracker: &PoseTracker, bump: BumpEvent) {
        match bump {
            BumpEvent::None => (),
            BumpEvent::Left => {
                self.add_obstacle(tracker, -SIDE_BUMP_BEARING_DEG, SIDE_BUMP_DISTANCE)
            }
            BumpEvent::Right => {
                self.add_obstacle(tracker, SIDE_BUMP_BEARING_DEG, SIDE_BUMP_DISTANCE)
            }
            BumpEvent::Both => self.add_obstacle(tracker, 0, FRONT_BUMP_DISTANCE),
        }
    }

    /// Add the obstacle that caused a manoeuvre to be interrupted.
    pub fn add_interruption(&mut self, tracker: &PoseTracker, interruption: &Interruption) {
        match interruption {
            Interruption::Bump(b) => self.add_bump(tracker, *b),
            Interruption::Range { distance } => self.add_obstacle(tracker, 0, *distance),
        }
    }

    /// Copy of the points in insertion order.
    pub fn snapshot(&self) -> Vec<Point> {
        self.points.clone()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::loc::Pose;

    fn assert_near(p: &Point, x: f64, y: f64) {
        assert!(
            (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9,
            "({}, {}) != ({}, {})",
            p.x,
            p.y,
            x,
            y
        );
    }

    #[test]
    fn test_add_obstacle() {
        let mut map = ObstacleMap::new();

        map.add_obstacle(&PoseTracker::with_pose(Pose::new(0.0, 0.0, 0.0)), 90, 10.0);
        map.add_obstacle(&PoseTracker::with_pose(Pose::new(0.0, 0.0, 90.0)), 0, 10.0);
        map.add_obstacle(&PoseTracker::with_pose(Pose::new(5.0, 5.0, 350.0)), 10, 2.0);

        let points = map.snapshot();
        assert_eq!(points.len(), 3);
        assert_near(&points[0], 0.0, 10.0);
        assert_near(&points[1], 0.0, 10.0);
        assert_near(&points[2], 7.0, 5.0);
    }

    #[test]
    fn test_add_bump() {
        let tracker = PoseTracker::with_pose(Pose::new(0.0, 0.0, 0.0));
        let mut map = ObstacleMap::new();
        let s = 10.0 * std::f64::consts::FRAC_1_SQRT_2;

        map.add_bump(&tracker, BumpEvent::None);
        assert!(map.is_empty());

        map.add_bump(&tracker, BumpEvent::Left);
        assert_eq!(map.len(), 1);
        assert_near(&map.points()[0], s, -s);

        map.add_bump(&tracker, BumpEvent::Right);
        assert_eq!(map.len(), 2);
        assert_near(&map.points()[1], s, s);

        map.add_bump(&tracker, BumpEvent::Both);
        assert_eq!(map.len(), 3);
        assert_near(&map.points()[2], 3.0, 0.0);

        // Repeated detections are kept
        map.add_bump(&tracker, BumpEvent::Both);
        assert_eq!(map.len(), 4);
        assert_eq!(map.points()[2], map.points()[3]);
    }

    #[test]
    fn test_add_interruption() {
        let tracker = PoseTracker::with_pose(Pose::new(1.0, 2.0, 180.0));
        let mut map = ObstacleMap::new();

        map.add_interruption(&tracker, &Interruption::Range { distance: 12.0 });
        map.add_interruption(&tracker, &Interruption::Bump(BumpEvent::None));

        assert_eq!(map.len(), 1);
        assert_near(&map.points()[0], -11.0, 2.0);
    }
}
