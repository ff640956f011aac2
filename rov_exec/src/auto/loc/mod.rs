//! # Localisation module
//!
//! This module provides dead-reckoning localisation for the rover, integrating wheel odometry into
//! a pose estimate.
//!
//! # Frame
//!
//! Positions are in the world (map) frame, whose origin is the rover's position at mission start.
//! Headings are in degrees in the range [0, 360), 0 pointing along +X and 90 along +Y. Angles grow
//! in the rover's positive rotational sense, which is clockwise when the map is viewed with +Y
//! pointing down. Relative bearings are therefore negative to the rover's left and positive to its
//! right.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt;

use eqpt_if::OdomDelta;
use log::trace;
use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};
use util::maths::{wrap_180, wrap_360};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A position in the world frame.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The current pose (position and heading in the world frame) of the rover.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the world frame
    pub position: Point,

    /// Heading of the rover, always in [0, 360).
    ///
    /// Units: degrees
    heading_deg: f64,
}

/// Maintains the rover's pose estimate from odometry.
///
/// Only the manoeuvre controller feeds odometry into the tracker, all other components take
/// snapshots with [`PoseTracker::current_pose`].
#[derive(Debug, Default, Clone)]
pub struct PoseTracker {
    pose: Pose,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Wrap any heading into [0, 360) degrees.
pub fn normalise_heading(heading_deg: f64) -> f64 {
    wrap_360(heading_deg)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance between two points.
    pub fn distance_to(&self, other: &Point) -> f64 {
        nalgebra::distance(&Point2::from(*self), &Point2::from(*other))
    }
}

impl From<Point> for Point2<f64> {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Point2<f64>> for Point {
    fn from(p: Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl Pose {
    /// Create a new pose, normalising the heading.
    pub fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        Self {
            position: Point::new(x, y),
            heading_deg: normalise_heading(heading_deg),
        }
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    /// Get the rotation needed to face `target`, in (-180, 180] degrees.
    pub fn relative_bearing_to(&self, target: &Point) -> f64 {
        let diff = Point2::from(*target) - Point2::from(self.position);
        let abs_bearing_deg = diff.y.atan2(diff.x).to_degrees();

        wrap_180(abs_bearing_deg - self.heading_deg)
    }

    /// Get the straight line distance to `target`.
    pub fn distance_to(&self, target: &Point) -> f64 {
        self.position.distance_to(target)
    }

    /// Project a detection at `relative_bearing_deg` from the current heading and `distance` from
    /// the current position into the world frame.
    pub fn project(&self, relative_bearing_deg: f64, distance: f64) -> Point {
        let abs_bearing_deg = normalise_heading(self.heading_deg + relative_bearing_deg);

        Point::from(Point2::from(self.position) + heading_vector(abs_bearing_deg) * distance)
    }
}

/// Short status line for the rover's display.
impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.1} Y:{:.1} Hdg:{:.1}",
            self.position.x, self.position.y, self.heading_deg
        )
    }
}

impl PoseTracker {
    /// Create a tracker at the origin, facing +X.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker starting from the given pose.
    pub fn with_pose(pose: Pose) -> Self {
        Self { pose }
    }

    /// Snapshot of the current pose estimate.
    pub fn current_pose(&self) -> Pose {
        self.pose
    }

    /// Reset the estimate, only done at mission start.
    pub fn reset(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Integrate an odometry report. Rotation is applied before translation.
    pub(crate) fn integrate(&mut self, delta: OdomDelta) {
        if delta.is_zero() {
            return;
        }

        let heading_deg = normalise_heading(self.pose.heading_deg + delta.rotation_deg);
        let position = Point2::from(self.pose.position)
            + heading_vector(heading_deg) * delta.distance;

        self.pose = Pose {
            position: position.into(),
            heading_deg,
        };

        trace!(
            "Pose: ({:.2}, {:.2}) hdg {:.2}",
            self.pose.position.x,
            self.pose.position.y,
            self.pose.heading_deg
        );
    }
}

/// Unit vector along the given world heading.
fn heading_vector(heading_deg: f64) -> Vector2<f64> {
    Rotation2::new(heading_deg.to_radians()) * Vector2::x()
}
