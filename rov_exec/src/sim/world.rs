//! Simulated world state and kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{cell::RefCell, rc::Rc};

use eqpt_if::{BumpEvent, OdomDelta};
use log::trace;
use nalgebra::Vector2;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{Arena, CircleObstacle, Params};
use crate::auto::loc::{Point, Pose};
use util::maths::{get_ang_dist_deg, wrap_180};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Contact bearings within this angle of straight ahead close both bumpers.
///
/// Units: degrees
const BUMP_CENTRE_HALF_WIDTH_DEG: f64 = 15.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulated world, holding the true pose of the rover.
pub struct SimWorld {
    params: Params,

    pose: Pose,
    time_s: f64,
    head_angle_deg: i32,

    cmd: Option<DriveCmd>,
    odom: OdomDelta,

    rng: SmallRng,
}

/// Handle shared by all simulated equipment.
pub type SharedWorld = Rc<RefCell<SimWorld>>;

/// Motion currently being executed by the drive.
#[derive(Debug, Clone, Copy)]
enum DriveCmd {
    Rotate { remaining_deg: f64 },
    Travel { remaining: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimWorld {
    pub fn new(params: Params) -> Self {
        let rng = SmallRng::seed_from_u64(params.noise_seed);

        Self {
            params,
            pose: Pose::default(),
            time_s: 0.0,
            head_angle_deg: 0,
            cmd: None,
            odom: OdomDelta::default(),
            rng,
        }
    }

    pub fn shared(params: Params) -> SharedWorld {
        Rc::new(RefCell::new(Self::new(params)))
    }

    /// The true pose of the rover.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Simulated time since the world was created.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn obstacles(&self) -> &[CircleObstacle] {
        &self.params.obstacles
    }

    pub(crate) fn set_head_angle(&mut self, angle_deg: i32) {
        self.head_angle_deg = angle_deg;
    }

    pub(crate) fn head_angle(&self) -> i32 {
        self.head_angle_deg
    }

    pub(crate) fn command_rotate(&mut self, angle_deg: f64) {
        self.cmd = Some(DriveCmd::Rotate {
            remaining_deg: angle_deg,
        });
    }

    pub(crate) fn command_travel(&mut self, distance: f64) {
        self.cmd = Some(DriveCmd::Travel {
            remaining: distance,
        });
    }

    pub(crate) fn stop(&mut self) {
        self.cmd = None;
    }

    pub(crate) fn take_odometry(&mut self) -> OdomDelta {
        std::mem::take(&mut self.odom)
    }

    /// Advance the simulation by one time step.
    ///
    /// Returns true if the drive was executing a command during the step.
    pub(crate) fn step(&mut self) -> bool {
        let cmd = match self.cmd {
            Some(c) => c,
            None => return false,
        };

        self.time_s += self.params.dt_s;

        match cmd {
            DriveCmd::Rotate { remaining_deg } => {
                let max_step = self.params.angular_speed_deg * self.params.dt_s;
                let step = remaining_deg.signum() * remaining_deg.abs().min(max_step);

                self.pose = Pose::new(
                    self.pose.position.x,
                    self.pose.position.y,
                    self.pose.heading_deg() + step,
                );
                self.odom.rotation_deg += self.noisy(step);

                let remaining_deg = remaining_deg - step;
                self.cmd = if remaining_deg == 0.0 {
                    None
                } else {
                    Some(DriveCmd::Rotate { remaining_deg })
                };
            }
            DriveCmd::Travel { remaining } => {
                let max_step = self.params.linear_speed * self.params.dt_s;
                let wanted = remaining.abs().min(max_step);

                let dir = heading_vector(self.pose.heading_deg()) * remaining.signum();
                let free = self.free_distance(dir);
                let step = wanted.min(free);

                let pos = Vector2::new(self.pose.position.x, self.pose.position.y) + dir * step;
                self.pose.position = Point::new(pos.x, pos.y);
                self.odom.distance += self.noisy(remaining.signum() * step);

                let remaining = remaining - remaining.signum() * step;

                // Stalled against an obstacle or at the end of the move
                self.cmd = if step < wanted || remaining == 0.0 {
                    None
                } else {
                    Some(DriveCmd::Travel { remaining })
                };
            }
        }

        trace!(
            "Sim t = {:.2}: ({:.2}, {:.2}) @ {:.1} deg",
            self.time_s,
            self.pose.position.x,
            self.pose.position.y,
            self.pose.heading_deg()
        );

        true
    }

    /// Range from the rover centre to the first surface along the head direction.
    pub(crate) fn cast_range(&self) -> f64 {
        let abs_deg = self.pose.heading_deg() + self.head_angle_deg as f64;
        let dir = heading_vector(abs_deg);
        let origin = self.position();

        let mut range = ray_to_box(origin, dir, &self.params.arena, 0.0);

        for obs in self.params.obstacles.iter() {
            if let Some(t) = ray_to_circle(origin, dir, obs_centre(obs), obs.radius) {
                range = range.min(t);
            }
        }

        range.min(self.params.max_range).max(0.0)
    }

    /// Current state of the front bumpers.
    pub(crate) fn bump_state(&self) -> BumpEvent {
        let p = self.position();
        let body = self.params.body_radius;
        let tol = self.params.contact_tolerance;
        let arena = &self.params.arena;

        // Bearing to each contact point in the world frame
        let mut contacts: Vec<f64> = Vec::new();

        for obs in self.params.obstacles.iter() {
            let offset = obs_centre(obs) - p;
            if offset.norm() - obs.radius - body < tol {
                contacts.push(offset.y.atan2(offset.x).to_degrees());
            }
        }

        let walls = [
            (arena.max_x - p.x, 0.0),
            (arena.max_y - p.y, 90.0),
            (p.x - arena.min_x, 180.0),
            (p.y - arena.min_y, 270.0),
        ];
        for (dist, bearing) in walls.iter() {
            if dist - body < tol {
                contacts.push(*bearing);
            }
        }

        let mut left = false;
        let mut right = false;

        for abs_deg in contacts {
            let rel = get_ang_dist_deg(self.pose.heading_deg(), abs_deg);

            if rel.abs() > 90.0 {
                continue;
            }

            if rel < -BUMP_CENTRE_HALF_WIDTH_DEG {
                left = true;
            } else if rel > BUMP_CENTRE_HALF_WIDTH_DEG {
                right = true;
            } else {
                left = true;
                right = true;
            }
        }

        BumpEvent::from_pressed(left, right)
    }

    /// Distance the body can move along `dir` before touching anything.
    fn free_distance(&self, dir: Vector2<f64>) -> f64 {
        let p = self.position();
        let body = self.params.body_radius;

        let mut free = ray_to_box(p, dir, &self.params.arena, body);

        for obs in self.params.obstacles.iter() {
            if let Some(t) = ray_to_circle(p, dir, obs_centre(obs), obs.radius + body) {
                free = free.min(t);
            }
        }

        free.max(0.0)
    }

    fn position(&self) -> Vector2<f64> {
        Vector2::new(self.pose.position.x, self.pose.position.y)
    }

    fn noisy(&mut self, value: f64) -> f64 {
        if self.params.odom_noise > 0.0 {
            let noise = self.params.odom_noise;
            value * (1.0 + self.rng.gen_range(-noise..=noise))
        } else {
            value
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn heading_vector(heading_deg: f64) -> Vector2<f64> {
    let rad = wrap_180(heading_deg).to_radians();
    Vector2::new(rad.cos(), rad.sin())
}

fn obs_centre(obs: &CircleObstacle) -> Vector2<f64> {
    Vector2::new(obs.x, obs.y)
}

/// Distance along a unit ray to the first crossing of a circle, if the circle is ahead.
///
/// A ray starting inside the circle returns zero.
fn ray_to_circle(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    centre: Vector2<f64>,
    radius: f64,
) -> Option<f64> {
    let offset = origin - centre;
    let c = offset.norm_squared() - radius * radius;

    if c <= 0.0 {
        return Some(0.0);
    }

    let b = offset.dot(&dir);
    let disc = b * b - c;

    if b >= 0.0 || disc < 0.0 {
        return None;
    }

    Some(-b - disc.sqrt())
}

/// Distance along a unit ray from inside the arena to its walls moved inwards by `inset`.
fn ray_to_box(origin: Vector2<f64>, dir: Vector2<f64>, arena: &Arena, inset: f64) -> f64 {
    let min = Vector2::new(arena.min_x + inset, arena.min_y + inset);
    let max = Vector2::new(arena.max_x - inset, arena.max_y - inset);

    let mut t = std::f64::INFINITY;

    for i in 0..2 {
        if dir[i] > 0.0 {
            t = t.min((max[i] - origin[i]) / dir[i]);
        } else if dir[i] < 0.0 {
            t = t.min((min[i] - origin[i]) / dir[i]);
        }
    }

    t.max(0.0)
}

#[cfg(test)]
mod test {
    use super::*;

    fn world_with(obstacles: Vec<CircleObstacle>) -> SimWorld {
        SimWorld::new(Params {
            obstacles,
            ..Default::default()
        })
    }

    fn run(world: &mut SimWorld) {
        while world.step() {}
    }

    #[test]
    fn test_range_to_obstacle_and_wall() {
        let mut world = world_with(vec![CircleObstacle {
            x: 100.0,
            y: 0.0,
            radius: 10.0,
        }]);

        assert!((world.cast_range() - 90.0).abs() < 1e-9);

        // Looking right (+y) sees the wall beyond max range
        world.set_head_angle(90);
        assert!((world.cast_range() - 255.0).abs() < 1e-9);

        world.set_pose(Pose::new(0.0, 400.0, 0.0));
        assert!((world.cast_range() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_clamped_at_contact() {
        let mut world = world_with(vec![CircleObstacle {
            x: 50.0,
            y: 0.0,
            radius: 10.0,
        }]);

        world.command_travel(100.0);
        run(&mut world);

        // Stopped with the body touching the obstacle
        assert!((world.pose().position.x - 32.0).abs() < 1e-9);
        assert_eq!(world.bump_state(), BumpEvent::Both);

        let odom = world.take_odometry();
        assert!((odom.distance - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_bump_sides() {
        // Obstacle ahead and to the left of a rover heading along +x
        let mut world = world_with(vec![CircleObstacle {
            x: 12.0,
            y: -12.0,
            radius: 9.0,
        }]);
        assert_eq!(world.bump_state(), BumpEvent::Left);

        world.set_pose(Pose::new(0.0, -24.0, 0.0));
        assert_eq!(world.bump_state(), BumpEvent::Right);

        // Behind the rover does not touch the front bumpers
        world.set_pose(Pose::new(24.0, -12.0, 0.0));
        assert_eq!(world.bump_state(), BumpEvent::None);
    }

    #[test]
    fn test_rotate() {
        let mut world = world_with(Vec::new());

        world.command_rotate(-100.0);
        run(&mut world);

        assert!((world.pose().heading_deg() - 260.0).abs() < 1e-9);
        assert!((world.take_odometry().rotation_deg + 100.0).abs() < 1e-9);
        assert!(world.time_s() > 1.0);
    }
}
