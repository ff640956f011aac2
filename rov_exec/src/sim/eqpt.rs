//! Equipment front-ends for the simulated world

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use eqpt_if::{
    BumpSensors, Drive, Eqpt, EqptError, Feedback, OdomDelta, RangeSensor, SensorHead, UserSignal,
};
use log::{debug, info};

use super::SharedWorld;
use crate::mission::MissionClock;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

pub struct SimDrive(SharedWorld);

pub struct SimRangeSensor {
    world: SharedWorld,
    last_range: Option<f64>,
}

pub struct SimHead(SharedWorld);

pub struct SimBumpers(SharedWorld);

/// User signal which writes everything to the log and never waits.
#[derive(Default)]
pub struct LogSignal;

/// Mission clock following simulated time.
pub struct SimClock {
    world: SharedWorld,
    start_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

/// Build a full equipment set on top of the given world.
pub fn sim_eqpt(world: &SharedWorld) -> Eqpt {
    Eqpt {
        drive: Box::new(SimDrive(world.clone())),
        range: Box::new(SimRangeSensor {
            world: world.clone(),
            last_range: None,
        }),
        head: Box::new(SimHead(world.clone())),
        bumpers: Box::new(SimBumpers(world.clone())),
        signal: Box::new(LogSignal),
    }
}

impl SimClock {
    pub fn new(world: &SharedWorld) -> Self {
        Self {
            world: world.clone(),
            start_s: world.borrow().time_s(),
        }
    }
}

impl MissionClock for SimClock {
    fn start(&mut self) {
        self.start_s = self.world.borrow().time_s();
    }

    fn elapsed_s(&self) -> f64 {
        self.world.borrow().time_s() - self.start_s
    }
}

impl SimDrive {
    fn run_to_end(&mut self) {
        let mut world = self.0.borrow_mut();
        while world.step() {}
    }
}

impl Drive for SimDrive {
    fn rotate(&mut self, angle_deg: f64, immediate_return: bool) -> Result<(), EqptError> {
        self.0.borrow_mut().command_rotate(angle_deg);

        if !immediate_return {
            self.run_to_end();
        }

        Ok(())
    }

    fn travel(&mut self, distance: f64, immediate_return: bool) -> Result<(), EqptError> {
        self.0.borrow_mut().command_travel(distance);

        if !immediate_return {
            self.run_to_end();
        }

        Ok(())
    }

    fn stop(&mut self) -> Result<(), EqptError> {
        self.0.borrow_mut().stop();
        Ok(())
    }

    fn is_moving(&mut self) -> Result<bool, EqptError> {
        Ok(self.0.borrow_mut().step())
    }

    fn take_odometry(&mut self) -> Result<OdomDelta, EqptError> {
        Ok(self.0.borrow_mut().take_odometry())
    }
}

impl RangeSensor for SimRangeSensor {
    fn ping(&mut self) -> Result<(), EqptError> {
        self.last_range = Some(self.world.borrow().cast_range());
        Ok(())
    }

    fn get_distance(&mut self) -> Result<f64, EqptError> {
        self.last_range
            .ok_or_else(|| EqptError::NoAck("range", String::from("no ping sent")))
    }
}

impl SensorHead for SimHead {
    fn set_angle(&mut self, angle_deg: i32) -> Result<(), EqptError> {
        self.0.borrow_mut().set_head_angle(angle_deg);
        Ok(())
    }

    fn get_angle(&mut self) -> Result<i32, EqptError> {
        Ok(self.0.borrow().head_angle())
    }
}

impl BumpSensors for SimBumpers {
    fn left_pressed(&mut self) -> Result<bool, EqptError> {
        Ok(matches!(
            self.0.borrow().bump_state(),
            eqpt_if::BumpEvent::Left | eqpt_if::BumpEvent::Both
        ))
    }

    fn right_pressed(&mut self) -> Result<bool, EqptError> {
        Ok(matches!(
            self.0.borrow().bump_state(),
            eqpt_if::BumpEvent::Right | eqpt_if::BumpEvent::Both
        ))
    }
}

impl UserSignal for LogSignal {
    fn wait_for_user(&mut self) -> Result<(), EqptError> {
        info!("Waiting for user: continuing immediately in simulation");
        Ok(())
    }

    fn feedback(&mut self, feedback: Feedback) -> Result<(), EqptError> {
        debug!("Feedback: {:?}", feedback);
        Ok(())
    }

    fn display(&mut self, message: &str) -> Result<(), EqptError> {
        info!("Display: {}", message);
        Ok(())
    }
}
