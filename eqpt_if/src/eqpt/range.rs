//! # Range Sensing Equipment

use super::EqptError;

/// A range finder, such as an ultrasonic sensor.
pub trait RangeSensor {
    /// Trigger a new measurement.
    fn ping(&mut self) -> Result<(), EqptError>;

    /// Distance measured by the last ping. Sensors return their maximum range when nothing is in
    /// view.
    fn get_distance(&mut self) -> Result<f64, EqptError>;
}

/// A motor steering the range sensor relative to the rover's forward axis.
///
/// Angles are in whole degrees, positive clockwise, zero looking straight ahead.
pub trait SensorHead {
    /// Move the head to the given angle, blocking until it gets there.
    fn set_angle(&mut self, angle_deg: i32) -> Result<(), EqptError>;

    /// Current head angle.
    fn get_angle(&mut self) -> Result<i32, EqptError>;
}
