//! # Bumper Equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Latest state of the front bumpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BumpEvent {
    None,
    Left,
    Right,
    Both,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A pair of binary touch sensors on the front left and front right of the rover.
pub trait BumpSensors {
    fn left_pressed(&mut self) -> Result<bool, EqptError>;

    fn right_pressed(&mut self) -> Result<bool, EqptError>;

    /// Read both bumpers into a single event.
    fn read(&mut self) -> Result<BumpEvent, EqptError> {
        let left = self.left_pressed()?;
        let right = self.right_pressed()?;

        Ok(BumpEvent::from_pressed(left, right))
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl BumpEvent {
    pub fn from_pressed(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => BumpEvent::None,
            (true, false) => BumpEvent::Left,
            (false, true) => BumpEvent::Right,
            (true, true) => BumpEvent::Both,
        }
    }

    /// Returns true if any bumper is pressed.
    pub fn is_some(&self) -> bool {
        !matches!(self, BumpEvent::None)
    }
}

impl Default for BumpEvent {
    fn default() -> Self {
        BumpEvent::None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct FixedBumpers(bool, bool);

    impl BumpSensors for FixedBumpers {
        fn left_pressed(&mut self) -> Result<bool, EqptError> {
            Ok(self.0)
        }

        fn right_pressed(&mut self) -> Result<bool, EqptError> {
            Ok(self.1)
        }
    }

    #[test]
    fn test_read() {
        assert_eq!(FixedBumpers(false, false).read().unwrap(), BumpEvent::None);
        assert_eq!(FixedBumpers(true, false).read().unwrap(), BumpEvent::Left);
        assert_eq!(FixedBumpers(false, true).read().unwrap(), BumpEvent::Right);
        assert_eq!(FixedBumpers(true, true).read().unwrap(), BumpEvent::Both);
        assert!(!BumpEvent::None.is_some());
        assert!(BumpEvent::Both.is_some());
    }
}
