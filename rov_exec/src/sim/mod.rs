//! # Simulated rover
//!
//! A point rover in a square arena scattered with circular obstacles. The world is shared between
//! the equipment front-ends so that the autonomy code can be run without hardware.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod eqpt;
mod params;
mod world;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use eqpt::*;
pub use params::*;
pub use world::*;

// ---------------------------------------------------------------------------
// TEST HELPERS
// ---------------------------------------------------------------------------

/// Build a manoeuvre controller on a fresh simulated world, with no poll delay.
#[cfg(test)]
pub(crate) fn test_mnvr_ctrl(params: Params) -> (crate::mnvr_ctrl::MnvrCtrl, SharedWorld) {
    use crate::{auto::per::Mast, mnvr_ctrl};

    let world = SimWorld::shared(params);
    let eqpt = sim_eqpt(&world);

    let ctrl = mnvr_ctrl::MnvrCtrl::new(
        mnvr_ctrl::Params {
            poll_interval_ms: 0,
            ..Default::default()
        },
        eqpt.drive,
        eqpt.bumpers,
        Mast::new(eqpt.range, eqpt.head),
        util::stop::StopToken::new(),
    );

    (ctrl, world)
}

/// Everything sent to a [`RecordingSignal`].
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct SignalLog {
    pub feedback: Vec<eqpt_if::Feedback>,
    pub messages: Vec<String>,
}

/// User signal which keeps everything it is sent, for inspection by tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingSignal(pub std::rc::Rc<std::cell::RefCell<SignalLog>>);

#[cfg(test)]
impl eqpt_if::UserSignal for RecordingSignal {
    fn wait_for_user(&mut self) -> Result<(), eqpt_if::EqptError> {
        Ok(())
    }

    fn feedback(&mut self, feedback: eqpt_if::Feedback) -> Result<(), eqpt_if::EqptError> {
        self.0.borrow_mut().feedback.push(feedback);
        Ok(())
    }

    fn display(&mut self, message: &str) -> Result<(), eqpt_if::EqptError> {
        self.0.borrow_mut().messages.push(message.to_string());
        Ok(())
    }
}
