//! # ExploreMgr module
//!
//! This module implements the [`ExploreMgr`] state machine, which drives the rover around its
//! environment until the mission ends. The state machine is broken down into three modes:
//!
//! - `Advancing` - The rover moves forward, along the queued waypoints if there are any.
//! - `Recovering` - A manoeuvre was interrupted. The rover records the obstacle, backs away from
//!   it, sweeps the range sensor and turns towards the clearest direction.
//! - `Finished` - The mission is over and the rover tries to return to where it started.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod advancing;
mod finished;
mod heading;
mod params;
mod recovering;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{EqptError, UserSignal};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

pub use self::{
    heading::{select_heading, REVERSE_HEADING_DEG},
    params::ExploreParams,
};

use super::{loc::Point, map::ObstacleMap, nav::Navigator};
use crate::{
    mission::MissionClock,
    mnvr_ctrl::{Interruption, MnvrCtrl, MnvrCtrlError},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Exploration Manager
///
/// Owns everything the exploration modes act on and the current mode of the system.
pub struct ExploreMgr {
    /// Parameters for the ExploreMgr and all its states.
    pub params: ExploreParams,

    /// Persistant data of the ExploreMgr, valid over all states.
    pub persistant: ExplorePersistantData,

    /// Current state, `None` once the `Finished` state has completed.
    state: Option<ExploreState>,

    /// Every mode the manager has entered, in order.
    mode_trace: Vec<ExploreMode>,
}

pub struct ExplorePersistantData {
    pub ctrl: MnvrCtrl,
    pub nav: Navigator,
    pub map: ObstacleMap,
    pub signal: Box<dyn UserSignal>,
    pub clock: Box<dyn MissionClock>,
    pub rng: StdRng,

    /// Where the rover returns to once the mission is over.
    pub origin: Point,

    /// Set after a reroute, the next advance is a plain step along the new heading.
    pub detour_pending: bool,

    /// Set when the operator stopped the mission.
    pub stopped_by_operator: bool,

    pub stats: ExploreStats,
}

/// Counters reported at the end of a mission.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ExploreStats {
    pub num_advances: u64,
    pub num_recoveries: u64,
    pub num_reversals: u64,
    pub num_home_attempts: u32,
    pub returned_home: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the exploration manager.
#[derive(Debug, thiserror::Error)]
pub enum ExploreMgrError {
    #[error("Manoeuvre control error: {0}")]
    MnvrCtrlError(#[from] MnvrCtrlError),

    #[error("Equipment error: {0}")]
    EqptError(#[from] EqptError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExploreState {
    Advancing,
    Recovering {
        /// The interruption which caused the recovery, `None` if the previous reroute was itself
        /// interrupted and the obstacle has been handled already.
        cause: Option<Interruption>,
    },
    Finished,
}

/// The mode of a state, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExploreMode {
    Advancing,
    Recovering,
    Finished,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ExploreMgr {
    pub fn new(
        params: ExploreParams,
        ctrl: MnvrCtrl,
        nav: Navigator,
        signal: Box<dyn UserSignal>,
        clock: Box<dyn MissionClock>,
    ) -> Self {
        let rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let origin = ctrl.pose().current_pose().position;

        Self {
            params,
            persistant: ExplorePersistantData {
                ctrl,
                nav,
                map: ObstacleMap::new(),
                signal,
                clock,
                rng,
                origin,
                detour_pending: false,
                stopped_by_operator: false,
                stats: ExploreStats::default(),
            },
            state: Some(ExploreState::Advancing),
            mode_trace: vec![ExploreMode::Advancing],
        }
    }

    /// Step the state machine until the `Finished` state completes.
    pub fn run(&mut self) -> Result<(), ExploreMgrError> {
        info!("Exploration started in {:?}", self.mode());

        while self.step()? {}

        info!("Exploration complete");

        Ok(())
    }

    /// Step the current state once.
    ///
    /// Returns `false` once there is nothing left to do.
    pub fn step(&mut self) -> Result<bool, ExploreMgrError> {
        let mut state = match self.state.take() {
            Some(s) => s,
            None => return Ok(false),
        };

        if state != ExploreState::Finished && self.should_finish() {
            state = ExploreState::Finished;
            self.record_mode(state);
        }

        let next = match state {
            ExploreState::Advancing => advancing::step(&self.params, &mut self.persistant)?,
            ExploreState::Recovering { cause } => {
                recovering::step(cause, &self.params, &mut self.persistant)?
            }
            ExploreState::Finished => {
                finished::step(&self.params, &mut self.persistant)?;
                None
            }
        };

        if let Some(s) = next {
            self.record_mode(s);
        }

        self.state = next;

        Ok(self.state.is_some())
    }

    pub fn mode(&self) -> Option<ExploreMode> {
        self.state.map(|s| s.mode())
    }

    pub fn mode_trace(&self) -> &[ExploreMode] {
        &self.mode_trace
    }

    /// Termination conditions checked between steps.
    fn should_finish(&mut self) -> bool {
        let data = &mut self.persistant;

        if data.ctrl.stop_token().is_triggered() {
            info!("Operator stop received");
            data.stopped_by_operator = true;
            return true;
        }

        let elapsed_s = data.clock.elapsed_s();
        if elapsed_s >= self.params.mission_duration_s {
            info!("Mission time elapsed ({:.1} s)", elapsed_s);
            return true;
        }

        if let Some(max) = self.params.max_advances {
            if data.stats.num_advances >= max {
                info!("All {} planned advances made", max);
                return true;
            }
        }

        false
    }

    fn record_mode(&mut self, state: ExploreState) {
        let mode = state.mode();

        if self.mode_trace.last() != Some(&mode) {
            info!("ExploreMgr mode: {:?}", mode);
            self.mode_trace.push(mode);
        }
    }
}

impl ExploreState {
    pub fn mode(&self) -> ExploreMode {
        match self {
            ExploreState::Advancing => ExploreMode::Advancing,
            ExploreState::Recovering { .. } => ExploreMode::Recovering,
            ExploreState::Finished => ExploreMode::Finished,
        }
    }
}
