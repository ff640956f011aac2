//! # [`ExploreState::Advancing`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};

use super::{ExploreMgrError, ExploreParams, ExplorePersistantData, ExploreState};
use crate::{auto::nav::PathOutcome, mnvr_ctrl::MnvrOutcome};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Make a single advance.
///
/// A pending detour is a plain step along the heading selected while recovering. Otherwise
/// queued waypoints are followed and, once there are none, the rover steps straight ahead.
pub(super) fn step(
    params: &ExploreParams,
    data: &mut ExplorePersistantData,
) -> Result<Option<ExploreState>, ExploreMgrError> {
    let outcome = if data.detour_pending {
        debug!("Advancing along detour");
        data.detour_pending = false;
        data.ctrl.travel_distance(params.advance_step)?
    } else if data.nav.num_waypoints() > 0 {
        match data.nav.follow_path(&mut data.ctrl, data.signal.as_mut())? {
            PathOutcome::AllReached => {
                info!("All waypoints reached, continuing with free exploration");
                MnvrOutcome::Completed
            }
            PathOutcome::Blocked(i) => MnvrOutcome::Interrupted(i),
            PathOutcome::Cancelled => MnvrOutcome::Cancelled,
        }
    } else {
        data.ctrl.travel_distance(params.advance_step)?
    };

    Ok(Some(match outcome {
        MnvrOutcome::Completed => {
            data.stats.num_advances += 1;
            ExploreState::Advancing
        }
        MnvrOutcome::Interrupted(cause) => {
            info!("Advance interrupted by {:?}", cause);
            ExploreState::Recovering { cause: Some(cause) }
        }
        MnvrOutcome::Cancelled => {
            data.stopped_by_operator = true;
            ExploreState::Finished
        }
    }))
}
