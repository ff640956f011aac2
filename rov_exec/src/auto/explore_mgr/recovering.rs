//! # [`ExploreState::Recovering`] implementation
//!
//! Also provides the recovery building blocks reused while returning home.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::Feedback;
use log::{debug, info, warn};

use super::{
    select_heading, ExploreMgrError, ExploreParams, ExplorePersistantData, ExploreState,
    REVERSE_HEADING_DEG,
};
use crate::mnvr_ctrl::{Interruption, MnvrOutcome};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

pub(super) fn step(
    cause: Option<Interruption>,
    params: &ExploreParams,
    data: &mut ExplorePersistantData,
) -> Result<Option<ExploreState>, ExploreMgrError> {
    if let Some(cause) = cause {
        data.stats.num_recoveries += 1;
        record(data, &cause)?;

        if back_off(params, data)? == MnvrOutcome::Cancelled {
            return Ok(Some(cancel(data)));
        }
    }

    let heading_deg = scan_for_heading(params, data)?;

    match data.ctrl.rotate_by(heading_deg as f64)? {
        MnvrOutcome::Completed => {
            data.detour_pending = true;
            Ok(Some(ExploreState::Advancing))
        }
        MnvrOutcome::Interrupted(i) => {
            info!("Reroute interrupted by {:?}", i);
            record(data, &i)?;

            if back_off(params, data)? == MnvrOutcome::Cancelled {
                return Ok(Some(cancel(data)));
            }

            Ok(Some(ExploreState::Recovering { cause: None }))
        }
        MnvrOutcome::Cancelled => Ok(Some(cancel(data))),
    }
}

/// Add an interruption to the map and tell the user about it.
pub(super) fn record(
    data: &mut ExplorePersistantData,
    interruption: &Interruption,
) -> Result<(), ExploreMgrError> {
    data.map.add_interruption(data.ctrl.pose(), interruption);
    data.signal.feedback(Feedback::Negative)?;

    Ok(())
}

/// Back away from an obstacle.
///
/// An interrupted backoff is recorded and followed by another, up to the configured number of
/// attempts. Returns `Cancelled` if the operator stopped the rover, `Completed` otherwise.
pub(super) fn back_off(
    params: &ExploreParams,
    data: &mut ExplorePersistantData,
) -> Result<MnvrOutcome, ExploreMgrError> {
    for attempt in 1..=params.max_backoff_attempts {
        match data.ctrl.travel_distance(params.backoff_distance)? {
            MnvrOutcome::Completed => return Ok(MnvrOutcome::Completed),
            MnvrOutcome::Cancelled => return Ok(MnvrOutcome::Cancelled),
            MnvrOutcome::Interrupted(i) => {
                debug!("Backoff attempt {} interrupted by {:?}", attempt, i);
                record(data, &i)?;
            }
        }
    }

    warn!(
        "Backoff still interrupted after {} attempts, continuing",
        params.max_backoff_attempts
    );

    Ok(MnvrOutcome::Completed)
}

/// Sweep the range sensor, map the clutter it sees and select the heading to turn to.
pub(super) fn scan_for_heading(
    params: &ExploreParams,
    data: &mut ExplorePersistantData,
) -> Result<i32, ExploreMgrError> {
    let scan = data.ctrl.mast_mut().sweep(&params.sweep)?;

    for sample in scan.iter().filter(|s| s.range < params.clutter_threshold) {
        data.map
            .add_obstacle(data.ctrl.pose(), sample.bearing_deg, sample.range);
    }

    let heading_deg = select_heading(&scan, params.min_clearance, &mut data.rng);

    if heading_deg == REVERSE_HEADING_DEG {
        data.stats.num_reversals += 1;
        info!("No clear heading found, turning around");
    } else {
        info!("Selected heading {} deg", heading_deg);
    }

    data.signal.feedback(Feedback::Neutral)?;

    Ok(heading_deg)
}

fn cancel(data: &mut ExplorePersistantData) -> ExploreState {
    data.stopped_by_operator = true;
    ExploreState::Finished
}
