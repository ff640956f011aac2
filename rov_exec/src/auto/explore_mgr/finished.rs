//! # [`ExploreState::Finished`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::Feedback;
use log::{info, warn};

use super::{
    recovering::{back_off, record, scan_for_heading},
    ExploreMgrError, ExploreParams, ExplorePersistantData,
};
use crate::{auto::nav::Navigator, mnvr_ctrl::MnvrOutcome};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Return to the origin.
///
/// Each blocked attempt is followed by the recovery sequence and a short detour along the new
/// heading before trying again. Skipped entirely if the operator stopped the mission.
pub(super) fn step(
    params: &ExploreParams,
    data: &mut ExplorePersistantData,
) -> Result<(), ExploreMgrError> {
    if data.stopped_by_operator {
        info!("Stopped by operator, not returning home");
        return Ok(());
    }

    info!(
        "Returning home to ({:.1}, {:.1})",
        data.origin.x, data.origin.y
    );
    data.signal.feedback(Feedback::GoingBack)?;

    for attempt in 1..=params.max_home_attempts {
        data.stats.num_home_attempts = attempt;

        let interruption = match Navigator::go_to(&mut data.ctrl, data.origin)? {
            MnvrOutcome::Completed => {
                info!("Home reached after {} attempt(s)", attempt);
                data.stats.returned_home = true;
                return Ok(());
            }
            MnvrOutcome::Cancelled => return Ok(()),
            MnvrOutcome::Interrupted(i) => i,
        };

        record(data, &interruption)?;

        if back_off(params, data)? == MnvrOutcome::Cancelled {
            return Ok(());
        }

        let heading_deg = scan_for_heading(params, data)?;

        match data.ctrl.rotate_by(heading_deg as f64)? {
            MnvrOutcome::Completed => (),
            MnvrOutcome::Cancelled => return Ok(()),
            MnvrOutcome::Interrupted(i) => {
                record(data, &i)?;
                if back_off(params, data)? == MnvrOutcome::Cancelled {
                    return Ok(());
                }
                continue;
            }
        }

        match data.ctrl.travel_distance(params.home_detour_distance)? {
            MnvrOutcome::Cancelled => return Ok(()),
            MnvrOutcome::Interrupted(i) => record(data, &i)?,
            MnvrOutcome::Completed => (),
        }
    }

    warn!(
        "Could not return home after {} attempts",
        params.max_home_attempts
    );

    Ok(())
}
