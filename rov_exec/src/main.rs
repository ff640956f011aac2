//! Main rover-side executable entry point.
//!
//! # Architecture
//!
//! The executable runs a single exploration mission against the simulated rover:
//!
//!     - Initialise the session and logging
//!     - Load the mission and simulation parameters
//!     - Build the simulated equipment
//!     - Run the mission:
//!         - Wait for the operator and reset the pose
//!         - Explore until the mission time has elapsed or the operator stops the rover
//!         - Return home
//!         - Export the obstacle map, trajectory and report into the session directory
//!
//! Pressing Ctrl+C stops the rover at the next poll point and ends the mission without
//! returning home.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;

// Internal
use rov_lib::{
    mission::{Mission, MissionClock, MissionReport, WallClock},
    params::MissionParams,
    sim::{self, SimClock, SimWorld},
};
use util::{
    logger::{logger_init, LoggerParams},
    session::Session,
    stop::StopToken,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("rov_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    let logger_params: LoggerParams =
        util::params::load("logger.toml").wrap_err("Could not load logger params")?;
    logger_init(&logger_params, &session).wrap_err("Failed to initialise logging")?;

    info!("Rover Exploration Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let mission_params: MissionParams =
        util::params::load("mission.toml").wrap_err("Could not load mission params")?;
    let sim_params: sim::Params =
        util::params::load("sim.toml").wrap_err("Could not load sim params")?;

    session
        .save_json("logger_params.json", &logger_params)
        .wrap_err("Could not archive logger params")?;
    session
        .save_json("mission_params.json", &mission_params)
        .wrap_err("Could not archive mission params")?;
    session
        .save_json("sim_params.json", &sim_params)
        .wrap_err("Could not archive sim params")?;

    info!("Exec parameters loaded");

    // ---- OPERATOR STOP ----

    let stop = StopToken::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.trigger())
        .wrap_err("Failed to install the Ctrl+C handler")?;

    // ---- INITIALISE EQUIPMENT ----

    let realtime_clock = sim_params.realtime_clock;
    let world = SimWorld::shared(sim_params);

    let clock: Box<dyn MissionClock> = if realtime_clock {
        Box::new(WallClock::new())
    } else {
        Box::new(SimClock::new(&world))
    };

    info!(
        "Simulated world initialised with {} obstacles\n",
        world.borrow().obstacles().len()
    );

    let mut mission = Mission::new(&mission_params, sim::sim_eqpt(&world), stop, clock);

    // ---- MISSION ----

    match run(&mut mission, &session) {
        Ok(report) => {
            info!(
                "Mission complete in {:.1} s: {} advances, {} obstacle points, home {}",
                report.duration_s,
                report.explore.num_advances,
                report.num_obstacles,
                if report.explore.returned_home {
                    "reached"
                } else {
                    "not reached"
                }
            );
            Ok(())
        }
        Err(e) => {
            mission.abort(&format!("{:#}", e));
            Err(e)
        }
    }
}

fn run(mission: &mut Mission, session: &Session) -> Result<MissionReport, Report> {
    mission
        .start_mission()
        .wrap_err("Failed to start the mission")?;

    mission
        .main_behaviour()
        .wrap_err("Error during the mission")?;

    mission
        .finish_mission(&session.session_root)
        .wrap_err("Failed to finish the mission")
}
