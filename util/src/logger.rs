//! Logger set up for rover executables
//!
//! Everything at or above the configured level goes to the session log file, while stdout only
//! shows the records an operator watching the run cares about. Modules that log on every
//! simulation step can be given their own level so they don't drown the rest.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::collections::BTreeMap;

use colored::{ColoredString, Colorize};
use log::{self, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logger parameters, loaded from `logger.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerParams {
    /// Level written to the session log file.
    pub level: LevelFilter,

    /// Level shown on stdout, records must also pass `level`.
    pub stdout_level: LevelFilter,

    /// Per-module overrides, keyed by module path (e.g. `rov_lib::sim`).
    pub module_levels: BTreeMap<String, LevelFilter>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Stdout level `{0}` is more verbose than the file level `{1}`")]
    StdoutMoreVerbose(log::LevelFilter, log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LoggerParams {
    fn default() -> Self {
        let mut module_levels = BTreeMap::new();
        module_levels.insert(String::from("rov_lib::sim"), LevelFilter::Info);

        Self {
            level: LevelFilter::Debug,
            stdout_level: LevelFilter::Info,
            module_levels,
        }
    }
}

impl LoggerParams {
    /// Check the levels are usable.
    ///
    /// Warnings and errors must always be recorded, so neither level may be below `INFO`.
    pub fn validate(&self) -> Result<(), LoggerInitError> {
        if self.level < log::Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(self.level));
        }

        if self.stdout_level < log::Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(self.stdout_level));
        }

        if self.stdout_level > self.level {
            return Err(LoggerInitError::StdoutMoreVerbose(
                self.stdout_level,
                self.level,
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    params: &LoggerParams,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    params.validate()?;

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:10.6} {}] {}",
                session::get_elapsed_seconds(),
                level_to_str(record.level()),
                format_body(record.level(), record.target(), message)
            ))
        })
        .level(params.level);

    params
        .module_levels
        .iter()
        .fold(dispatch, |d, (module, level)| d.level_for(module.clone(), *level))
        .chain(
            fern::Dispatch::new()
                .level(params.stdout_level)
                .chain(std::io::stdout()),
        )
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!(
        "    Log level: {:?} (stdout {:?})",
        params.level, params.stdout_level
    );
    for (module, level) in params.module_levels.iter() {
        info!("    {}: {:?}", module, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// The record body, debug and trace records are prefixed with their target.
fn format_body(level: log::Level, target: &str, message: &std::fmt::Arguments) -> String {
    if level > log::Level::Info {
        format!("{}: {}", target, message)
    } else {
        format!("{}", message)
    }
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_from_toml() {
        let p: LoggerParams = crate::params::from_str(
            "level = \"trace\"\n\
             stdout_level = \"info\"\n\
             [module_levels]\n\
             \"rov_lib::sim\" = \"warn\"\n",
        )
        .unwrap();

        assert_eq!(p.level, LevelFilter::Trace);
        assert_eq!(p.module_levels.get("rov_lib::sim"), Some(&LevelFilter::Warn));
        assert!(p.validate().is_ok());

        // Missing keys fall back to the defaults
        let p: LoggerParams = crate::params::from_str("level = \"info\"").unwrap();
        assert_eq!(p.stdout_level, LevelFilter::Info);
        assert!(p.module_levels.contains_key("rov_lib::sim"));
    }

    #[test]
    fn test_validate() {
        assert!(LoggerParams::default().validate().is_ok());

        let quiet = LoggerParams {
            level: LevelFilter::Warn,
            ..Default::default()
        };
        assert!(matches!(
            quiet.validate(),
            Err(LoggerInitError::InvalidMinLogLevel(LevelFilter::Warn))
        ));

        let inverted = LoggerParams {
            level: LevelFilter::Info,
            stdout_level: LevelFilter::Trace,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(LoggerInitError::StdoutMoreVerbose(..))
        ));
    }

    #[test]
    fn test_format_body() {
        assert_eq!(
            format_body(log::Level::Debug, "rov_lib::nav", &format_args!("x = {}", 1)),
            "rov_lib::nav: x = 1"
        );
        assert_eq!(
            format_body(log::Level::Warn, "rov_lib::nav", &format_args!("x = {}", 1)),
            "x = 1"
        );
    }
}
