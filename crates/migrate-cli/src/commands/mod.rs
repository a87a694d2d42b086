//! Command implementations for the GLIDE migration CLI.
//!
//! Each module builds its result with a function that returns the data and
//! exposes a `run` wrapper that prints it and chooses the exit code.

use glide_migrate_core::Error;
use glide_migrate_core::cli::ExitCode;

pub mod catalog;
pub mod categorize;
pub mod completions;
pub mod diff;
pub mod equivalent;
pub mod ingest;
pub mod parse;
pub mod validate;

/// Maps a command failure to its exit code.
///
/// # Examples
///
/// ```
/// use glide_migrate_cli::commands::exit_code_for;
/// use glide_migrate_core::Error;
/// use glide_migrate_core::cli::ExitCode;
///
/// let err = anyhow::Error::from(Error::InvalidArgument("unknown client".into()));
/// assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
/// ```
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_caller_error() => ExitCode::INVALID_INPUT,
        Some(e) if e.is_fetch_error() => ExitCode::FETCH_ERROR,
        _ => ExitCode::ERROR,
    }
}
