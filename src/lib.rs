//! syncstamp -- status-transition stamping for repository mirror status lists.
//!
//! An external orchestrator calls syncstamp once per sync event. It reads the
//! whole status list, moves one repository to its new status with the
//! matching timestamps, and writes the whole list back.

pub mod config;
pub mod invocation;
pub mod logging;
pub mod record;
pub mod store;
pub mod transition;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use crate::invocation::Invocation;
use crate::transition::UpsertOutcome;

/// Everything one run needs, resolved from flags and config.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub invocation: Invocation,
    /// Status list to read; stdin when `None`.
    pub input: Option<PathBuf>,
    /// Destination for the updated list; stdout when `None`.
    pub output: Option<PathBuf>,
    pub indent: String,
}

/// Apply one status transition end to end.
///
/// Arguments are validated before any input is read, and nothing is written
/// unless the whole list decoded.
pub fn run(opts: RunOptions) -> Result<UpsertOutcome> {
    let request = opts.invocation.into_request()?;
    let mut repos = store::load(opts.input.as_deref())?;

    let now = Local::now().fixed_offset();
    let outcome = transition::upsert(&mut repos, &request, now);
    if outcome.duplicates_dropped > 0 {
        tracing::warn!(dropped = outcome.duplicates_dropped, "input contained duplicate repository names");
    }

    store::save(opts.output.as_deref(), &repos, &opts.indent)?;
    tracing::info!(
        name = %request.name,
        status = %request.status,
        inserted = outcome.inserted,
        total = repos.len(),
        "status list updated"
    );
    Ok(outcome)
}
