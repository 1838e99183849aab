//! Find-or-insert of one repository record, followed by stamping.

use std::collections::HashSet;

use chrono::{DateTime, Duration, FixedOffset};
use tracing::{debug, warn};

use super::stamped_fields;
use crate::record::{Repo, Status};

/// One status transition to apply to a status list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertRequest {
    /// Repository to update. Never empty.
    pub name: String,
    /// New status. Never [`Status::Pending`] when built from the command line.
    pub status: Status,
    /// New size in bytes, if it should change.
    pub size: Option<u64>,
    /// Offset from now of the next scheduled sync, if one should be recorded.
    pub schedule: Option<Duration>,
}

/// What [`upsert`] did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Position of the stamped record in the returned list.
    pub index: usize,
    /// True when the repository was not in the list and a record was appended.
    pub inserted: bool,
    /// Records dropped because an earlier record already had the same name.
    pub duplicates_dropped: usize,
}

/// Position of the first record named `name`.
pub fn find_by_name(repos: &[Repo], name: &str) -> Option<usize> {
    repos.iter().position(|r| r.name == name)
}

/// Drop every record whose name already appeared earlier in the list.
///
/// Returns how many records were removed. Relative order of the survivors is
/// unchanged.
pub fn dedup_by_name(repos: &mut Vec<Repo>) -> usize {
    let before = repos.len();
    let mut seen = HashSet::with_capacity(before);
    repos.retain(|r| {
        if seen.insert(r.name.clone()) {
            true
        } else {
            warn!(name = %r.name, "dropping duplicate repository record");
            false
        }
    });
    before - repos.len()
}

/// Apply `req` to `repos` at instant `now`.
///
/// The first record named `req.name` is updated in place; if there is none, a
/// new master record is appended. After the call no two records share a name.
pub fn upsert(repos: &mut Vec<Repo>, req: &UpsertRequest, now: DateTime<FixedOffset>) -> UpsertOutcome {
    let duplicates_dropped = dedup_by_name(repos);

    let (index, inserted) = match find_by_name(repos, &req.name) {
        Some(i) => (i, false),
        None => {
            repos.push(Repo::new_master(req.name.clone()));
            (repos.len() - 1, true)
        }
    };

    let repo = &mut repos[index];
    repo.status = req.status.into();

    if let Some(bytes) = req.size.filter(|b| *b != 0) {
        repo.set_size(bytes);
    }

    if let Some(offset) = req.schedule.filter(|d| !d.is_zero()) {
        let next = now + offset;
        for field in stamped_fields(Status::Pending) {
            repo.stamp(*field, next);
        }
    }

    for field in stamped_fields(req.status) {
        repo.stamp(*field, now);
    }

    debug!(name = %req.name, status = %req.status, index, inserted, "stamped repository");

    UpsertOutcome {
        index,
        inserted,
        duplicates_dropped,
    }
}
