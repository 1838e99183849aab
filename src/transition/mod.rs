//! Status transitions: which timestamps a status stamps, and the upsert that
//! applies one transition to a status list.

pub mod upsert;

pub use self::upsert::{upsert, UpsertOutcome, UpsertRequest};

use crate::record::{Status, TimeField};

/// Timestamp pairs stamped when a record enters `status`.
pub fn stamped_fields(status: Status) -> &'static [TimeField] {
    match status {
        Status::Pending => &[TimeField::NextSchedule],
        Status::Syncing => &[TimeField::LastStarted],
        Status::Success => &[TimeField::LastUpdate, TimeField::LastEnded],
        Status::Failed => &[TimeField::LastEnded],
    }
}
