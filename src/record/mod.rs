//! Repository records as stored in the mirror status list.
//!
//! The on-disk shape is a flat JSON object per repository. Each timestamp is
//! kept twice: an RFC 3339 string for humans and an epoch integer for
//! machines. [`Repo::stamp`] is the only place either half is written, so the
//! two never drift apart.

pub mod size;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Sync status of a mirrored repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting for the next scheduled sync.
    #[default]
    Pending,
    /// A sync is in progress.
    Syncing,
    /// The last sync completed.
    Success,
    /// The last sync failed.
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Syncing => "syncing",
            Status::Success => "success",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "syncing" => Ok(Status::Syncing),
            "success" => Ok(Status::Success),
            "failed" => Ok(Status::Failed),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordStatus
// ---------------------------------------------------------------------------

/// The `status` value of a stored record.
///
/// Records this run does not target are written back exactly as read, so a
/// missing, empty or unrecognised status is kept verbatim in [`Other`].
///
/// [`Other`]: RecordStatus::Other
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Known(Status),
    Other(String),
}

impl RecordStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RecordStatus::Known(s) => s.as_str(),
            RecordStatus::Other(raw) => raw,
        }
    }
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Other(String::new())
    }
}

impl From<Status> for RecordStatus {
    fn from(s: Status) -> Self {
        RecordStatus::Known(s)
    }
}

impl PartialEq<Status> for RecordStatus {
    fn eq(&self, other: &Status) -> bool {
        matches!(self, RecordStatus::Known(s) if s == other)
    }
}

impl Serialize for RecordStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.parse::<Status>() {
            Ok(status) => RecordStatus::Known(status),
            Err(_) => RecordStatus::Other(raw),
        })
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// TimeField
// ---------------------------------------------------------------------------

/// Identifies one (string, epoch) timestamp pair on a [`Repo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    LastUpdate,
    LastStarted,
    LastEnded,
    NextSchedule,
}

impl TimeField {
    /// Every timestamp pair, in serialization order.
    pub const ALL: [TimeField; 4] = [
        TimeField::LastUpdate,
        TimeField::LastStarted,
        TimeField::LastEnded,
        TimeField::NextSchedule,
    ];

    /// JSON key of the string half. The epoch half is this plus `_ts`.
    pub fn key(&self) -> &'static str {
        match self {
            TimeField::LastUpdate => "last_update",
            TimeField::LastStarted => "last_started",
            TimeField::LastEnded => "last_ended",
            TimeField::NextSchedule => "next_schedule",
        }
    }
}

// ---------------------------------------------------------------------------
// Repo
// ---------------------------------------------------------------------------

/// One tracked repository.
///
/// Every field is emitted on output. Missing or `null` fields on input take
/// their default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_master: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub upstream: String,
    pub status: RecordStatus,

    #[serde(deserialize_with = "null_as_default")]
    pub last_update: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_update_ts: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_started: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_started_ts: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_ended: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_ended_ts: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub next_schedule: String,
    #[serde(deserialize_with = "null_as_default")]
    pub next_schedule_ts: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size_bytes: u64,
}

impl Repo {
    /// A fresh primary record for a repository seen for the first time.
    pub fn new_master(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_master: true,
            ..Self::default()
        }
    }

    /// Read both halves of a timestamp pair.
    pub fn time(&self, field: TimeField) -> (&str, i64) {
        match field {
            TimeField::LastUpdate => (&self.last_update, self.last_update_ts),
            TimeField::LastStarted => (&self.last_started, self.last_started_ts),
            TimeField::LastEnded => (&self.last_ended, self.last_ended_ts),
            TimeField::NextSchedule => (&self.next_schedule, self.next_schedule_ts),
        }
    }

    fn time_mut(&mut self, field: TimeField) -> (&mut String, &mut i64) {
        match field {
            TimeField::LastUpdate => (&mut self.last_update, &mut self.last_update_ts),
            TimeField::LastStarted => (&mut self.last_started, &mut self.last_started_ts),
            TimeField::LastEnded => (&mut self.last_ended, &mut self.last_ended_ts),
            TimeField::NextSchedule => (&mut self.next_schedule, &mut self.next_schedule_ts),
        }
    }

    /// Write both halves of `field` from the single instant `at`.
    pub fn stamp(&mut self, field: TimeField, at: DateTime<FixedOffset>) {
        let (iso, ts) = self.time_mut(field);
        *iso = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        *ts = at.timestamp();
    }

    /// Set the byte count and its human-readable rendering together.
    pub fn set_size(&mut self, bytes: u64) {
        self.size_bytes = bytes;
        self.size = size::byte_unit(bytes);
    }
}
