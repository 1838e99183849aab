//! Command-line arguments turned into a validated [`UpsertRequest`].

use std::time::Duration as StdDuration;

use chrono::Duration;
use thiserror::Error;

use crate::record::Status;
use crate::transition::UpsertRequest;

pub const USAGE: &str =
    "syncstamp {syncing|success|failed} <repo> [<size> [<next schedule>]] < src.json > dest.json";

/// Longest schedule offset accepted (100 years).
const MAX_SCHEDULE: StdDuration = StdDuration::from_secs(100 * 365 * 24 * 3600);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("status '{0}' cannot be requested directly\nusage: {usage}", usage = USAGE)]
    UnsupportedStatus(Status),

    #[error("repository name must not be empty\nusage: {usage}", usage = USAGE)]
    EmptyName,

    #[error("invalid size '{input}': {reason}")]
    InvalidSize { input: String, reason: String },

    #[error("invalid schedule '{input}': {reason}")]
    InvalidSchedule { input: String, reason: String },
}

/// Raw positional arguments as the operator typed them.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub status: Status,
    pub name: String,
    pub size: Option<String>,
    pub schedule: Option<String>,
}

impl Invocation {
    /// Validate every argument and build the request for the upsert engine.
    pub fn into_request(self) -> Result<UpsertRequest, InvocationError> {
        if !matches!(self.status, Status::Syncing | Status::Success | Status::Failed) {
            return Err(InvocationError::UnsupportedStatus(self.status));
        }
        if self.name.is_empty() {
            return Err(InvocationError::EmptyName);
        }

        let size = self.size.as_deref().map(parse_size).transpose()?.filter(|b| *b != 0);
        let schedule = self
            .schedule
            .as_deref()
            .map(parse_schedule)
            .transpose()?
            .filter(|d| !d.is_zero());

        Ok(UpsertRequest {
            name: self.name,
            status: self.status,
            size,
            schedule,
        })
    }
}

/// Parse a decimal byte count. `0` is valid and means "leave size alone".
pub fn parse_size(input: &str) -> Result<u64, InvocationError> {
    input.trim().parse::<u64>().map_err(|e| InvocationError::InvalidSize {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a human duration. Bare `0` is zero.
///
/// Accepts everything `humantime` does: compact Go-style forms (`1h30m`,
/// `500ms`, `1.5h`), space-separated forms (`1h 30m`) and long unit names
/// (`2hours`). Negative values and offsets over 100 years are rejected.
pub fn parse_schedule(input: &str) -> Result<Duration, InvocationError> {
    let invalid = |reason: String| InvocationError::InvalidSchedule {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed == "0" {
        return Ok(Duration::zero());
    }
    if trimmed.starts_with('-') {
        return Err(invalid("negative durations are not supported".to_string()));
    }

    let parsed = humantime::parse_duration(trimmed).map_err(|e| invalid(e.to_string()))?;
    if parsed > MAX_SCHEDULE {
        return Err(invalid("longer than 100 years".to_string()));
    }
    Duration::from_std(parsed).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(status: Status, name: &str) -> Invocation {
        Invocation {
            status,
            name: name.to_string(),
            ..Invocation::default()
        }
    }

    #[test]
    fn test_pending_is_rejected() {
        let err = invocation(Status::Pending, "debian").into_request().unwrap_err();
        assert_eq!(err, InvocationError::UnsupportedStatus(Status::Pending));
        assert!(err.to_string().contains("usage: syncstamp {syncing|success|failed}"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = invocation(Status::Syncing, "").into_request().unwrap_err();
        assert_eq!(err, InvocationError::EmptyName);
    }

    #[test]
    fn test_minimal_request() {
        let req = invocation(Status::Failed, "debian").into_request().unwrap();
        assert_eq!(req.name, "debian");
        assert_eq!(req.status, Status::Failed);
        assert_eq!(req.size, None);
        assert_eq!(req.schedule, None);
    }

    #[test]
    fn test_zero_size_and_schedule_mean_unchanged() {
        let mut inv = invocation(Status::Success, "debian");
        inv.size = Some("0".to_string());
        inv.schedule = Some("0".to_string());
        let req = inv.into_request().unwrap();
        assert_eq!(req.size, None);
        assert_eq!(req.schedule, None);
    }

    #[test]
    fn test_full_request() {
        let mut inv = invocation(Status::Success, "debian");
        inv.size = Some("1048576".to_string());
        inv.schedule = Some("1h 30m".to_string());
        let req = inv.into_request().unwrap();
        assert_eq!(req.size, Some(1_048_576));
        assert_eq!(req.schedule, Some(Duration::minutes(90)));
    }

    #[test]
    fn test_parse_size_errors() {
        assert!(matches!(parse_size("12MB"), Err(InvocationError::InvalidSize { .. })));
        assert!(matches!(parse_size("-5"), Err(InvocationError::InvalidSize { .. })));
    }

    #[test]
    fn test_parse_schedule() {
        assert_eq!(parse_schedule("1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_schedule("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_schedule("0").unwrap(), Duration::zero());
    }

    #[test]
    fn test_parse_schedule_compact_forms() {
        assert_eq!(parse_schedule("1h30m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_schedule("500ms").unwrap(), Duration::milliseconds(500));
        assert_eq!(parse_schedule("1h 30m").unwrap(), Duration::minutes(90));
    }

    #[test]
    fn test_parse_schedule_errors() {
        for bad in ["soon", "-1h", "1000years", ""] {
            assert!(
                matches!(parse_schedule(bad), Err(InvocationError::InvalidSchedule { .. })),
                "{bad} should be rejected"
            );
        }
    }
}
