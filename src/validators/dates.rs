use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date prefix pattern is valid"));

/// Human-readable hint appended to every date format failure.
pub const DATE_FORMAT_HINT: &str = "YYYY-MM-DD or an ISO 8601 timestamp";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} date: '{value}'. Expected format {hint}.")]
pub struct DateFormatError {
    pub field: String,
    pub value: String,
    pub hint: &'static str,
}

impl DateFormatError {
    fn new(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            hint: DATE_FORMAT_HINT,
        }
    }
}

/// Ordering violations between a notification's start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateOrderError {
    #[error("StartsOn should be prior to EndsOn")]
    StartsAfterEnds,
    #[error("EndsOn cannot be in the past")]
    EndsInPast,
    #[error("StartsOn and EndsOn cannot be identical")]
    Identical,
}

/// Parses a caller-supplied date string.
///
/// Anything that does not begin with `YYYY-MM-DD` is rejected before a full
/// parse is attempted. A bare date is read as midnight UTC; longer values must
/// be RFC 3339 timestamps, or naive ISO timestamps which are taken as UTC.
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, DateFormatError> {
    let value = value.trim();
    if !DATE_PREFIX.is_match(value) {
        return Err(DateFormatError::new(field, value));
    }

    if value.len() == 10 {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| DateFormatError::new(field, value));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .map_err(|_| DateFormatError::new(field, value))
}

/// Runs the three ordering checks in sequence and reports the first failure.
///
/// `now` is passed in so the past-end check is deterministic under test.
pub fn check_notification_window(
    starts_on: DateTime<Utc>,
    ends_on: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), DateOrderError> {
    let Some(ends_on) = ends_on else {
        return Ok(());
    };

    if starts_on > ends_on {
        return Err(DateOrderError::StartsAfterEnds);
    }
    if ends_on < now {
        return Err(DateOrderError::EndsInPast);
    }
    if starts_on == ends_on {
        return Err(DateOrderError::Identical);
    }
    Ok(())
}
