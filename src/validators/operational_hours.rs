use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::entities::operation::OperationalHours;

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+:[0-9]+\s[AP]M$").expect("time pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationalHoursError {
    #[error("'{0}' is not a valid day of the week.")]
    UnknownDay(String),

    #[error("Operational hours contain a duplicate entry for {0}.")]
    DuplicateDay(Weekday),

    #[error("Operational hours must cover every day of the week. Missing: {}.", join_days(.0))]
    MissingDays(Vec<Weekday>),

    #[error("Invalid {which} time '{value}' for {day}. Expected format H:MM AM|PM.")]
    InvalidTime {
        day: String,
        which: &'static str,
        value: String,
    },
}

fn join_days(days: &[Weekday]) -> String {
    days.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks a weekly schedule: exactly one entry per weekday, and every
/// open/close time in 12-hour `H:MM AM|PM` form.
///
/// Days are struck from a working set as they are seen, so a repeated day is
/// reported as a duplicate before any leftover (missing) days are considered.
pub fn validate_operational_hours(hours: &[OperationalHours]) -> Result<(), OperationalHoursError> {
    let mut remaining: Vec<Weekday> = Weekday::iter().collect();

    for entry in hours {
        let day = Weekday::from_str(entry.day.trim())
            .map_err(|_| OperationalHoursError::UnknownDay(entry.day.clone()))?;
        match remaining.iter().position(|d| *d == day) {
            Some(idx) => {
                remaining.remove(idx);
            }
            None => return Err(OperationalHoursError::DuplicateDay(day)),
        }
    }

    if !remaining.is_empty() {
        return Err(OperationalHoursError::MissingDays(remaining));
    }

    for entry in hours {
        for (which, value) in [("open", &entry.open), ("close", &entry.close)] {
            if !TIME_OF_DAY.is_match(value) {
                return Err(OperationalHoursError::InvalidTime {
                    day: entry.day.clone(),
                    which,
                    value: value.clone(),
                });
            }
        }
    }

    Ok(())
}
