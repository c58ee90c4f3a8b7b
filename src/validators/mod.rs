//! Pure validation routines shared by the services.
//!
//! None of these touch the store; each returns a typed error that converts
//! into [`crate::errors::ServiceError`].

pub mod blank;
pub mod dates;
pub mod operational_hours;

pub use blank::{ensure_not_blank, BlankFieldsError, StringFields};
pub use dates::{check_notification_window, parse_date, DateFormatError, DateOrderError};
pub use operational_hours::{validate_operational_hours, OperationalHoursError, Weekday};
