//! Journey dates and timetable times.
//!
//! Dates travel over the wire as ISO `YYYY-MM-DD`; timetable times are
//! stored with seconds but only ever shown to the minute.

use chrono::{NaiveDate, NaiveTime};

/// Error returned when parsing an invalid journey date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a journey date in `YYYY-MM-DD` format.
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use booking_server::domain::parse_journey_date;
///
/// assert!(parse_journey_date("2024-05-01").is_ok());
/// assert!(parse_journey_date("2024-02-30").is_err());
/// assert!(parse_journey_date("01/05/2024").is_err());
/// ```
pub fn parse_journey_date(s: &str) -> Result<NaiveDate, TimeError> {
    let s = s.trim();
    if s.len() != 10 {
        return Err(TimeError::new("expected YYYY-MM-DD format"));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TimeError::new("not a calendar date"))
}

/// Format a timetable time as `HH:MM`, dropping seconds.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
