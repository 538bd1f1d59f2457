//! Trains, search criteria and per-class availability.

use chrono::{NaiveDate, NaiveTime};

use super::availability::AvailabilityState;
use super::class::ClassFilter;
use super::error::{ValidationError, require_fields};
use super::time::{format_hhmm, parse_journey_date};

/// An unvalidated train search, as it arrives from the caller.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<String>,
    pub class: Option<String>,
}

/// A validated route/date/class search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Origin station name, matched exactly
    pub origin: String,

    /// Destination station name, matched exactly
    pub destination: String,

    /// Date of travel
    pub journey_date: NaiveDate,

    /// Class restriction
    pub class: ClassFilter,
}

impl SearchCriteria {
    /// Build criteria from explicit parts.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        journey_date: NaiveDate,
        class: ClassFilter,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            journey_date,
            class,
        }
    }

    /// Validate a raw request.
    ///
    /// `from`, `to`, `date` and `class` are all required; `class` may be
    /// `All` to search every class.
    pub fn from_request(request: &SearchRequest) -> Result<Self, ValidationError> {
        let [origin, destination, date, class] = require_fields([
            ("from", request.from.as_deref()),
            ("to", request.to.as_deref()),
            ("date", request.date.as_deref()),
            ("class", request.class.as_deref()),
        ])?;

        let journey_date = parse_journey_date(&date).map_err(|_| ValidationError::InvalidDate {
            field: "date",
            value: date,
        })?;

        Ok(Self {
            origin,
            destination,
            journey_date,
            class: ClassFilter::parse(&class),
        })
    }
}

/// A train joined with one availability record, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRow {
    pub train_no: String,
    pub train_name: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration: String,
    pub class_type: String,
    pub status: String,
}

/// One search result: a train in one class, with decoded availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainAvailability {
    pub train_no: String,
    pub name: String,

    /// Departure, `HH:MM`
    pub departure: String,

    /// Arrival, `HH:MM`
    pub arrival: String,

    pub duration: String,
    pub class_type: String,
    pub availability: AvailabilityState,
}

impl TrainAvailability {
    /// Decode a store row into a search result.
    pub fn from_row(row: TrainRow) -> Self {
        Self {
            availability: AvailabilityState::decode(&row.status),
            departure: format_hhmm(row.departure_time),
            arrival: format_hhmm(row.arrival_time),
            train_no: row.train_no,
            name: row.train_name,
            duration: row.duration,
            class_type: row.class_type,
        }
    }
}
