//! Booking requests and confirmations.

use std::fmt;

use chrono::NaiveDate;

use super::error::{ValidationError, require_fields};
use super::time::parse_journey_date;

/// Store-assigned booking identifier.
///
/// Returned to the caller as the confirmation token. It carries no other
/// meaning: it is not a seat guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingId(pub i64);

impl BookingId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unvalidated booking, as it arrives from the caller.
///
/// Field names in [`ValidationError`]s use the wire spelling
/// (`userName`, `trainNo`, ...).
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    pub train_no: Option<String>,
    pub journey_date: Option<String>,
    pub class_type: Option<String>,
}

impl BookingRequest {
    /// Check required fields and parse the journey date.
    ///
    /// Values are trimmed. A blank phone number counts as absent.
    pub fn validate(&self) -> Result<NewBooking, ValidationError> {
        let [user_name, user_email, train_no, date, class_type] = require_fields([
            ("userName", self.user_name.as_deref()),
            ("userEmail", self.user_email.as_deref()),
            ("trainNo", self.train_no.as_deref()),
            ("journeyDate", self.journey_date.as_deref()),
            ("classType", self.class_type.as_deref()),
        ])?;

        let journey_date = parse_journey_date(&date).map_err(|_| ValidationError::InvalidDate {
            field: "journeyDate",
            value: date,
        })?;

        let user_phone = self
            .user_phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(NewBooking {
            user_name,
            user_email,
            user_phone,
            train_no,
            journey_date,
            class_type,
        })
    }
}

/// A validated booking, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub train_no: String,
    pub journey_date: NaiveDate,
    pub class_type: String,
}

/// Result of a successful booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
}
