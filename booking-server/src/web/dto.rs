//! Data transfer objects for web requests and responses.
//!
//! Field names here are the HTTP contract the frontend depends on.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{BookingConfirmation, BookingRequest, SearchRequest, TrainAvailability};

/// Query string of `GET /api/trains`.
#[derive(Debug, Default, Deserialize)]
pub struct TrainSearchQuery {
    /// Origin station name
    pub from: Option<String>,

    /// Destination station name
    pub to: Option<String>,

    /// Journey date, `YYYY-MM-DD`
    pub date: Option<String>,

    /// Class type, or `All`
    pub class: Option<String>,
}

impl From<TrainSearchQuery> for SearchRequest {
    fn from(q: TrainSearchQuery) -> Self {
        SearchRequest {
            from: q.from,
            to: q.to,
            date: q.date,
            class: q.class,
        }
    }
}

/// A train in search results.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    /// Train number
    pub no: String,

    /// Train name
    pub name: String,

    /// Departure time, `HH:MM`
    pub departure: String,

    /// Arrival time, `HH:MM`
    pub arrival: String,

    pub duration: String,

    /// Class type of this row
    pub class: String,

    /// Display text, e.g. `"Waitlist (12)"`
    pub availability: String,
}

impl TrainResult {
    pub fn from_availability(t: &TrainAvailability) -> Self {
        Self {
            no: t.train_no.clone(),
            name: t.name.clone(),
            departure: t.departure.clone(),
            arrival: t.arrival.clone(),
            duration: t.duration.clone(),
            class: t.class_type.clone(),
            availability: t.availability.display_text(),
        }
    }
}

/// Body of `POST /api/book`.
///
/// Every field is optional at this level so that missing fields are
/// reported by validation, all at once, rather than by the JSON parser.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequestBody {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_phone: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub train_no: Option<String>,
    pub journey_date: Option<String>,
    pub class_type: Option<String>,
}

impl From<BookRequestBody> for BookingRequest {
    fn from(b: BookRequestBody) -> Self {
        BookingRequest {
            user_name: b.user_name,
            user_email: b.user_email,
            user_phone: b.user_phone,
            train_no: b.train_no,
            journey_date: b.journey_date,
            class_type: b.class_type,
        }
    }
}

/// Accept a JSON string or number, keeping its text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Successful booking response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: i64,
}

impl BookResponse {
    pub fn from_confirmation(confirmation: &BookingConfirmation) -> Self {
        Self {
            success: true,
            message: "Booking successful!".to_string(),
            booking_id: confirmation.booking_id.get(),
        }
    }
}

/// Failed booking response.
#[derive(Debug, Serialize)]
pub struct BookFailureResponse {
    pub success: bool,
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
