//! Domain types for the railway reservation server.
//!
//! Everything here is pure: validation of incoming requests, the seat
//! availability codec, and the shapes that flow between the store and the
//! web layer. Values are validated at construction, so code that receives
//! them can trust their fields.

mod availability;
mod booking;
mod class;
mod error;
mod time;
mod train;

pub use availability::AvailabilityState;
pub use booking::{BookingConfirmation, BookingId, BookingRequest, NewBooking};
pub use class::{ALL_CLASSES, ClassFilter};
pub use error::ValidationError;
pub use time::{TimeError, format_hhmm, parse_journey_date};
pub use train::{SearchCriteria, SearchRequest, TrainAvailability, TrainRow};
