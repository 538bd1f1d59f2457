//! Persistence for trains, availability and bookings.
//!
//! The relational store is the single source of truth: nothing is cached
//! in-process, every search reads through and every booking writes
//! through. [`PgStore`] talks to PostgreSQL; [`MockStore`] keeps the same
//! tables in memory for tests and local development.

mod error;
mod mock;
mod postgres;
pub mod query;

use async_trait::async_trait;

use crate::domain::{BookingId, NewBooking, SearchCriteria, TrainRow};

pub use error::StoreError;
pub use mock::{MockStore, SeedAvailability, SeedTrain};
pub use postgres::PgStore;

#[cfg(test)]
pub(crate) use mock::fixtures;

/// Operations the services need from the store.
///
/// This abstraction allows the services to be tested with in-memory data.
#[async_trait]
pub trait RailStore: Send + Sync {
    /// Unique station names from both ends of every train, ascending.
    async fn station_names(&self) -> Result<Vec<String>, StoreError>;

    /// Trains joined with availability, narrowed by `criteria`.
    async fn find_trains(&self, criteria: &SearchCriteria) -> Result<Vec<TrainRow>, StoreError>;

    /// Append a booking and return its store-assigned id.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingId, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
