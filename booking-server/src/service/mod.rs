//! Application services.
//!
//! Services validate caller input, talk to the store and shape results.
//! Validation always happens before the store is touched, so a bad request
//! costs no database round trip.

mod booking;
mod search;

pub use booking::BookingService;
pub use search::TrainSearchService;

use crate::domain::ValidationError;
use crate::store::StoreError;

/// Errors from service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The caller sent a bad request
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Whether the caller, not the server, is at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ServiceError::Invalid(_))
    }
}
