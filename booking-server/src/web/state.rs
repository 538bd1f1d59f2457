//! Application state for the web layer.

use std::sync::Arc;

use crate::service::{BookingService, TrainSearchService};
use crate::store::RailStore;

/// Shared application state.
///
/// Holds the services every handler needs. Nothing in here is mutable:
/// all request data lives in the store.
#[derive(Clone)]
pub struct AppState {
    /// Train search and station listing
    pub search: Arc<TrainSearchService>,

    /// Booking creation
    pub booking: Arc<BookingService>,

    /// Store handle, for readiness checks
    pub store: Arc<dyn RailStore>,
}

impl AppState {
    /// Create a new app state over a store.
    pub fn new(store: Arc<dyn RailStore>) -> Self {
        Self {
            search: Arc::new(TrainSearchService::new(store.clone())),
            booking: Arc::new(BookingService::new(store.clone())),
            store,
        }
    }
}
