//! Train search.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{SearchCriteria, SearchRequest, TrainAvailability};
use crate::store::RailStore;

use super::ServiceError;

/// Finds trains on a route and decodes their availability.
#[derive(Clone)]
pub struct TrainSearchService {
    store: Arc<dyn RailStore>,
}

impl TrainSearchService {
    pub fn new(store: Arc<dyn RailStore>) -> Self {
        Self { store }
    }

    /// Search trains for a route, date and class.
    ///
    /// With the "All" class filter each train appears once per class it
    /// runs on that date. An empty result is not an error.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<TrainAvailability>, ServiceError> {
        let criteria = SearchCriteria::from_request(request)?;

        let rows = self.store.find_trains(&criteria).await?;

        debug!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            date = %criteria.journey_date,
            class = %criteria.class,
            rows = rows.len(),
            "train search"
        );

        Ok(rows.into_iter().map(TrainAvailability::from_row).collect())
    }

    /// Unique station names, ascending.
    pub async fn locations(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.store.station_names().await?)
    }
}
