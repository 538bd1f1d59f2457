//! Booking creation.
//!
//! A booking is appended exactly once per successful call. Seat availability
//! is neither consulted nor decremented, so a booking is a registered
//! request rather than a seat guarantee. Identical requests are not
//! de-duplicated: each call yields a new booking id.

use std::sync::Arc;

use tracing::info;

use crate::domain::{BookingConfirmation, BookingRequest};
use crate::store::RailStore;

use super::ServiceError;

/// Validates and records bookings.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn RailStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn RailStore>) -> Self {
        Self { store }
    }

    /// Validate `request` and append it to the store.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ServiceError> {
        let booking = request.validate()?;

        let booking_id = self.store.insert_booking(&booking).await?;

        info!(
            %booking_id,
            train_no = %booking.train_no,
            date = %booking.journey_date,
            class = %booking.class_type,
            "booking created"
        );

        Ok(BookingConfirmation { booking_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingId, ValidationError};
    use crate::store::MockStore;

    fn complete() -> BookingRequest {
        BookingRequest {
            user_name: Some("Asha Rao".into()),
            user_email: Some("asha@example.com".into()),
            user_phone: None,
            train_no: Some("12951".into()),
            journey_date: Some("2024-05-01".into()),
            class_type: Some("3A".into()),
        }
    }

    #[tokio::test]
    async fn book_persists_one_row() {
        let store = Arc::new(MockStore::new());
        let service = BookingService::new(store.clone());

        let confirmation = service.book(&complete()).await.unwrap();

        let bookings = store.bookings().await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].0, confirmation.booking_id);
        assert_eq!(bookings[0].1.user_name, "Asha Rao");
        assert_eq!(bookings[0].1.train_no, "12951");
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn identical_requests_get_distinct_ids() {
        let store = Arc::new(MockStore::new());
        let service = BookingService::new(store.clone());

        let first = service.book(&complete()).await.unwrap();
        let second = service.book(&complete()).await.unwrap();

        assert_ne!(first.booking_id, second.booking_id);
        assert_eq!(store.bookings().await.len(), 2);
    }

    #[tokio::test]
    async fn missing_user_name_writes_nothing() {
        let store = Arc::new(MockStore::new());
        let service = BookingService::new(store.clone());

        let mut request = complete();
        request.user_name = None;
        let err = service.book(&request).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Invalid(ValidationError::MissingFields(ref f)) if f == &vec!["userName"]
        ));
        assert_eq!(store.writes(), 0);
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_date_writes_nothing() {
        let store = Arc::new(MockStore::new());
        let service = BookingService::new(store.clone());

        let mut request = complete();
        request.journey_date = Some("1st May".into());

        assert!(service.book(&request).await.unwrap_err().is_caller_error());
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let store = Arc::new(MockStore::new());
        store.set_offline(true);
        let service = BookingService::new(store.clone());

        let err = service.book(&complete()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn booking_does_not_check_availability() {
        // No train or availability is seeded at all.
        let store = Arc::new(MockStore::new());
        let service = BookingService::new(store.clone());

        let confirmation = service.book(&complete()).await.unwrap();
        assert_eq!(confirmation.booking_id, BookingId(1));
        assert_eq!(store.reads(), 0);
    }
}
