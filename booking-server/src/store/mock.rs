//! In-memory store for testing and local development.
//!
//! Mirrors the PostgreSQL store's semantics (the join, the filters, result
//! ordering and store-assigned booking ids) without a database. Seed data
//! can be built in code or loaded from a JSON file.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::{BookingId, NewBooking, SearchCriteria, TrainRow};

use super::RailStore;
use super::error::StoreError;

/// A row of the `trains` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTrain {
    pub train_no: String,
    pub train_name: String,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration: String,
}

/// A row of the `availability` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAvailability {
    pub train_no: String,
    pub journey_date: NaiveDate,
    pub class_type: String,
    pub status: String,
}

/// Seed file layout.
#[derive(Debug, Default, Deserialize)]
struct SeedData {
    #[serde(default)]
    trains: Vec<SeedTrain>,
    #[serde(default)]
    availability: Vec<SeedAvailability>,
}

#[derive(Debug, Default)]
struct Tables {
    trains: Vec<SeedTrain>,
    availability: Vec<SeedAvailability>,
    bookings: Vec<(BookingId, NewBooking)>,
    next_id: i64,
}

/// Store that keeps its tables in memory.
#[derive(Debug, Default)]
pub struct MockStore {
    tables: RwLock<Tables>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    offline: AtomicBool,
}

impl MockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load trains and availability from a JSON seed file.
    ///
    /// The file holds `{"trains": [...], "availability": [...]}` with
    /// camelCase fields; times are `HH:MM:SS`, dates `YYYY-MM-DD`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| StoreError::Seed {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&json).map_err(|e| StoreError::Seed {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Parse seed data from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let seed: SeedData = serde_json::from_str(json)?;
        let mut store = Self::new();
        let tables = store.tables.get_mut();
        tables.trains = seed.trains;
        tables.availability = seed.availability;
        Ok(store)
    }

    /// Add a train.
    pub fn with_train(mut self, train: SeedTrain) -> Self {
        self.tables.get_mut().trains.push(train);
        self
    }

    /// Add an availability record.
    pub fn with_availability(mut self, record: SeedAvailability) -> Self {
        self.tables.get_mut().availability.push(record);
        self
    }

    /// Make every subsequent operation fail as if the database were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of read operations attempted.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of write operations attempted.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// All stored bookings, oldest first.
    pub async fn bookings(&self) -> Vec<(BookingId, NewBooking)> {
        self.tables.read().await.bookings.clone()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RailStore for MockStore {
    async fn station_names(&self) -> Result<Vec<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let tables = self.tables.read().await;
        let names: BTreeSet<&str> = tables
            .trains
            .iter()
            .flat_map(|t| [t.from_station.as_str(), t.to_station.as_str()])
            .collect();

        Ok(names.into_iter().map(str::to_string).collect())
    }

    async fn find_trains(&self, criteria: &SearchCriteria) -> Result<Vec<TrainRow>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let tables = self.tables.read().await;
        let mut rows: Vec<TrainRow> = tables
            .trains
            .iter()
            .filter(|t| t.from_station == criteria.origin && t.to_station == criteria.destination)
            .flat_map(|t| {
                tables
                    .availability
                    .iter()
                    .filter(move |a| {
                        a.train_no == t.train_no
                            && a.journey_date == criteria.journey_date
                            && criteria.class.matches(&a.class_type)
                    })
                    .map(move |a| TrainRow {
                        train_no: t.train_no.clone(),
                        train_name: t.train_name.clone(),
                        departure_time: t.departure_time,
                        arrival_time: t.arrival_time,
                        duration: t.duration.clone(),
                        class_type: a.class_type.clone(),
                        status: a.status.clone(),
                    })
            })
            .collect();

        rows.sort_by(|a, b| {
            (a.departure_time, &a.train_no, &a.class_type).cmp(&(
                b.departure_time,
                &b.train_no,
                &b.class_type,
            ))
        });
        Ok(rows)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingId, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let mut tables = self.tables.write().await;
        tables.next_id += 1;
        let id = BookingId(tables.next_id);
        tables.bookings.push((id, booking.clone()));
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::domain::ClassFilter;

    fn criteria(class: ClassFilter) -> SearchCriteria {
        SearchCriteria::new("Mumbai", "Delhi", date("2024-05-01"), class)
    }

    #[tokio::test]
    async fn find_all_classes() {
        let store = sample_store();
        let rows = store.find_trains(&criteria(ClassFilter::All)).await.unwrap();

        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.train_no.as_str(), r.class_type.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("12951", "2A"),
                ("12951", "3A"),
                ("12953", "3A"),
                ("12953", "Sleeper")
            ]
        );
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn find_specific_class() {
        let store = sample_store();
        let rows = store
            .find_trains(&criteria(ClassFilter::Only("Sleeper".into())))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].train_no, "12953");
        assert_eq!(rows[0].status, "available-120");
    }

    #[tokio::test]
    async fn find_other_date_and_direction() {
        let store = sample_store();
        let c = SearchCriteria::new("Mumbai", "Delhi", date("2024-05-02"), ClassFilter::All);
        let rows = store.find_trains(&c).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "REGRET");

        let c = SearchCriteria::new("Delhi", "Mumbai", date("2024-05-01"), ClassFilter::All);
        let rows = store.find_trains(&c).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].train_no, "12952");
    }

    #[tokio::test]
    async fn station_names_are_unique_and_sorted() {
        let store = sample_store()
            .with_train(train("11001", "Local", "delhi", "Agra", "06:00:00"));
        let names = store.station_names().await.unwrap();

        assert_eq!(names, vec!["Agra", "Delhi", "Mumbai", "delhi"]);
    }

    #[tokio::test]
    async fn booking_ids_are_distinct_and_increasing() {
        let store = MockStore::new();
        let booking = NewBooking {
            user_name: "Asha".into(),
            user_email: "asha@example.com".into(),
            user_phone: None,
            train_no: "12951".into(),
            journey_date: date("2024-05-01"),
            class_type: "3A".into(),
        };

        let a = store.insert_booking(&booking).await.unwrap();
        let b = store.insert_booking(&booking).await.unwrap();

        assert!(b > a);
        assert_eq!(store.bookings().await.len(), 2);
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn offline_store_fails() {
        let store = sample_store();
        store.set_offline(true);

        assert!(store.find_trains(&criteria(ClassFilter::All)).await.is_err());
        assert!(store.station_names().await.is_err());
        assert!(store.ping().await.is_err());

        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }

    #[test]
    fn load_seed_json() {
        let json = r#"{
            "trains": [{
                "trainNo": "12951",
                "trainName": "Mumbai Rajdhani",
                "fromStation": "Mumbai",
                "toStation": "Delhi",
                "departureTime": "17:00:00",
                "arrivalTime": "08:32:00",
                "duration": "15h 32m"
            }],
            "availability": [{
                "trainNo": "12951",
                "journeyDate": "2024-05-01",
                "classType": "3A",
                "status": "waitlist-12"
            }]
        }"#;

        let store = MockStore::from_json(json).unwrap();
        let tables = store.tables.try_read().unwrap();
        assert_eq!(tables.trains.len(), 1);
        assert_eq!(tables.availability[0].status, "waitlist-12");
    }

    #[test]
    fn load_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, r#"{"trains": []}"#).unwrap();

        assert!(MockStore::from_json_file(&path).is_ok());
        assert!(MockStore::from_json_file(dir.path().join("missing.json")).is_err());
    }

    #[tokio::test]
    async fn bundled_seed_loads() {
        let store = MockStore::from_json_file("data/seed.json").unwrap();
        assert_eq!(store.station_names().await.unwrap(), vec!["Delhi", "Mumbai"]);

        let rows = store.find_trains(&criteria(ClassFilter::All)).await.unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn malformed_seed_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, r#"{"trains": [{"trainNo": 1}]}"#).unwrap();

        let err = MockStore::from_json_file(&path).unwrap_err();
        assert!(matches!(err, StoreError::Seed { .. }));
    }
}
