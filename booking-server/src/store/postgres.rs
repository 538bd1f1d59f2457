//! PostgreSQL-backed store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::domain::{BookingId, NewBooking, SearchCriteria, TrainRow};

use super::RailStore;
use super::error::StoreError;
use super::query::{INSERT_BOOKING, SELECT_STATIONS, TrainQuery};

/// Row shape of the train search query.
#[derive(Debug, sqlx::FromRow)]
struct TrainRecord {
    train_no: String,
    train_name: String,
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
    duration: String,
    class_type: String,
    status: String,
}

impl From<TrainRecord> for TrainRow {
    fn from(r: TrainRecord) -> Self {
        TrainRow {
            train_no: r.train_no,
            train_name: r.train_name,
            departure_time: r.departure_time,
            arrival_time: r.arrival_time,
            duration: r.duration,
            class_type: r.class_type,
            status: r.status,
        }
    }
}

/// Store backed by a PostgreSQL connection pool.
///
/// Each operation checks a connection out of the pool and hands it back
/// when the connection guard drops, on success and error paths alike.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a pool and verify the database is reachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "connected to database"
        );
        Ok(Self { pool })
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database migrations applied");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

#[async_trait]
impl RailStore for PgStore {
    async fn station_names(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let names = sqlx::query_scalar::<_, String>(SELECT_STATIONS)
            .fetch_all(&mut *conn)
            .await?;
        Ok(names)
    }

    async fn find_trains(&self, criteria: &SearchCriteria) -> Result<Vec<TrainRow>, StoreError> {
        let query = TrainQuery::for_criteria(criteria);
        let mut builder = query.build();
        debug!(sql = builder.sql(), "train search");

        let mut conn = self.pool.acquire().await?;
        let records = builder
            .build_query_as::<TrainRecord>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(records.into_iter().map(TrainRow::from).collect())
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingId, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let id = sqlx::query_scalar::<_, i64>(INSERT_BOOKING)
            .bind(&booking.user_name)
            .bind(&booking.user_email)
            .bind(booking.user_phone.as_deref())
            .bind(&booking.train_no)
            .bind(booking.journey_date)
            .bind(&booking.class_type)
            .fetch_one(&mut *conn)
            .await?;

        Ok(BookingId(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
