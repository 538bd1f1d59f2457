//! Store error types.

/// Errors from the persistence layer.
///
/// These carry full diagnostics for the server log. They must never be
/// shown to API clients verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection, pool or query failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the bundled schema migrations failed
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Seed data for the in-memory store couldn't be loaded
    #[error("seed data error: {message}")]
    Seed { message: String },
}
