//! Web layer for the railway reservation server.
//!
//! Provides the JSON API for station listing, train search and booking,
//! and serves the static frontend.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, BookingFailure, create_router};
pub use state::AppState;
