//! HTTP route handlers.

use std::path::Path;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{BookingRequest, SearchRequest};
use crate::service::ServiceError;

use super::dto::*;
use super::state::AppState;

/// Message shown to clients when the store fails on a read.
const READ_FAILURE: &str = "Failed to fetch data from the database.";

/// Message shown to clients when a booking can't be saved.
const BOOKING_FAILURE: &str = "Booking failed due to a server error.";

/// Create the application router.
///
/// Anything not matched by an API route is served from `static_dir`, with
/// `/` resolving to its `index.html`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/api/locations", get(locations))
        .route("/api/trains", get(search_trains))
        .route("/api/book", post(book))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check.
async fn health() -> &'static str {
    "ok"
}

/// Readiness check: the store must answer.
async fn ready(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.store.ping().await.map_err(|e| AppError::Unavailable {
        message: e.to_string(),
    })?;
    Ok("ready")
}

/// Unique station names for the origin/destination pickers.
async fn locations(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let names = state.search.locations().await?;
    Ok(Json(names))
}

/// Search trains by route, date and class.
async fn search_trains(
    State(state): State<AppState>,
    query: Result<Query<TrainSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    // Malformed query strings get the JSON error shape too
    let Query(query) = query.map_err(|rejection| AppError::BadRequest {
        message: rejection.body_text(),
    })?;
    let request = SearchRequest::from(query);
    let trains = state.search.search(&request).await?;

    let results = trains.iter().map(TrainResult::from_availability).collect();
    Ok(Json(results))
}

/// Create a booking.
async fn book(State(state): State<AppState>, body: Bytes) -> Result<Response, BookingFailure> {
    // Parse JSON manually so malformed bodies get the booking error shape
    let body: BookRequestBody = serde_json::from_slice(&body).map_err(|e| {
        BookingFailure(AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        })
    })?;
    let request = BookingRequest::from(body);

    let confirmation = state
        .booking
        .book(&request)
        .await
        .map_err(|e| BookingFailure(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse::from_confirmation(&confirmation)),
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The caller's fault; the message is shown to them
    BadRequest { message: String },

    /// Server-side failure; the message is logged, never shown
    Internal { message: String },

    /// A dependency is down; the message is logged, never shown
    Unavailable { message: String },
}

impl AppError {
    /// Status code and client-safe message, logging anything hidden.
    fn status_and_message(&self, internal_message: &str) -> (StatusCode, String) {
        match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    internal_message.to_string(),
                )
            }
            AppError::Unavailable { message } => {
                error!(%message, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database unavailable.".to_string(),
                )
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        if e.is_caller_error() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message(READ_FAILURE);
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Error from the booking endpoint, which uses its own response shape.
#[derive(Debug)]
pub struct BookingFailure(pub AppError);

impl IntoResponse for BookingFailure {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message(BOOKING_FAILURE);
        let body = Json(BookFailureResponse {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}
