//! REST API endpoints for receipt submission and score retrieval.
//!
//! Submission consumes the request body as raw text: the identifier is
//! derived from the payload exactly as it arrived on the wire, so a
//! byte-identical resubmission maps to the same record. Parsing and
//! validation happen here, before the scoring engine ever sees the data.

use crate::ApiApplication;
use aide::axum::{
    ApiRouter,
    routing::{get, post},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tally_core::{
    models::{Receipt, ScoreRecord},
    ports::{ReceiptRepository as _, Repository},
    scoring,
};
use tracing::{Level, event};

/// Creates a router with receipt-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/process", post(process_receipt::<T>), |route| {
            route.tag("receipt")
        })
        .api_route_with("/{receipt_id}", get(get_receipt::<T>), |route| {
            route.tag("receipt")
        })
        .api_route_with("/{receipt_id}/points", get(get_receipt_points::<T>), |route| {
            route.tag("receipt")
        })
}

/// Path parameter for receipt-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The identifier returned by the process endpoint
    receipt_id: T,
}

/// The response to a successful submission: the content-derived identifier.
#[derive(serde::Serialize, schemars::JsonSchema)]
#[schemars(inline)]
struct ProcessResponse<T> {
    id: T,
}

/// The points awarded to a previously submitted receipt.
#[derive(serde::Serialize, schemars::JsonSchema)]
#[schemars(inline)]
struct PointsResponse {
    points: u64,
}

/// Submit a receipt for scoring.
///
/// The body is read as raw text and hashed as-is to form the identifier,
/// then parsed into a validated receipt and scored. Resubmitting the same
/// bytes yields the same identifier and the same points.
///
/// # Returns
///
/// - `200 OK`: Receipt accepted, returns its identifier
/// - `400 Bad Request`: The payload is not a valid receipt
/// - `503 Service Unavailable`: The record could not be persisted
async fn process_receipt<T: ApiApplication>(
    State(app): State<T>,
    body: String,
) -> Result<Json<ProcessResponse<<T::Repository as Repository>::ReceiptId>>, StatusCode> {
    let receipt: Receipt = serde_json::from_str(&body).map_err(|err| {
        event!(Level::WARN, err = err.to_string(), "invalid receipt payload");
        StatusCode::BAD_REQUEST
    })?;

    let points = scoring::calculate_points(&receipt, &app.scoring());
    let receipt_id = app.generate_receipt_id(&body);
    let as_of = app.now();

    let record = app
        .database()
        .create_receipt(receipt_id, points, receipt, as_of)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(ProcessResponse { id: record.id }))
}

/// Retrieve the points awarded to a receipt.
///
/// # Returns
///
/// - `200 OK`: The awarded points
/// - `404 Not Found`: No receipt with that identifier
/// - `503 Service Unavailable`: Database query failed
async fn get_receipt_points<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { receipt_id }): Path<Id<<T::Repository as Repository>::ReceiptId>>,
) -> Result<Json<PointsResponse>, StatusCode> {
    let points = app
        .database()
        .get_points(receipt_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::SERVICE_UNAVAILABLE
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(PointsResponse { points }))
}

/// Retrieve the full stored record for a receipt.
///
/// This is the audit read: the receipt comes back exactly as submitted,
/// alongside the points computed at submission time.
///
/// # Returns
///
/// - `200 OK`: The stored record
/// - `404 Not Found`: No receipt with that identifier
/// - `503 Service Unavailable`: Database query failed
async fn get_receipt<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { receipt_id }): Path<Id<<T::Repository as Repository>::ReceiptId>>,
) -> Result<Json<ScoreRecord<<T::Repository as Repository>::ReceiptId>>, StatusCode> {
    let record = app
        .database()
        .get_receipt(receipt_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::SERVICE_UNAVAILABLE
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(record))
}
