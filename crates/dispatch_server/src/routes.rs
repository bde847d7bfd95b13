//! HTTP route handlers. Each handler is a thin adapter onto [`Dispatcher`].
//!
//! [`Dispatcher`]: dispatch_core::Dispatcher

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use dispatch_core::telemetry::DispatchTelemetry;
use dispatch_core::{Driver, DriverId, Point, RideRequest, RideRequestId, Rider, RiderId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/{id}", get(get_driver).delete(delete_driver))
        .route("/drivers/{id}/position", put(update_driver_position))
        .route("/riders", get(list_riders).post(create_rider))
        .route("/riders/{id}", get(get_rider).delete(delete_rider))
        .route("/ride_requests", get(list_ride_requests).post(create_ride_request))
        .route(
            "/ride_requests/{id}",
            get(get_ride_request).delete(delete_ride_request),
        )
        .route("/ride_requests/{id}/start", post(start_ride_request))
        .route("/ride_requests/{id}/complete", post(complete_ride_request))
        .route("/ride_requests/{id}/cancel", post(cancel_ride_request))
        .route("/tick", get(current_time).post(tick))
        .route("/stats", get(stats))
}

#[derive(Debug, Deserialize)]
pub struct DriverCreate {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct PositionUpdate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct RiderCreate {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RideRequestCreate {
    pub rider_id: String,
    pub pickup_x: f64,
    pub pickup_y: f64,
    pub dropoff_x: f64,
    pub dropoff_y: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TimeResponse {
    pub time: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub time: u64,
    pub algorithm: &'static str,
    #[serde(flatten)]
    pub telemetry: DispatchTelemetry,
    pub assignment_rate: Option<f64>,
}

// ── Drivers ─────────────────────────────────────────────────────────

/// GET /drivers
async fn list_drivers(State(state): State<AppState>) -> Json<Vec<Driver>> {
    Json(state.dispatcher.drivers())
}

/// POST /drivers
async fn create_driver(
    State(state): State<AppState>,
    Json(body): Json<DriverCreate>,
) -> Json<Driver> {
    Json(
        state
            .dispatcher
            .register_driver(body.name, Point::new(body.x, body.y)),
    )
}

/// GET /drivers/{id}
async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Driver>> {
    Ok(Json(state.dispatcher.driver(&DriverId::from(id))?))
}

/// DELETE /drivers/{id} - 409 while the driver is busy.
async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.dispatcher.deregister_driver(&DriverId::from(id))?;
    Ok(Json(MessageResponse {
        message: "Driver deleted successfully",
    }))
}

/// PUT /drivers/{id}/position
async fn update_driver_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PositionUpdate>,
) -> ApiResult<Json<Driver>> {
    let driver = state
        .dispatcher
        .update_driver_position(&DriverId::from(id), Point::new(body.x, body.y))?;
    Ok(Json(driver))
}

// ── Riders ──────────────────────────────────────────────────────────

/// GET /riders
async fn list_riders(State(state): State<AppState>) -> Json<Vec<Rider>> {
    Json(state.dispatcher.riders())
}

/// POST /riders
async fn create_rider(
    State(state): State<AppState>,
    Json(body): Json<RiderCreate>,
) -> Json<Rider> {
    Json(state.dispatcher.register_rider(body.name))
}

/// GET /riders/{id}
async fn get_rider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Rider>> {
    Ok(Json(state.dispatcher.rider(&RiderId::from(id))?))
}

/// DELETE /riders/{id}
async fn delete_rider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.dispatcher.remove_rider(&RiderId::from(id))?;
    Ok(Json(MessageResponse {
        message: "Rider deleted successfully",
    }))
}

// ── Ride requests ───────────────────────────────────────────────────

/// GET /ride_requests
async fn list_ride_requests(State(state): State<AppState>) -> Json<Vec<RideRequest>> {
    Json(state.dispatcher.rides())
}

/// POST /ride_requests - assignment is attempted before responding.
async fn create_ride_request(
    State(state): State<AppState>,
    Json(body): Json<RideRequestCreate>,
) -> ApiResult<Json<RideRequest>> {
    let request = state.dispatcher.request_ride(
        &RiderId::from(body.rider_id),
        Point::new(body.pickup_x, body.pickup_y),
        Point::new(body.dropoff_x, body.dropoff_y),
    )?;
    Ok(Json(request))
}

/// GET /ride_requests/{id}
async fn get_ride_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RideRequest>> {
    Ok(Json(state.dispatcher.ride(&RideRequestId::from(id))?))
}

/// DELETE /ride_requests/{id}
async fn delete_ride_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.dispatcher.delete_ride(&RideRequestId::from(id))?;
    Ok(Json(MessageResponse {
        message: "Ride request deleted successfully",
    }))
}

/// POST /ride_requests/{id}/start
async fn start_ride_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RideRequest>> {
    Ok(Json(state.dispatcher.start_ride(&RideRequestId::from(id))?))
}

/// POST /ride_requests/{id}/complete
async fn complete_ride_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RideRequest>> {
    Ok(Json(state.dispatcher.complete_ride(&RideRequestId::from(id))?))
}

/// POST /ride_requests/{id}/cancel
async fn cancel_ride_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RideRequest>> {
    Ok(Json(state.dispatcher.cancel_ride(&RideRequestId::from(id))?))
}

// ── Clock & stats ───────────────────────────────────────────────────

/// POST /tick - advance the logical clock by one.
async fn tick(State(state): State<AppState>) -> Json<TimeResponse> {
    Json(TimeResponse {
        time: state.dispatcher.tick(),
    })
}

/// GET /tick - read the logical clock without advancing it.
async fn current_time(State(state): State<AppState>) -> Json<TimeResponse> {
    debug!("reading logical clock");
    Json(TimeResponse {
        time: state.dispatcher.now(),
    })
}

/// GET /stats
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let telemetry = state.dispatcher.telemetry();
    Json(StatsResponse {
        time: state.dispatcher.now(),
        algorithm: state.dispatcher.algorithm_name(),
        assignment_rate: telemetry.assignment_rate(),
        telemetry,
    })
}
