use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, booking, calendar_policy, court, health, venue};
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Availability & pricing
        .route("/api/v1/availability/check", post(availability::check_single_slot))
        .route("/api/v1/availability/batch", post(availability::check_slot_batch))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))
        .route("/api/v1/bookings/{booking_id}/status", post(booking::update_booking_status))
        .route("/api/v1/bookings/{booking_id}/points", put(booking::set_custom_points))

        // Customer self-service by management token
        .route("/api/v1/bookings/manage/{token}", get(booking::get_booking_by_token))
        .route("/api/v1/bookings/manage/{token}/cancel", post(booking::cancel_booking_by_token))

        // Full venue
        .route("/api/v1/venue/book", post(venue::book_venue))

        // Courts admin
        .route("/api/v1/courts", post(court::create_court).get(court::list_courts))
        .route("/api/v1/courts/{court_id}", get(court::get_court).put(court::update_court))

        // Calendar policy admin
        .route("/api/v1/calendar-policy", get(calendar_policy::get_policy).put(calendar_policy::update_policy))
        .route("/api/v1/calendar-policy/holidays", post(calendar_policy::add_holiday))
        .route("/api/v1/calendar-policy/holidays/{date}", axum::routing::delete(calendar_policy::remove_holiday))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
