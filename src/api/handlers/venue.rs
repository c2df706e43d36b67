use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::FullVenueBookingRequest;
use crate::api::dtos::responses::FullVenueResponse;
use crate::api::handlers::availability::{parse_date, parse_slot};
use crate::domain::services::timeslot;
use crate::domain::services::venue::{book_entire_venue, FullVenueRequest};
use crate::error::AppError;
use crate::state::AppState;

pub async fn book_venue(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FullVenueBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let (start_min, end_min) = parse_slot(&payload.start_time, &payload.end_time)?;

    if payload.points_deduction.is_some_and(|p| p < 0.0) {
        return Err(AppError::Validation("Points deduction cannot be negative".into()));
    }

    let (window, _) = timeslot::resolve_window(date, start_min, end_min);
    if window.start_at < Utc::now().naive_utc() {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }

    info!(
        "Full-venue booking requested for {} {}-{}",
        payload.date, payload.start_time, payload.end_time
    );

    let policy = state.policy_store.get().await?;
    let outcome = book_entire_venue(
        state.court_repo.as_ref(),
        state.booking_repo.as_ref(),
        &state.court_locks,
        &policy,
        FullVenueRequest {
            date,
            start_min,
            end_min,
            players: payload.players.unwrap_or_default(),
            total_players: payload.total_players.unwrap_or(0),
            notes: payload.notes,
            points_deduction: payload.points_deduction,
            bypass_restrictions: payload.bypass_restrictions.unwrap_or(false),
        },
    )
    .await?;

    let message = format!("Booked {} courts for the full venue", outcome.bookings.len());
    Ok(Json(FullVenueResponse {
        bookings: outcome.bookings,
        total_price: outcome.total_price,
        message,
    }))
}
