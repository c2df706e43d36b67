use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{
    CancelBookingRequest, CreateBookingRequest, CustomPointsRequest, UpdateBookingStatusRequest,
};
use crate::api::handlers::availability::{parse_date, parse_slot};
use crate::domain::models::booking::{status, Booking, NewBookingParams};
use crate::domain::services::availability::check_slot;
use crate::domain::services::timeslot;
use crate::domain::services::venue::surrounding_dates;
use crate::error::AppError;
use crate::state::AppState;

/// Minimum notice for a cancellation, relative to the booking start.
const CANCELLATION_NOTICE_HOURS: i64 = 2;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let (start_min, end_min) = parse_slot(&payload.start_time, &payload.end_time)?;

    let court = state
        .court_repo
        .find_by_id(&payload.court_id)
        .await?
        .ok_or(AppError::NotFound("Court not found".into()))?;

    let policy = state.policy_store.get().await?;
    let is_member = payload.is_member.unwrap_or(false);

    // Serialize writes per court; the repository re-checks inside its
    // transaction, so a racing request fails there rather than double-booking.
    let _guard = state.court_locks.lock(&court.id).await;

    let existing = state
        .booking_repo
        .list_active_by_court_dates(&court.id, &surrounding_dates(date))
        .await?;

    let assessment = check_slot(
        &court, &policy, &existing, date, start_min, end_min, is_member, None,
    );
    let Some(pricing) = assessment.pricing else {
        let reason = assessment
            .reason
            .unwrap_or_else(|| "slot unavailable".to_string());
        warn!("Booking rejected for court {}: {}", court.id, reason);
        return Err(AppError::Conflict(reason));
    };

    let (window, _) = timeslot::resolve_window(date, start_min, end_min);
    if window.start_at < Utc::now().naive_utc() {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }

    let booking_status = if payload.confirmed.unwrap_or(false) {
        status::CONFIRMED
    } else {
        status::PENDING
    };

    let booking = Booking::new(NewBookingParams {
        court_id: court.id.clone(),
        date,
        start_min,
        end_min,
        status: booking_status.to_string(),
        base_price: pricing.base_price,
        member_discount_pct: if is_member { court.member_discount_pct } else { 0.0 },
        total_price: pricing.total_price,
        players: payload.players.unwrap_or_default(),
        total_players: payload.total_players.unwrap_or(0),
        notes: payload.notes,
    });

    let created = state.booking_repo.create_if_free(&booking).await?;
    info!(
        "Booking created: {} court {} on {} {}-{}",
        created.id, created.court_id, created.date, created.start_time, created.end_time
    );
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub date: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = match query.date {
        Some(raw) => parse_date(&raw)?,
        None => Utc::now().date_naive(),
    };
    let bookings = state.booking_repo.list_by_date(date).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

fn enforce_notice(booking: &Booking) -> Result<(), AppError> {
    let cutoff = booking.start_at - Duration::hours(CANCELLATION_NOTICE_HOURS);
    if Utc::now().naive_utc() > cutoff {
        return Err(AppError::Validation(format!(
            "Cancellations require at least {CANCELLATION_NOTICE_HOURS} hours notice"
        )));
    }
    Ok(())
}

async fn cancel(
    state: &AppState,
    booking: Booking,
    force: bool,
) -> Result<Booking, AppError> {
    if booking.status == status::CANCELLED {
        return Ok(booking);
    }
    if !booking.is_active() {
        return Err(AppError::Validation(format!(
            "Cannot cancel a {} booking",
            booking.status
        )));
    }
    if !force {
        enforce_notice(&booking)?;
    }

    if booking.is_full_venue {
        let mut ids = booking.siblings();
        ids.push(booking.id.clone());
        state
            .booking_repo
            .update_status_group(&ids, status::CANCELLED)
            .await?;
        info!("Full-venue booking cancelled: {} ({} courts)", booking.id, ids.len());
        return state
            .booking_repo
            .find_by_id(&booking.id)
            .await?
            .ok_or(AppError::Internal);
    }

    let cancelled = state
        .booking_repo
        .update_status(&booking.id, status::CANCELLED)
        .await?;
    info!("Booking cancelled: {}", cancelled.id);
    Ok(cancelled)
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let cancelled = cancel(&state, booking, payload.force.unwrap_or(false)).await?;
    Ok(Json(cancelled))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    match payload.status.as_str() {
        status::CONFIRMED | status::COMPLETED | status::NO_SHOW => {}
        other => {
            return Err(AppError::Validation(format!(
                "Invalid status transition target: {other}"
            )))
        }
    }

    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if booking.status == status::CANCELLED {
        return Err(AppError::Conflict("Booking is cancelled".into()));
    }

    let updated = state
        .booking_repo
        .update_status(&booking_id, &payload.status)
        .await?;
    info!("Booking {} status -> {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn set_custom_points(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<CustomPointsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.total_price < 0.0 {
        return Err(AppError::Validation("Total price cannot be negative".into()));
    }
    let updated = state
        .booking_repo
        .set_custom_total(&booking_id, payload.total_price)
        .await?;
    info!("Booking {} total overridden to {}", updated.id, updated.total_price);
    Ok(Json(updated))
}

pub async fn get_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn cancel_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    // Customers never bypass the notice rule.
    let cancelled = cancel(&state, booking, false).await?;
    Ok(Json(cancelled))
}
