use axum::{extract::State, response::IntoResponse, Json};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::dtos::requests::{BatchCheckRequest, CheckSlotRequest};
use crate::api::dtos::responses::{BatchCheckResponse, BatchSlotResult};
use crate::domain::services::availability::check_slot;
use crate::domain::services::timeslot::{self, MINUTES_PER_DAY};
use crate::domain::services::venue::surrounding_dates;
use crate::error::AppError;
use crate::state::AppState;

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format (expected YYYY-MM-DD): {raw}")))
}

pub fn parse_slot(start_raw: &str, end_raw: &str) -> Result<(u32, u32), AppError> {
    let start_min = timeslot::parse_hhmm(start_raw)?;
    let end_min = timeslot::parse_hhmm(end_raw)?;
    if start_min >= MINUTES_PER_DAY {
        return Err(AppError::Validation(
            "Start time must be before 24:00".to_string(),
        ));
    }
    Ok((start_min, end_min))
}

pub async fn check_single_slot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let (start_min, end_min) = parse_slot(&payload.start_time, &payload.end_time)?;

    let court = state
        .court_repo
        .find_by_id(&payload.court_id)
        .await?
        .ok_or(AppError::NotFound("Court not found".into()))?;

    let policy = state.policy_store.get().await?;
    let existing = state
        .booking_repo
        .list_active_by_court_dates(&court.id, &surrounding_dates(date))
        .await?;

    let assessment = check_slot(
        &court,
        &policy,
        &existing,
        date,
        start_min,
        end_min,
        payload.is_member.unwrap_or(false),
        None,
    );

    Ok(Json(assessment))
}

/// One court, one date, many candidate slots: the day-grid view in one call.
pub async fn check_slot_batch(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BatchCheckRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;

    let mut parsed = Vec::with_capacity(payload.slots.len());
    for slot in &payload.slots {
        parsed.push(parse_slot(&slot.start_time, &slot.end_time)?);
    }

    let court = state
        .court_repo
        .find_by_id(&payload.court_id)
        .await?
        .ok_or(AppError::NotFound("Court not found".into()))?;

    let policy = state.policy_store.get().await?;
    let existing = state
        .booking_repo
        .list_active_by_court_dates(&court.id, &surrounding_dates(date))
        .await?;

    let is_member = payload.is_member.unwrap_or(false);
    let results = payload
        .slots
        .iter()
        .zip(parsed)
        .map(|(slot, (start_min, end_min))| BatchSlotResult {
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            assessment: check_slot(
                &court, &policy, &existing, date, start_min, end_min, is_member, None,
            ),
        })
        .collect();

    Ok(Json(BatchCheckResponse {
        court_id: court.id,
        date: payload.date,
        results,
    }))
}
