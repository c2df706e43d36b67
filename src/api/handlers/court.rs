use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateCourtRequest, UpdateCourtRequest};
use crate::domain::models::court::{
    Court, NewCourtParams, OperatingHours, TimeSlotBand, COURT_TYPES,
};
use crate::domain::services::timeslot;
use crate::error::AppError;
use crate::state::AppState;

fn validate_court_type(court_type: &str) -> Result<(), AppError> {
    if !COURT_TYPES.contains(&court_type) {
        return Err(AppError::Validation(format!(
            "Invalid court_type: {court_type}"
        )));
    }
    Ok(())
}

fn validate_bands(bands: &[TimeSlotBand]) -> Result<(), AppError> {
    for band in bands {
        let start = timeslot::parse_hhmm(&band.start)?;
        let end = timeslot::parse_hhmm(&band.end)?;
        if end <= start {
            return Err(AppError::Validation(format!(
                "Time-slot band must end after it starts: {} - {}",
                band.start, band.end
            )));
        }
        if band.price < 0.0 {
            return Err(AppError::Validation("Band price cannot be negative".into()));
        }
    }
    Ok(())
}

fn validate_hours(hours: &OperatingHours) -> Result<(), AppError> {
    let days = [
        &hours.monday,
        &hours.tuesday,
        &hours.wednesday,
        &hours.thursday,
        &hours.friday,
        &hours.saturday,
        &hours.sunday,
    ];
    for day in days {
        let start = timeslot::parse_hhmm(&day.start)?;
        let end = timeslot::parse_hhmm(&day.end)?;
        if day.open && end <= start {
            return Err(AppError::Validation(format!(
                "Operating hours must end after they start: {} - {}",
                day.start, day.end
            )));
        }
    }
    Ok(())
}

pub async fn create_court(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCourtRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_court_type(&payload.court_type)?;
    let time_slots = payload.time_slots.unwrap_or_default();
    validate_bands(&time_slots)?;
    let operating_hours = payload.operating_hours.unwrap_or_default();
    validate_hours(&operating_hours)?;

    let court = Court::new(NewCourtParams {
        name: payload.name,
        number: payload.number,
        court_type: payload.court_type,
        capacity: payload.capacity.unwrap_or(4),
        amenities: payload.amenities.unwrap_or_default(),
        time_slots,
        peak_rate: payload.peak_rate.unwrap_or(0.0),
        off_peak_rate: payload.off_peak_rate.unwrap_or(0.0),
        operating_hours,
        member_discount_pct: payload.member_discount_pct.unwrap_or(0.0),
        maintenance: payload.maintenance,
    });

    let created = state.court_repo.create(&court).await?;
    info!("Court created: {} (#{})", created.name, created.number);
    Ok(Json(created))
}

pub async fn list_courts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let courts = state.court_repo.list().await?;
    Ok(Json(courts))
}

pub async fn get_court(
    State(state): State<Arc<AppState>>,
    Path(court_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let court = state
        .court_repo
        .find_by_id(&court_id)
        .await?
        .ok_or(AppError::NotFound("Court not found".into()))?;
    Ok(Json(court))
}

pub async fn update_court(
    State(state): State<Arc<AppState>>,
    Path(court_id): Path<String>,
    Json(payload): Json<UpdateCourtRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut court = state
        .court_repo
        .find_by_id(&court_id)
        .await?
        .ok_or(AppError::NotFound("Court not found".into()))?;

    if let Some(name) = payload.name {
        court.name = name;
    }
    if let Some(number) = payload.number {
        court.number = number;
    }
    if let Some(court_type) = payload.court_type {
        validate_court_type(&court_type)?;
        court.court_type = court_type;
    }
    if let Some(capacity) = payload.capacity {
        court.capacity = capacity;
    }
    if let Some(amenities) = payload.amenities {
        court.amenities_json =
            serde_json::to_string(&amenities).map_err(|_| AppError::Internal)?;
    }
    if let Some(time_slots) = payload.time_slots {
        validate_bands(&time_slots)?;
        court.time_slots_json =
            serde_json::to_string(&time_slots).map_err(|_| AppError::Internal)?;
    }
    if let Some(rate) = payload.peak_rate {
        court.peak_rate = rate;
    }
    if let Some(rate) = payload.off_peak_rate {
        court.off_peak_rate = rate;
    }
    if let Some(hours) = payload.operating_hours {
        validate_hours(&hours)?;
        court.operating_hours_json =
            serde_json::to_string(&hours).map_err(|_| AppError::Internal)?;
    }
    if let Some(discount) = payload.member_discount_pct {
        court.member_discount_pct = discount;
    }
    if let Some(active) = payload.is_active {
        court.is_active = active;
    }
    if let Some(maintenance) = payload.maintenance {
        court.maintenance_json = maintenance
            .as_ref()
            .and_then(|m| serde_json::to_string(m).ok());
    }

    let updated = state.court_repo.update(&court).await?;
    info!("Court updated: {}", updated.id);
    Ok(Json(updated))
}
