use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{AddHolidayRequest, UpdatePolicyRequest};
use crate::api::handlers::availability::parse_date;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_policy(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let policy = state.policy_store.get().await?;
    Ok(Json(policy))
}

pub async fn update_policy(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdatePolicyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state.policy_store.get().await?;
    let updated = state.policy_store.update(payload.apply(current)).await?;
    info!(
        "Calendar policy updated: weekend_days={:?} friday_evening={}",
        updated.weekend_days, updated.include_friday_evening
    );
    Ok(Json(updated))
}

pub async fn add_holiday(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddHolidayRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let updated = state.policy_store.add_holiday(date).await?;
    info!("Holiday added: {date}");
    Ok(Json(updated))
}

pub async fn remove_holiday(
    State(state): State<Arc<AppState>>,
    Path(raw_date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&raw_date)?;
    let updated = state.policy_store.remove_holiday(date).await?;
    info!("Holiday removed: {date}");
    Ok(Json(updated))
}
