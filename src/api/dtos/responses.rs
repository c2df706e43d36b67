use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::services::availability::SlotAssessment;

#[derive(Serialize)]
pub struct BatchSlotResult {
    pub start_time: String,
    pub end_time: String,
    #[serde(flatten)]
    pub assessment: SlotAssessment,
}

#[derive(Serialize)]
pub struct BatchCheckResponse {
    pub court_id: String,
    pub date: String,
    pub results: Vec<BatchSlotResult>,
}

#[derive(Serialize)]
pub struct FullVenueResponse {
    pub bookings: Vec<Booking>,
    pub total_price: f64,
    pub message: String,
}
