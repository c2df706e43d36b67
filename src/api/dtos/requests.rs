use crate::domain::models::calendar_policy::CalendarPolicy;
use crate::domain::models::court::{MaintenanceWindow, OperatingHours, TimeSlotBand};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateCourtRequest {
    pub name: String,
    pub number: i32,
    pub court_type: String,
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub time_slots: Option<Vec<TimeSlotBand>>,
    pub peak_rate: Option<f64>,
    pub off_peak_rate: Option<f64>,
    pub operating_hours: Option<OperatingHours>,
    pub member_discount_pct: Option<f64>,
    pub maintenance: Option<MaintenanceWindow>,
}

#[derive(Deserialize)]
pub struct UpdateCourtRequest {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub court_type: Option<String>,
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub time_slots: Option<Vec<TimeSlotBand>>,
    pub peak_rate: Option<f64>,
    pub off_peak_rate: Option<f64>,
    pub operating_hours: Option<OperatingHours>,
    pub member_discount_pct: Option<f64>,
    pub is_active: Option<bool>,
    /// `Some(None)` clears an existing maintenance window.
    #[serde(default, deserialize_with = "double_option")]
    pub maintenance: Option<Option<MaintenanceWindow>>,
}

#[derive(Deserialize)]
pub struct CheckSlotRequest {
    pub court_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_member: Option<bool>,
}

#[derive(Deserialize)]
pub struct SlotTimes {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Deserialize)]
pub struct BatchCheckRequest {
    pub court_id: String,
    pub date: String,
    pub slots: Vec<SlotTimes>,
    pub is_member: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub court_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub players: Option<Vec<String>>,
    pub total_players: Option<i32>,
    pub notes: Option<String>,
    pub is_member: Option<bool>,
    /// Admin override: skip the pending/payment stage.
    pub confirmed: Option<bool>,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    /// Admin override of the minimum-notice rule.
    pub force: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CustomPointsRequest {
    pub total_price: f64,
}

#[derive(Deserialize)]
pub struct FullVenueBookingRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub players: Option<Vec<String>>,
    pub total_players: Option<i32>,
    pub notes: Option<String>,
    pub points_deduction: Option<f64>,
    pub bypass_restrictions: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdatePolicyRequest {
    pub weekend_days: Option<Vec<u8>>,
    pub include_friday_evening: Option<bool>,
    pub friday_evening_hour: Option<u8>,
}

impl UpdatePolicyRequest {
    pub fn apply(self, mut policy: CalendarPolicy) -> CalendarPolicy {
        if let Some(days) = self.weekend_days {
            policy.weekend_days = days;
        }
        if let Some(flag) = self.include_friday_evening {
            policy.include_friday_evening = flag;
        }
        if let Some(hour) = self.friday_evening_hour {
            policy.friday_evening_hour = hour;
        }
        policy
    }
}

#[derive(Deserialize)]
pub struct AddHolidayRequest {
    pub date: String,
}

// Distinguishes an absent `maintenance` key from an explicit null.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
