use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use sqlx::FromRow;

pub const COURT_TYPES: &[&str] = &["competition", "training", "solo", "dink", "full_venue"];

/// A named, priced sub-range of the 24-hour day. Lookup is first-match-wins
/// in declared order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeSlotBand {
    pub start: String,
    pub end: String,
    pub price: f64,
    pub label: String,
}

impl TimeSlotBand {
    /// The busy/peak band is the promotion target on weekend-rate days.
    /// Negated labels ("非繁忙時間", "off-peak") are never the peak band.
    pub fn is_peak_label(&self) -> bool {
        let lower = self.label.to_lowercase();
        if self.label.contains("非繁忙") || lower.starts_with("off") {
            return false;
        }
        self.label.contains("繁忙") || lower.contains("peak")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayHours {
    pub open: bool,
    pub start: String,
    pub end: String,
}

impl Default for DayHours {
    fn default() -> Self {
        Self {
            open: true,
            start: "00:00".to_string(),
            end: "24:00".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OperatingHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl OperatingHours {
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MaintenanceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Court {
    pub id: String,
    pub name: String,
    pub number: i32,
    pub court_type: String,
    pub capacity: i32,
    pub amenities_json: String,
    pub time_slots_json: String,
    pub peak_rate: f64,
    pub off_peak_rate: f64,
    pub operating_hours_json: String,
    pub member_discount_pct: f64,
    pub is_active: bool,
    pub maintenance_json: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewCourtParams {
    pub name: String,
    pub number: i32,
    pub court_type: String,
    pub capacity: i32,
    pub amenities: Vec<String>,
    pub time_slots: Vec<TimeSlotBand>,
    pub peak_rate: f64,
    pub off_peak_rate: f64,
    pub operating_hours: OperatingHours,
    pub member_discount_pct: f64,
    pub maintenance: Option<MaintenanceWindow>,
}

impl Court {
    pub fn new(params: NewCourtParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            number: params.number,
            court_type: params.court_type,
            capacity: params.capacity,
            amenities_json: serde_json::to_string(&params.amenities).unwrap_or_else(|_| "[]".into()),
            time_slots_json: serde_json::to_string(&params.time_slots).unwrap_or_else(|_| "[]".into()),
            peak_rate: params.peak_rate,
            off_peak_rate: params.off_peak_rate,
            operating_hours_json: serde_json::to_string(&params.operating_hours)
                .unwrap_or_else(|_| "{}".into()),
            member_discount_pct: params.member_discount_pct,
            is_active: true,
            maintenance_json: params
                .maintenance
                .as_ref()
                .and_then(|m| serde_json::to_string(m).ok()),
            created_at: Utc::now(),
        }
    }

    pub fn time_slots(&self) -> Vec<TimeSlotBand> {
        serde_json::from_str(&self.time_slots_json).unwrap_or_default()
    }

    pub fn operating_hours(&self) -> OperatingHours {
        serde_json::from_str(&self.operating_hours_json).unwrap_or_default()
    }

    pub fn amenities(&self) -> Vec<String> {
        serde_json::from_str(&self.amenities_json).unwrap_or_default()
    }

    pub fn maintenance(&self) -> Option<MaintenanceWindow> {
        self.maintenance_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
    }

    pub fn under_maintenance(&self, date: NaiveDate) -> bool {
        self.maintenance()
            .is_some_and(|m| m.start <= date && date <= m.end)
    }

    /// Umbrella placeholder courts are never booked individually.
    pub fn is_full_venue_placeholder(&self) -> bool {
        self.court_type == "full_venue"
    }
}
