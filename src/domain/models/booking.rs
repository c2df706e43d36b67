use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

use crate::domain::services::timeslot::{self, Window};

pub mod status {
    pub const PENDING: &str = "pending";
    pub const CONFIRMED: &str = "confirmed";
    pub const CANCELLED: &str = "cancelled";
    pub const COMPLETED: &str = "completed";
    pub const NO_SHOW: &str = "no_show";

    /// Only these still occupy their time window.
    pub const ACTIVE: &[&str] = &[PENDING, CONFIRMED];
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub court_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    /// Set only when the interval crosses midnight.
    pub end_date: Option<NaiveDate>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub duration_min: i32,
    pub status: String,
    pub base_price: f64,
    pub member_discount_pct: f64,
    pub total_price: f64,
    pub is_full_venue: bool,
    pub siblings_json: String,
    pub is_custom_points: bool,
    pub players_json: String,
    pub total_players: i32,
    pub notes: Option<String>,
    pub management_token: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub court_id: String,
    pub date: NaiveDate,
    pub start_min: u32,
    pub end_min: u32,
    pub status: String,
    pub base_price: f64,
    pub member_discount_pct: f64,
    pub total_price: f64,
    pub players: Vec<String>,
    pub total_players: i32,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let (window, end_date) =
            timeslot::resolve_window(params.date, params.start_min, params.end_min);

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            court_id: params.court_id,
            date: params.date,
            start_time: timeslot::format_minutes(params.start_min),
            end_time: timeslot::format_minutes(params.end_min),
            end_date,
            start_at: window.start_at,
            end_at: window.end_at,
            duration_min: timeslot::duration_minutes(params.start_min, params.end_min) as i32,
            status: params.status,
            base_price: params.base_price,
            member_discount_pct: params.member_discount_pct,
            total_price: params.total_price,
            is_full_venue: false,
            siblings_json: "[]".to_string(),
            is_custom_points: false,
            players_json: serde_json::to_string(&params.players).unwrap_or_else(|_| "[]".into()),
            total_players: params.total_players,
            notes: params.notes,
            management_token: token,
            created_at: Utc::now(),
        }
    }

    pub fn window(&self) -> Window {
        Window {
            start_at: self.start_at,
            end_at: self.end_at,
        }
    }

    pub fn is_active(&self) -> bool {
        status::ACTIVE.contains(&self.status.as_str())
    }

    pub fn siblings(&self) -> Vec<String> {
        serde_json::from_str(&self.siblings_json).unwrap_or_default()
    }

    pub fn set_siblings(&mut self, ids: &[String]) {
        self.is_full_venue = true;
        self.siblings_json = serde_json::to_string(ids).unwrap_or_else(|_| "[]".into());
    }
}
