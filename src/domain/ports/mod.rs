use crate::domain::models::{booking::Booking, calendar_policy::CalendarPolicy, court::Court};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait CourtRepository: Send + Sync {
    async fn create(&self, court: &Court) -> Result<Court, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Court>, AppError>;
    async fn list(&self) -> Result<Vec<Court>, AppError>;
    async fn update(&self, court: &Court) -> Result<Court, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking only if no active booking overlaps its window.
    /// The overlap check and the insert run in one transaction.
    async fn create_if_free(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// All-or-nothing insert of a full-venue batch: every booking is
    /// re-checked for overlap and written inside a single transaction.
    async fn create_venue_batch(&self, bookings: &[Booking]) -> Result<Vec<Booking>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError>;
    /// Active (pending/confirmed) bookings for a court stored on any of the
    /// given calendar days.
    async fn list_active_by_court_dates(
        &self,
        court_id: &str,
        dates: &[NaiveDate],
    ) -> Result<Vec<Booking>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError>;
    /// Single status transition applied to a whole full-venue group. Only
    /// active (pending/confirmed) members transition; siblings already in a
    /// terminal status are left untouched.
    async fn update_status_group(&self, ids: &[String], status: &str) -> Result<(), AppError>;
    async fn set_custom_total(&self, id: &str, total: f64) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait CalendarPolicyRepository: Send + Sync {
    async fn load(&self) -> Result<Option<CalendarPolicy>, AppError>;
    async fn save(&self, policy: &CalendarPolicy) -> Result<(), AppError>;
}
