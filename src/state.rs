use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{BookingRepository, CourtRepository};
use crate::domain::services::calendar::CalendarPolicyStore;
use crate::domain::services::locks::CourtLocks;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub court_repo: Arc<dyn CourtRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub policy_store: Arc<CalendarPolicyStore>,
    pub court_locks: Arc<CourtLocks>,
}
