use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::models::calendar_policy::CalendarPolicy;
use crate::domain::ports::CalendarPolicyRepository;
use crate::error::AppError;

/// Weekend-day indices and the Friday-evening hour are validated at admin
/// write time; reads never fail and fall back to the built-in defaults.
pub fn validate(policy: &CalendarPolicy) -> Result<(), AppError> {
    if let Some(day) = policy.weekend_days.iter().find(|d| **d > 6) {
        return Err(AppError::Validation(format!(
            "Weekend day index out of range (0=Sunday..6=Saturday): {day}"
        )));
    }
    if policy.friday_evening_hour > 23 {
        return Err(AppError::Validation(
            "Friday evening hour must be 0..=23".to_string(),
        ));
    }
    let mut seen = policy.holidays.clone();
    seen.sort();
    seen.dedup();
    if seen.len() != policy.holidays.len() {
        return Err(AppError::Validation("Holiday dates must be unique".to_string()));
    }
    Ok(())
}

/// Read-through cache over the single persisted calendar-policy row.
/// Every pricing decision reads it; admin writes invalidate it in place.
pub struct CalendarPolicyStore {
    repo: Arc<dyn CalendarPolicyRepository>,
    cache: RwLock<Option<CalendarPolicy>>,
}

impl CalendarPolicyStore {
    pub fn new(repo: Arc<dyn CalendarPolicyRepository>) -> Self {
        Self {
            repo,
            cache: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Result<CalendarPolicy, AppError> {
        if let Some(policy) = self.cache.read().await.as_ref() {
            return Ok(policy.clone());
        }
        let loaded = self.repo.load().await?.unwrap_or_default();
        *self.cache.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    pub async fn update(&self, policy: CalendarPolicy) -> Result<CalendarPolicy, AppError> {
        validate(&policy)?;
        self.repo.save(&policy).await?;
        *self.cache.write().await = Some(policy.clone());
        Ok(policy)
    }

    pub async fn add_holiday(&self, date: NaiveDate) -> Result<CalendarPolicy, AppError> {
        let mut policy = self.get().await?;
        if policy.holidays.contains(&date) {
            return Err(AppError::Conflict(format!("Holiday already listed: {date}")));
        }
        policy.holidays.push(date);
        policy.holidays.sort();
        self.update(policy).await
    }

    pub async fn remove_holiday(&self, date: NaiveDate) -> Result<CalendarPolicy, AppError> {
        let mut policy = self.get().await?;
        if !policy.holidays.contains(&date) {
            return Err(AppError::NotFound(format!("Holiday not listed: {date}")));
        }
        policy.holidays.retain(|d| *d != date);
        self.update(policy).await
    }
}
