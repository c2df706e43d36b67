use crate::domain::{models::calendar_policy::CalendarPolicy, ports::CalendarPolicyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

pub struct SqlitePolicyRepo {
    pool: SqlitePool,
}

impl SqlitePolicyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarPolicyRepository for SqlitePolicyRepo {
    async fn load(&self) -> Result<Option<CalendarPolicy>, AppError> {
        let row = sqlx::query("SELECT * FROM calendar_policy WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        // Malformed stored JSON falls back to defaults rather than failing reads.
        Ok(row.map(|r| {
            let defaults = CalendarPolicy::default();
            CalendarPolicy {
                weekend_days: serde_json::from_str(&r.get::<String, _>("weekend_days_json"))
                    .unwrap_or(defaults.weekend_days),
                include_friday_evening: r.get::<bool, _>("include_friday_evening"),
                friday_evening_hour: r.get::<i64, _>("friday_evening_hour") as u8,
                holidays: serde_json::from_str(&r.get::<String, _>("holidays_json"))
                    .unwrap_or(defaults.holidays),
            }
        }))
    }

    async fn save(&self, policy: &CalendarPolicy) -> Result<(), AppError> {
        let weekend_days = serde_json::to_string(&policy.weekend_days)
            .map_err(|_| AppError::Internal)?;
        let holidays = serde_json::to_string(&policy.holidays).map_err(|_| AppError::Internal)?;

        sqlx::query(
            "INSERT INTO calendar_policy (id, weekend_days_json, include_friday_evening,
                friday_evening_hour, holidays_json, updated_at)
             VALUES (1, ?, ?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                weekend_days_json = excluded.weekend_days_json,
                include_friday_evening = excluded.include_friday_evening,
                friday_evening_hour = excluded.friday_evening_hour,
                holidays_json = excluded.holidays_json,
                updated_at = excluded.updated_at",
        )
        .bind(weekend_days)
        .bind(policy.include_friday_evening)
        .bind(policy.friday_evening_hour as i64)
        .bind(holidays)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }
}
