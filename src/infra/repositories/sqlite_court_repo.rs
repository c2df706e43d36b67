use crate::domain::{models::court::Court, ports::CourtRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCourtRepo {
    pool: SqlitePool,
}

impl SqliteCourtRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourtRepository for SqliteCourtRepo {
    async fn create(&self, court: &Court) -> Result<Court, AppError> {
        sqlx::query_as::<_, Court>(
            "INSERT INTO courts (id, name, number, court_type, capacity, amenities_json,
                time_slots_json, peak_rate, off_peak_rate, operating_hours_json,
                member_discount_pct, is_active, maintenance_json, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&court.id)
        .bind(&court.name)
        .bind(court.number)
        .bind(&court.court_type)
        .bind(court.capacity)
        .bind(&court.amenities_json)
        .bind(&court.time_slots_json)
        .bind(court.peak_rate)
        .bind(court.off_peak_rate)
        .bind(&court.operating_hours_json)
        .bind(court.member_discount_pct)
        .bind(court.is_active)
        .bind(&court.maintenance_json)
        .bind(court.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Court>, AppError> {
        sqlx::query_as::<_, Court>("SELECT * FROM courts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Court>, AppError> {
        sqlx::query_as::<_, Court>("SELECT * FROM courts ORDER BY number ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, court: &Court) -> Result<Court, AppError> {
        sqlx::query_as::<_, Court>(
            "UPDATE courts SET name = ?, number = ?, court_type = ?, capacity = ?,
                amenities_json = ?, time_slots_json = ?, peak_rate = ?, off_peak_rate = ?,
                operating_hours_json = ?, member_discount_pct = ?, is_active = ?,
                maintenance_json = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&court.name)
        .bind(court.number)
        .bind(&court.court_type)
        .bind(court.capacity)
        .bind(&court.amenities_json)
        .bind(&court.time_slots_json)
        .bind(court.peak_rate)
        .bind(court.off_peak_rate)
        .bind(&court.operating_hours_json)
        .bind(court.member_discount_pct)
        .bind(court.is_active)
        .bind(&court.maintenance_json)
        .bind(&court.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Court not found".into()))
    }
}
