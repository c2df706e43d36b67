use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count_overlap(
        tx: &mut Transaction<'_, Sqlite>,
        booking: &Booking,
    ) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM bookings
             WHERE court_id = ? AND status IN ('pending', 'confirmed')
               AND start_at < ? AND end_at > ?",
        )
        .bind(&booking.court_id)
        .bind(booking.end_at)
        .bind(booking.start_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn court_name(
        tx: &mut Transaction<'_, Sqlite>,
        court_id: &str,
    ) -> Result<String, AppError> {
        let row = sqlx::query("SELECT name FROM courts WHERE id = ?")
            .bind(court_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::Database)?;
        Ok(row
            .map(|r| r.get::<String, _>("name"))
            .unwrap_or_else(|| court_id.to_string()))
    }

    async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        booking: &Booking,
    ) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, court_id, date, start_time, end_time, end_date,
                start_at, end_at, duration_min, status, base_price, member_discount_pct,
                total_price, is_full_venue, siblings_json, is_custom_points, players_json,
                total_players, notes, management_token, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.court_id)
        .bind(booking.date)
        .bind(&booking.start_time)
        .bind(&booking.end_time)
        .bind(booking.end_date)
        .bind(booking.start_at)
        .bind(booking.end_at)
        .bind(booking.duration_min)
        .bind(&booking.status)
        .bind(booking.base_price)
        .bind(booking.member_discount_pct)
        .bind(booking.total_price)
        .bind(booking.is_full_venue)
        .bind(&booking.siblings_json)
        .bind(booking.is_custom_points)
        .bind(&booking.players_json)
        .bind(booking.total_players)
        .bind(&booking.notes)
        .bind(&booking.management_token)
        .bind(booking.created_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_if_free(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        if Self::count_overlap(&mut tx, booking).await? > 0 {
            return Err(AppError::Conflict("time slot already booked".to_string()));
        }
        let created = Self::insert(&mut tx, booking).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn create_venue_batch(&self, bookings: &[Booking]) -> Result<Vec<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut created = Vec::with_capacity(bookings.len());
        for booking in bookings {
            // Dropping the transaction on error rolls back every insert so far.
            if Self::count_overlap(&mut tx, booking).await? > 0 {
                let name = Self::court_name(&mut tx, &booking.court_id).await?;
                return Err(AppError::Conflict(format!("Courts unavailable: {name}")));
            }
            created.push(Self::insert(&mut tx, booking).await?);
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE management_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_by_court_dates(
        &self,
        court_id: &str,
        dates: &[NaiveDate],
    ) -> Result<Vec<Booking>, AppError> {
        let mut query = String::from(
            "SELECT * FROM bookings WHERE court_id = ? AND status IN ('pending', 'confirmed') AND date IN (",
        );
        query.push_str(&vec!["?"; dates.len().max(1)].join(", "));
        query.push(')');

        let mut q = sqlx::query_as::<_, Booking>(&query).bind(court_id);
        for date in dates {
            q = q.bind(date);
        }
        q.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE date = ? ORDER BY start_at ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    async fn update_status_group(&self, ids: &[String], status: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for id in ids {
            // Only active bookings transition; completed/no_show siblings keep
            // their terminal status.
            sqlx::query(
                "UPDATE bookings SET status = ? WHERE id = ? AND status IN ('pending', 'confirmed')",
            )
            .bind(status)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn set_custom_total(&self, id: &str, total: f64) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET total_price = ?, is_custom_points = 1 WHERE id = ? RETURNING *",
        )
        .bind(total)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }
}
