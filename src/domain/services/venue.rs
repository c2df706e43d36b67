use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use crate::domain::models::booking::{status, Booking, NewBookingParams};
use crate::domain::models::calendar_policy::CalendarPolicy;
use crate::domain::ports::{BookingRepository, CourtRepository};
use crate::domain::services::availability;
use crate::domain::services::locks::CourtLocks;
use crate::domain::services::pricing;
use crate::error::AppError;

pub struct FullVenueRequest {
    pub date: NaiveDate,
    pub start_min: u32,
    pub end_min: u32,
    pub players: Vec<String>,
    pub total_players: i32,
    pub notes: Option<String>,
    pub points_deduction: Option<f64>,
    pub bypass_restrictions: bool,
}

pub struct FullVenueOutcome {
    pub bookings: Vec<Booking>,
    pub total_price: f64,
}

/// Books every bookable court for the same window, all-or-nothing.
///
/// Per-court locks are taken in sorted id order before any read, and the
/// batch insert re-checks each window inside one transaction, so a
/// concurrent single-court booking either lands entirely before or entirely
/// after the venue booking.
pub async fn book_entire_venue(
    court_repo: &dyn CourtRepository,
    booking_repo: &dyn BookingRepository,
    locks: &CourtLocks,
    policy: &CalendarPolicy,
    req: FullVenueRequest,
) -> Result<FullVenueOutcome, AppError> {
    let courts: Vec<_> = court_repo
        .list()
        .await?
        .into_iter()
        .filter(|c| c.is_active && !c.is_full_venue_placeholder() && !c.under_maintenance(req.date))
        .collect();

    if courts.is_empty() {
        return Err(AppError::Validation("No bookable courts available".to_string()));
    }

    let court_ids: Vec<String> = courts.iter().map(|c| c.id.clone()).collect();
    let _guards = locks.lock_all(&court_ids).await;

    let candidate_dates = surrounding_dates(req.date);

    let mut conflicted = Vec::new();
    for court in &courts {
        if !req.bypass_restrictions {
            if !availability::within_operating_hours(court, req.date, req.start_min, req.end_min) {
                conflicted.push(court.name.clone());
                continue;
            }
            // Rate 0 is the "not bookable at this time" sentinel, same as the
            // single-slot path.
            let rate = pricing::rate_for(court, req.start_min, req.date, policy);
            if rate.hourly_rate == 0.0 {
                conflicted.push(court.name.clone());
                continue;
            }
        }
        let existing = booking_repo
            .list_active_by_court_dates(&court.id, &candidate_dates)
            .await?;
        if availability::has_conflict(&existing, req.date, req.start_min, req.end_min, None) {
            conflicted.push(court.name.clone());
        }
    }

    if !conflicted.is_empty() {
        warn!("Full-venue booking rejected, courts unavailable: {:?}", conflicted);
        return Err(AppError::Conflict(format!(
            "Courts unavailable: {}",
            conflicted.join(", ")
        )));
    }

    let booking_status = if req.bypass_restrictions {
        status::CONFIRMED
    } else {
        status::PENDING
    };

    let mut bookings: Vec<Booking> = Vec::with_capacity(courts.len());
    let mut computed_total = 0.0;
    for court in &courts {
        let quote = pricing::quote(court, policy, req.date, req.start_min, req.end_min, false);
        computed_total += quote.total_price;
        bookings.push(Booking::new(NewBookingParams {
            court_id: court.id.clone(),
            date: req.date,
            start_min: req.start_min,
            end_min: req.end_min,
            status: booking_status.to_string(),
            base_price: quote.base_price,
            member_discount_pct: 0.0,
            total_price: quote.total_price,
            players: req.players.clone(),
            total_players: req.total_players,
            notes: req.notes.clone(),
        }));
    }

    let all_ids: Vec<String> = bookings.iter().map(|b| b.id.clone()).collect();
    for booking in &mut bookings {
        let siblings: Vec<String> = all_ids
            .iter()
            .filter(|id| **id != booking.id)
            .cloned()
            .collect();
        booking.set_siblings(&siblings);
        if req.points_deduction.is_some() {
            booking.is_custom_points = true;
        }
    }

    let created = booking_repo.create_venue_batch(&bookings).await?;

    // An explicit points override replaces the computed total outright.
    let total_price = req.points_deduction.unwrap_or(computed_total);

    info!(
        "Full-venue booking created: {} courts on {} {}-{}",
        created.len(),
        req.date,
        bookings.first().map(|b| b.start_time.as_str()).unwrap_or(""),
        bookings.first().map(|b| b.end_time.as_str()).unwrap_or("")
    );

    Ok(FullVenueOutcome {
        bookings: created,
        total_price,
    })
}

/// The calendar days on which a booking overlapping `date` could be stored:
/// the day itself, the day before (overnight spill-in) and the day after
/// (overnight spill-out).
pub fn surrounding_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = vec![date];
    if let Some(prev) = date.checked_sub_days(Days::new(1)) {
        dates.push(prev);
    }
    if let Some(next) = date.checked_add_days(Days::new(1)) {
        dates.push(next);
    }
    dates
}
