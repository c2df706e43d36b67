use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::models::calendar_policy::CalendarPolicy;
use crate::domain::models::court::Court;
use crate::domain::services::pricing::{self, PriceQuote};
use crate::domain::services::timeslot::{self, MINUTES_PER_DAY};

pub mod reason {
    pub const INACTIVE: &str = "court is not active";
    pub const MAINTENANCE: &str = "court under maintenance";
    pub const OUTSIDE_HOURS: &str = "outside operating hours";
    pub const NO_RATE: &str = "no rate configured for this time";
    pub const BOOKED: &str = "time slot already booked";
}

#[derive(Debug, Serialize)]
pub struct SlotAssessment {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PriceQuote>,
}

impl SlotAssessment {
    fn unavailable(reason: &str) -> Self {
        Self {
            available: false,
            reason: Some(reason.to_string()),
            pricing: None,
        }
    }
}

/// Returns the first active booking whose absolute interval overlaps the
/// requested window. Candidates are compared on their resolved half-open
/// `[start_at, end_at)` intervals, so overnight bookings stored on either
/// neighbouring day are handled uniformly.
pub fn find_conflict<'a>(
    existing: &'a [Booking],
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
    exclude_id: Option<&str>,
) -> Option<&'a Booking> {
    let (window, _) = timeslot::resolve_window(date, start_min, end_min);
    existing.iter().find(|booking| {
        booking.is_active()
            && exclude_id != Some(booking.id.as_str())
            && booking.window().overlaps(&window)
    })
}

pub fn has_conflict(
    existing: &[Booking],
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
    exclude_id: Option<&str>,
) -> bool {
    find_conflict(existing, date, start_min, end_min, exclude_id).is_some()
}

/// Whether the requested window fits the court's operating hours on `date`.
/// Overnight requests need the day to stay open until 24:00; the spill into
/// the next day is not re-checked against that day's hours.
pub fn within_operating_hours(court: &Court, date: NaiveDate, start_min: u32, end_min: u32) -> bool {
    let hours = court.operating_hours();
    let day = hours.for_weekday(date.weekday());
    if !day.open {
        return false;
    }
    let (Ok(open_start), Ok(open_end)) =
        (timeslot::parse_hhmm(&day.start), timeslot::parse_hhmm(&day.end))
    else {
        return false;
    };

    let same_day_end = if timeslot::is_overnight(start_min, end_min) {
        MINUTES_PER_DAY
    } else {
        end_min
    };
    start_min >= open_start && same_day_end <= open_end
}

/// Full decision for one requested slot: structural checks, operating hours,
/// rate resolution, then conflict detection. Unavailability is a structured
/// result with a human-readable reason, never an error.
#[allow(clippy::too_many_arguments)]
pub fn check_slot(
    court: &Court,
    policy: &CalendarPolicy,
    existing: &[Booking],
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
    is_member: bool,
    exclude_id: Option<&str>,
) -> SlotAssessment {
    if !court.is_active {
        return SlotAssessment::unavailable(reason::INACTIVE);
    }
    if court.under_maintenance(date) {
        return SlotAssessment::unavailable(reason::MAINTENANCE);
    }
    if !within_operating_hours(court, date, start_min, end_min) {
        return SlotAssessment::unavailable(reason::OUTSIDE_HOURS);
    }

    let quote = pricing::quote(court, policy, date, start_min, end_min, is_member);
    if quote.hourly_rate == 0.0 {
        return SlotAssessment::unavailable(reason::NO_RATE);
    }

    if has_conflict(existing, date, start_min, end_min, exclude_id) {
        return SlotAssessment::unavailable(reason::BOOKED);
    }

    SlotAssessment {
        available: true,
        reason: None,
        pricing: Some(quote),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{status, Booking, NewBookingParams};
    use crate::domain::models::court::{DayHours, NewCourtParams, OperatingHours, TimeSlotBand};

    fn court() -> Court {
        Court::new(NewCourtParams {
            name: "Court 1".to_string(),
            number: 1,
            court_type: "competition".to_string(),
            capacity: 4,
            amenities: vec![],
            time_slots: vec![TimeSlotBand {
                start: "00:00".into(),
                end: "24:00".into(),
                price: 100.0,
                label: "day".into(),
            }],
            peak_rate: 0.0,
            off_peak_rate: 0.0,
            operating_hours: OperatingHours::default(),
            member_discount_pct: 0.0,
            maintenance: None,
        })
    }

    fn booking(date: NaiveDate, start_min: u32, end_min: u32) -> Booking {
        Booking::new(NewBookingParams {
            court_id: "c1".to_string(),
            date,
            start_min,
            end_min,
            status: status::CONFIRMED.to_string(),
            base_price: 100.0,
            member_discount_pct: 0.0,
            total_price: 100.0,
            players: vec![],
            total_players: 2,
            notes: None,
        })
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overlapping_request_conflicts() {
        let d = date(2026, 3, 17);
        let existing = vec![booking(d, 600, 720)];

        assert!(has_conflict(&existing, d, 660, 780, None));
        // Adjacent half-open intervals do not touch.
        assert!(!has_conflict(&existing, d, 720, 780, None));
        assert!(!has_conflict(&existing, d, 540, 600, None));
    }

    #[test]
    fn cancelled_bookings_release_their_window() {
        let d = date(2026, 3, 17);
        let mut b = booking(d, 600, 720);
        b.status = status::CANCELLED.to_string();

        assert!(!has_conflict(&[b], d, 600, 720, None));
    }

    #[test]
    fn exclusion_skips_the_booking_under_edit() {
        let d = date(2026, 3, 17);
        let b = booking(d, 600, 720);
        let id = b.id.clone();

        assert!(!has_conflict(&[b], d, 600, 720, Some(&id)));
    }

    #[test]
    fn sentinel_end_frees_the_following_day() {
        let d = date(2026, 3, 17);
        let existing = vec![booking(d, 1320, 1440)]; // 22:00-24:00

        // 00:00-02:00 the next day does not overlap.
        assert!(!has_conflict(&existing, d.succ_opt().unwrap(), 0, 120, None));
        // 23:00-01:00 overnight the same day does.
        assert!(has_conflict(&existing, d, 1380, 60, None));
    }

    #[test]
    fn overnight_booking_blocks_next_morning() {
        let d = date(2026, 3, 17);
        let existing = vec![booking(d, 1380, 120)]; // 23:00-01:00

        assert!(has_conflict(&existing, d.succ_opt().unwrap(), 0, 60, None));
        assert!(!has_conflict(&existing, d.succ_opt().unwrap(), 120, 180, None));
    }

    #[test]
    fn closed_day_is_outside_operating_hours() {
        let mut c = court();
        let mut hours = OperatingHours::default();
        hours.tuesday = DayHours {
            open: false,
            start: "08:00".into(),
            end: "22:00".into(),
        };
        c.operating_hours_json = serde_json::to_string(&hours).unwrap();

        let tuesday = date(2026, 3, 17);
        let result = check_slot(&c, &CalendarPolicy::default(), &[], tuesday, 600, 660, false, None);
        assert!(!result.available);
        assert_eq!(result.reason.as_deref(), Some(reason::OUTSIDE_HOURS));
    }

    #[test]
    fn overnight_request_needs_midnight_closing() {
        let mut c = court();
        let mut hours = OperatingHours::default();
        hours.tuesday = DayHours {
            open: true,
            start: "08:00".into(),
            end: "22:00".into(),
        };
        c.operating_hours_json = serde_json::to_string(&hours).unwrap();

        assert!(!within_operating_hours(&c, date(2026, 3, 17), 1380, 60));
        assert!(within_operating_hours(&c, date(2026, 3, 18), 1380, 60));
    }

    #[test]
    fn maintenance_blocks_only_covered_dates() {
        let mut c = court();
        c.maintenance_json = Some(
            serde_json::json!({
                "start": "2026-03-16",
                "end": "2026-03-18",
                "reason": "resurfacing"
            })
            .to_string(),
        );

        let inside = check_slot(&c, &CalendarPolicy::default(), &[], date(2026, 3, 17), 600, 660, false, None);
        assert_eq!(inside.reason.as_deref(), Some(reason::MAINTENANCE));

        let after = check_slot(&c, &CalendarPolicy::default(), &[], date(2026, 3, 19), 600, 660, false, None);
        assert!(after.available);
    }

    #[test]
    fn available_slot_carries_pricing() {
        let c = court();
        let result = check_slot(&c, &CalendarPolicy::default(), &[], date(2026, 3, 17), 600, 660, false, None);
        assert!(result.available);
        let pricing = result.pricing.unwrap();
        assert_eq!(pricing.total_price, 100.0);
        assert_eq!(pricing.duration_minutes, 60);
    }
}
