use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::calendar_policy::CalendarPolicy;
use crate::domain::models::court::Court;
use crate::domain::services::timeslot;

/// Weekend promotion only kicks in for starts inside this hour range.
const PROMOTION_HOURS: std::ops::Range<u32> = 8..24;
/// Legacy flat-rate courts treat these start hours as peak on weekdays.
const LEGACY_PEAK_HOURS: std::ops::Range<u32> = 18..23;

/// The hourly rate resolved for a start time. A zero rate with no matching
/// band is the "not bookable at this time" sentinel, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub hourly_rate: f64,
    pub label: String,
    pub is_peak: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceQuote {
    pub hourly_rate: f64,
    pub base_price: f64,
    pub total_price: f64,
    pub duration_minutes: u32,
    pub is_peak_hour: bool,
    pub slot_label: String,
}

/// Resolves the hourly rate for a start time on a court.
///
/// Precedence is an explicit ordered rule list:
/// 1. weekend-rate day with a start hour in [8, 24) forces the peak-labelled
///    band when the court declares one;
/// 2. otherwise the first declared band containing the start time wins;
/// 3. no band matched means rate 0 (unavailable sentinel).
///
/// Courts without bands fall back to the legacy flat peak/off-peak pair,
/// where weekend-rate days (holidays included) and evening starts are peak.
pub fn rate_for(
    court: &Court,
    start_min: u32,
    date: NaiveDate,
    policy: &CalendarPolicy,
) -> RateQuote {
    let hour = start_min / 60;
    let bands = court.time_slots();

    if bands.is_empty() {
        let is_peak = policy.is_weekend_rate(date, hour) || LEGACY_PEAK_HOURS.contains(&hour);
        return RateQuote {
            hourly_rate: if is_peak { court.peak_rate } else { court.off_peak_rate },
            label: if is_peak { "peak" } else { "off-peak" }.to_string(),
            is_peak,
        };
    }

    if policy.is_weekend_rate(date, hour)
        && PROMOTION_HOURS.contains(&hour)
        && let Some(peak_band) = bands.iter().find(|b| b.is_peak_label())
    {
        return RateQuote {
            hourly_rate: peak_band.price,
            label: peak_band.label.clone(),
            is_peak: true,
        };
    }

    for band in &bands {
        let (Ok(band_start), Ok(band_end)) =
            (timeslot::parse_hhmm(&band.start), timeslot::parse_hhmm(&band.end))
        else {
            continue;
        };
        if band_start <= start_min && start_min < band_end {
            return RateQuote {
                hourly_rate: band.price,
                label: band.label.clone(),
                is_peak: band.is_peak_label(),
            };
        }
    }

    RateQuote {
        hourly_rate: 0.0,
        label: String::new(),
        is_peak: false,
    }
}

/// Full price for a booking window. Total is the base reduced by the court's
/// member discount percentage when the caller is a member.
pub fn quote(
    court: &Court,
    policy: &CalendarPolicy,
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
    is_member: bool,
) -> PriceQuote {
    let rate = rate_for(court, start_min, date, policy);
    let duration = timeslot::duration_minutes(start_min, end_min);
    let base = rate.hourly_rate * duration as f64 / 60.0;
    let discount = if is_member { court.member_discount_pct } else { 0.0 };

    PriceQuote {
        hourly_rate: rate.hourly_rate,
        base_price: base,
        total_price: base * (1.0 - discount / 100.0),
        duration_minutes: duration,
        is_peak_hour: rate.is_peak,
        slot_label: rate.label,
    }
}
