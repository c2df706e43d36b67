use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::AppError;

/// "24:00" is accepted as an end-of-day sentinel and maps to this value.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Parses an "HH:MM" wall-clock string into minutes since midnight.
pub fn parse_hhmm(raw: &str) -> Result<u32, AppError> {
    let invalid = || AppError::Validation(format!("Invalid time format (expected HH:MM): {raw}"));

    let (hh, mm) = raw.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hh.parse().map_err(|_| invalid())?;
    let minutes: u32 = mm.parse().map_err(|_| invalid())?;

    if hours > 24 || minutes > 59 {
        return Err(invalid());
    }
    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// An end at or before the start means the interval spills into the next
/// calendar day.
pub fn is_overnight(start_min: u32, end_min: u32) -> bool {
    end_min <= start_min
}

pub fn duration_minutes(start_min: u32, end_min: u32) -> u32 {
    if is_overnight(start_min, end_min) {
        end_min + MINUTES_PER_DAY - start_min
    } else {
        end_min - start_min
    }
}

/// Absolute timestamp for a minute offset on a day; minute 1440 lands on the
/// following midnight.
pub fn datetime_at(date: NaiveDate, minutes: u32) -> NaiveDateTime {
    if minutes >= MINUTES_PER_DAY {
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        return next.and_time(NaiveTime::MIN);
    }
    date.and_time(
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN),
    )
}

/// The absolute half-open interval a booking occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

impl Window {
    pub fn overlaps(&self, other: &Window) -> bool {
        self.start_at < other.end_at && self.end_at > other.start_at
    }
}

/// Resolves a (date, start, end) triple into an absolute window plus the
/// explicit end date when the range crosses midnight.
pub fn resolve_window(date: NaiveDate, start_min: u32, end_min: u32) -> (Window, Option<NaiveDate>) {
    let end_day = if is_overnight(start_min, end_min) {
        date.checked_add_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    };
    let window = Window {
        start_at: datetime_at(date, start_min),
        end_at: datetime_at(end_day, end_min),
    };
    let end_date = (end_day != date).then_some(end_day);
    (window, end_date)
}
