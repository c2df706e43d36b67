use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate};

/// Process-wide pricing-calendar configuration. Weekday indices follow the
/// 0=Sunday .. 6=Saturday convention used throughout the court configs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarPolicy {
    pub weekend_days: Vec<u8>,
    pub include_friday_evening: bool,
    pub friday_evening_hour: u8,
    pub holidays: Vec<NaiveDate>,
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            weekend_days: vec![0, 6],
            include_friday_evening: false,
            friday_evening_hour: 18,
            holidays: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayClass {
    Holiday,
    Weekend,
    Weekday,
}

impl CalendarPolicy {
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether pricing resolved at `at_hour` on `date` uses the weekend rate.
    pub fn is_weekend_rate(&self, date: NaiveDate, at_hour: u32) -> bool {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        if self.weekend_days.contains(&weekday) {
            return true;
        }
        if self.is_holiday(date) {
            return true;
        }
        self.include_friday_evening && weekday == 5 && at_hour >= self.friday_evening_hour as u32
    }

    pub fn classify(&self, date: NaiveDate) -> DayClass {
        if self.is_holiday(date) {
            DayClass::Holiday
        } else if self
            .weekend_days
            .contains(&(date.weekday().num_days_from_sunday() as u8))
        {
            DayClass::Weekend
        } else {
            DayClass::Weekday
        }
    }
}
