use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::DomainError;

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// `(open, close)` column identifiers for a weekday in `branch_availability`.
pub const fn hours_columns(day: Weekday) -> (&'static str, &'static str) {
    match day {
        Weekday::Mon => ("monday_open", "monday_close"),
        Weekday::Tue => ("tuesday_open", "tuesday_close"),
        Weekday::Wed => ("wednesday_open", "wednesday_close"),
        Weekday::Thu => ("thursday_open", "thursday_close"),
        Weekday::Fri => ("friday_open", "friday_close"),
        Weekday::Sat => ("saturday_open", "saturday_close"),
        Weekday::Sun => ("sunday_open", "sunday_close"),
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, DomainError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| DomainError::InvalidTimeOfDay(raw.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyHours {
    pub open: Option<NaiveTime>,
    pub close: Option<NaiveTime>,
}

impl DailyHours {
    /// Inclusive on both ends; a day missing either bound is closed.
    pub fn contains(&self, time: NaiveTime) -> bool {
        match (self.open, self.close) {
            (Some(open), Some(close)) => open <= time && time <= close,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BranchAvailability {
    pub branch_id: i32,
    pub monday_open: Option<NaiveTime>,
    pub monday_close: Option<NaiveTime>,
    pub tuesday_open: Option<NaiveTime>,
    pub tuesday_close: Option<NaiveTime>,
    pub wednesday_open: Option<NaiveTime>,
    pub wednesday_close: Option<NaiveTime>,
    pub thursday_open: Option<NaiveTime>,
    pub thursday_close: Option<NaiveTime>,
    pub friday_open: Option<NaiveTime>,
    pub friday_close: Option<NaiveTime>,
    pub saturday_open: Option<NaiveTime>,
    pub saturday_close: Option<NaiveTime>,
    pub sunday_open: Option<NaiveTime>,
    pub sunday_close: Option<NaiveTime>,
}

impl BranchAvailability {
    pub fn hours(&self, day: Weekday) -> DailyHours {
        let (open, close) = match day {
            Weekday::Mon => (self.monday_open, self.monday_close),
            Weekday::Tue => (self.tuesday_open, self.tuesday_close),
            Weekday::Wed => (self.wednesday_open, self.wednesday_close),
            Weekday::Thu => (self.thursday_open, self.thursday_close),
            Weekday::Fri => (self.friday_open, self.friday_close),
            Weekday::Sat => (self.saturday_open, self.saturday_close),
            Weekday::Sun => (self.sunday_open, self.sunday_close),
        };
        DailyHours { open, close }
    }

    /// True when any weekday's interval contains `time`.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        WEEK.iter().any(|day| self.hours(*day).contains(time))
    }
}
