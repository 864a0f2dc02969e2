//! Date-offset strategies. The netter only ever calls `DateOffset::offset`;
//! everything else here is one concrete strategy behind that seam.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Shifts a date by a signed number of days under some calendar policy.
pub trait DateOffset {
    /// `offset(date, -5)` means "5 days before `date`"; `offset(date, 3)`
    /// means "3 days after". Used for both the lead-time due-date offset
    /// and child explosion dates.
    fn offset(&self, date: NaiveDate, days: i64) -> NaiveDate;
}

/// Plain calendar-day arithmetic — the netter's default. No weekend or
/// holiday logic; `offset(date, -n)` is just `date - n days`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CalendarDays;

impl DateOffset for CalendarDays {
    fn offset(&self, date: NaiveDate, days: i64) -> NaiveDate {
        date + chrono::Duration::days(days)
    }
}

/// Business-day calendar, opt-in behind the same `DateOffset` seam for
/// callers who want weekends and holidays excluded from the day count.
/// Not the netter's default: the engine's own test fixtures count plain
/// calendar days, not working days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCalendar {
    /// Index 0 = Monday, ..., 6 = Sunday.
    pub working_days: [bool; 7],
    pub holidays: Vec<NaiveDate>,
    pub calendar_id: String,
}

impl WorkCalendar {
    pub fn new(calendar_id: String) -> Self {
        Self {
            working_days: [true, true, true, true, true, false, false],
            calendar_id,
            holidays: Vec::new(),
        }
    }

    pub fn new_24_7(calendar_id: String) -> Self {
        Self {
            working_days: [true; 7],
            calendar_id,
            holidays: Vec::new(),
        }
    }

    pub fn with_working_days(mut self, working_days: [bool; 7]) -> Self {
        self.working_days = working_days;
        self
    }

    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        if !self.holidays.contains(&date) {
            self.holidays.push(date);
            self.holidays.sort();
        }
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.holidays.contains(&date) {
            return false;
        }
        let weekday_index = date.weekday().num_days_from_monday() as usize;
        self.working_days[weekday_index]
    }

    pub fn add_working_days(&self, start_date: NaiveDate, days: u32) -> NaiveDate {
        let mut current = start_date;
        let mut remaining = days;
        while remaining > 0 {
            current = current.succ_opt().expect("date overflow");
            if self.is_working_day(current) {
                remaining -= 1;
            }
        }
        current
    }

    pub fn subtract_working_days(&self, start_date: NaiveDate, days: u32) -> NaiveDate {
        let mut current = start_date;
        let mut remaining = days;
        while remaining > 0 {
            current = current.pred_opt().expect("date overflow");
            if self.is_working_day(current) {
                remaining -= 1;
            }
        }
        current
    }
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new("DEFAULT".to_string())
    }
}

impl DateOffset for WorkCalendar {
    fn offset(&self, date: NaiveDate, days: i64) -> NaiveDate {
        if days >= 0 {
            self.add_working_days(date, days as u32)
        } else {
            self.subtract_working_days(date, (-days) as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_days_offsets_negative_by_plain_subtraction() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(CalendarDays.offset(start, -5), expected);
    }

    #[test]
    fn work_calendar_skips_weekends() {
        let calendar = WorkCalendar::new("TEST".to_string());
        let monday = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        let result = calendar.offset(monday, 5);
        assert_eq!(result, NaiveDate::from_ymd_opt(2025, 10, 13).unwrap());
    }

    #[test]
    fn work_calendar_honors_holidays() {
        let mut calendar = WorkCalendar::new("TEST".to_string());
        let holiday = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        calendar.add_holiday(holiday);
        assert!(!calendar.is_working_day(holiday));
    }
}
