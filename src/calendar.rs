/// Calendar arithmetic over wall-clock date and time fields.
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => panic!("Invalid month: {month}"),
    }
}

/// Calculates day of week for specified date, `0` is Sunday.
pub(crate) fn day_of_week(year: i32, month: u8, day: u8) -> u8 {
    if day == 0 || month == 0 || month > 12 || day > days_in_month(year, month) {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }

    let month_offset: i32 = if is_leap_year(year) {
        [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
    } else {
        [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
    }[(month - 1) as usize];

    let year = year - 1;

    (day as i32 + month_offset + 5 * year.rem_euclid(4) + 4 * year.rem_euclid(100) + 6 * year.rem_euclid(400))
        .rem_euclid(7) as u8
}

/// Broken down wall-clock time, the state of the occurrences search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Cursor {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
}

impl Cursor {
    /// Drops fractions of the second.
    pub(crate) fn from_naive(value: &NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month() as u8,
            day: value.day() as u8,
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            // leap second is reported as a 59th second with extra nanoseconds
            second: value.second() as u8,
        }
    }

    /// Returns `None` if the value is out of the representable range.
    pub(crate) fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)?.and_hms_opt(
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
        )
    }

    /// Sequential number of the month, to measure distance between cursors.
    #[inline]
    pub(crate) fn month_index(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }

    #[inline]
    pub(crate) fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Resets time of the day to midnight.
    #[inline]
    pub(crate) fn reset_time(&mut self) {
        self.hour = 0;
        self.minute = 0;
        self.second = 0;
    }

    /// Moves to the first day of the next month at midnight.
    pub(crate) fn next_month(&mut self) {
        if self.month < 12 {
            self.month += 1;
        } else {
            self.year += 1;
            self.month = 1;
        }
        self.day = 1;
        self.reset_time();
    }

    /// Moves to the next day at midnight.
    pub(crate) fn next_day(&mut self) {
        if self.day < self.days_in_month() {
            self.day += 1;
            self.reset_time();
        } else {
            self.next_month();
        }
    }

    /// Moves to the beginning of the next hour.
    pub(crate) fn next_hour(&mut self) {
        if self.hour < 23 {
            self.hour += 1;
            self.minute = 0;
            self.second = 0;
        } else {
            self.next_day();
        }
    }

    /// Moves to the beginning of the next minute.
    pub(crate) fn next_minute(&mut self) {
        if self.minute < 59 {
            self.minute += 1;
            self.second = 0;
        } else {
            self.next_hour();
        }
    }

    pub(crate) fn next_second(&mut self) {
        if self.second < 59 {
            self.second += 1;
        } else {
            self.next_minute();
        }
    }
}
