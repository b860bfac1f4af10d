//! Calendar date-time for generated fixtures
//!
//! A `DateTime` counts 100-nanosecond ticks since 0001-01-01T00:00:00 in the
//! proleptic Gregorian calendar, up to 9999-12-31T23:59:59.9999999. The range
//! and resolution match the date type of the platform the original fixture
//! library ran on, so generated dates line up value for value.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_DAY: i64 = 86_400 * TICKS_PER_SECOND;

/// Days from 0001-01-01 to 10000-01-01
const DAYS_TO_10000: i64 = 3_652_059;
const MAX_TICKS: i64 = DAYS_TO_10000 * TICKS_PER_DAY - 1;

const DAYS_400_YEARS: i64 = 146_097;
const DAYS_100_YEARS: i64 = 36_524;
const DAYS_4_YEARS: i64 = 1_461;
const DAYS_PER_YEAR: i64 = 365;

const DAYS_TO_MONTH_365: [i64; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const DAYS_TO_MONTH_366: [i64; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum DateError {
    #[error("Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    #[error("Ticks {0} outside the representable date range")]
    TicksOutOfRange(i64),

    #[error("Day offset is not a finite number")]
    NonFiniteDays,
}

/// Date and time of day, at 100 ns resolution
///
/// # Example
/// ```
/// use kaosko::DateTime;
///
/// let date = DateTime::from_ymd(2017, 3, 14).unwrap();
/// assert_eq!(date.to_string(), "2017-03-14");
/// assert!(date.is_midnight());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DateTime {
    ticks: i64,
}

impl DateTime {
    /// 0001-01-01T00:00:00
    pub const MIN: DateTime = DateTime { ticks: 0 };
    /// 9999-12-31T23:59:59.9999999
    pub const MAX: DateTime = DateTime { ticks: MAX_TICKS };

    pub fn from_ticks(ticks: i64) -> Result<Self, DateError> {
        if !(0..=MAX_TICKS).contains(&ticks) {
            return Err(DateError::TicksOutOfRange(ticks));
        }
        Ok(Self { ticks })
    }

    /// Midnight at the start of the given calendar day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDate { year, month, day };
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(invalid);
        }
        let table = month_table(year);
        let month_len = table[month as usize] - table[month as usize - 1];
        if day < 1 || i64::from(day) > month_len {
            return Err(invalid);
        }

        let y = i64::from(year) - 1;
        let days = y * DAYS_PER_YEAR + y / 4 - y / 100 + y / 400
            + table[month as usize - 1]
            + i64::from(day)
            - 1;
        Ok(Self {
            ticks: days * TICKS_PER_DAY,
        })
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateError> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return Err(DateError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        let date = Self::from_ymd(year, month, day)?;
        let seconds = i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
        Ok(Self {
            ticks: date.ticks + seconds * TICKS_PER_SECOND,
        })
    }

    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    pub fn year(&self) -> i32 {
        self.civil().0
    }

    pub fn month(&self) -> u32 {
        self.civil().1
    }

    pub fn day(&self) -> u32 {
        self.civil().2
    }

    pub fn hour(&self) -> u32 {
        (self.time_of_day_ticks() / (3600 * TICKS_PER_SECOND)) as u32
    }

    pub fn minute(&self) -> u32 {
        (self.time_of_day_ticks() / (60 * TICKS_PER_SECOND) % 60) as u32
    }

    pub fn second(&self) -> u32 {
        (self.time_of_day_ticks() / TICKS_PER_SECOND % 60) as u32
    }

    /// Ticks elapsed since midnight
    pub fn time_of_day_ticks(&self) -> i64 {
        self.ticks % TICKS_PER_DAY
    }

    pub fn is_midnight(&self) -> bool {
        self.time_of_day_ticks() == 0
    }

    /// The same day with the time of day dropped
    pub fn date(&self) -> Self {
        Self {
            ticks: self.ticks - self.time_of_day_ticks(),
        }
    }

    /// Whole days from `self` to `other`, truncated toward zero
    ///
    /// Negative when `other` lies before `self`.
    ///
    /// # Example
    /// ```
    /// use kaosko::DateTime;
    ///
    /// let from = DateTime::from_ymd(2020, 2, 1).unwrap();
    /// let to = DateTime::from_ymd_hms(2020, 3, 1, 23, 0, 0).unwrap();
    /// assert_eq!(from.whole_days_until(&to), 29);
    /// ```
    pub fn whole_days_until(&self, other: &DateTime) -> i64 {
        (other.ticks - self.ticks) / TICKS_PER_DAY
    }

    /// Shift by a possibly fractional number of days
    ///
    /// The fractional part is converted to ticks by truncation, so a shift
    /// never rounds up into the next tick.
    ///
    /// # Errors
    /// [`DateError::TicksOutOfRange`] with the (saturated) target tick count
    /// when the result leaves `MIN..=MAX`, [`DateError::NonFiniteDays`] for
    /// NaN or infinite input.
    pub fn add_days(&self, days: f64) -> Result<Self, DateError> {
        if !days.is_finite() {
            return Err(DateError::NonFiniteDays);
        }
        let offset = days_to_ticks(days)
            .unwrap_or_else(|| (days * TICKS_PER_DAY as f64) as i64);
        Self::from_ticks(self.ticks.saturating_add(offset))
    }

    /// `self` shifted by `offset` ticks, for offsets already known to stay
    /// in range.
    pub(crate) fn offset_within(&self, offset: i64) -> Self {
        Self {
            ticks: self.ticks + offset,
        }
    }

    fn civil(&self) -> (i32, u32, u32) {
        let mut n = self.ticks / TICKS_PER_DAY;

        let y400 = n / DAYS_400_YEARS;
        n -= y400 * DAYS_400_YEARS;
        let y100 = (n / DAYS_100_YEARS).min(3);
        n -= y100 * DAYS_100_YEARS;
        let y4 = n / DAYS_4_YEARS;
        n -= y4 * DAYS_4_YEARS;
        let y1 = (n / DAYS_PER_YEAR).min(3);
        n -= y1 * DAYS_PER_YEAR;

        let year = (y400 * 400 + y100 * 100 + y4 * 4 + y1 + 1) as i32;
        let table = month_table(year);
        let mut month = 1;
        while n >= table[month] {
            month += 1;
        }
        let day = n - table[month - 1] + 1;
        (year, month as u32, day as u32)
    }
}

/// Convert a fractional day count to ticks, truncating toward zero
pub(crate) fn days_to_ticks(days: f64) -> Option<i64> {
    if !days.is_finite() || days.abs() >= DAYS_TO_10000 as f64 {
        return None;
    }
    Some(truncate_days_to_ticks(days))
}

/// Same as [`days_to_ticks`] for a value already known to be finite and
/// within the calendar's span
pub(crate) fn truncate_days_to_ticks(days: f64) -> i64 {
    let whole = days.trunc();
    let fraction = days - whole;
    whole as i64 * TICKS_PER_DAY + (fraction * TICKS_PER_DAY as f64) as i64
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn month_table(year: i32) -> &'static [i64; 13] {
    if is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    }
}

impl TryFrom<i64> for DateTime {
    type Error = DateError;

    fn try_from(ticks: i64) -> Result<Self, Self::Error> {
        Self::from_ticks(ticks)
    }
}

impl From<DateTime> for i64 {
    fn from(value: DateTime) -> Self {
        value.ticks
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.civil();
        write!(f, "{:04}-{:02}-{:02}", year, month, day)?;
        if self.is_midnight() {
            return Ok(());
        }
        write!(
            f,
            "T{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )?;
        let fraction = self.ticks % TICKS_PER_SECOND;
        if fraction != 0 {
            write!(f, ".{:07}", fraction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_and_max_civil_fields() {
        assert_eq!(DateTime::MIN.to_string(), "0001-01-01");
        assert_eq!(DateTime::MAX.to_string(), "9999-12-31T23:59:59.9999999");
    }

    #[test]
    fn test_leap_day_round_trips_through_ticks() {
        let date = DateTime::from_ymd(2000, 2, 29).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2000, 2, 29));
    }

    #[test]
    fn test_century_non_leap_year_rejects_feb_29() {
        assert_eq!(
            DateTime::from_ymd(1900, 2, 29),
            Err(DateError::InvalidDate {
                year: 1900,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_last_day_of_400_year_cycle() {
        let date = DateTime::from_ymd(2000, 12, 31).unwrap();
        assert_eq!(date.to_string(), "2000-12-31");
        let next = date.add_days(1.0).unwrap();
        assert_eq!(next.to_string(), "2001-01-01");
    }

    #[test]
    fn test_days_to_ticks_truncates_fraction() {
        // One tick short of a full day must not round up to the next day
        let almost_one = 1.0 - 1.0 / (TICKS_PER_DAY as f64 * 4.0);
        let ticks = days_to_ticks(almost_one).unwrap();
        assert!(ticks < TICKS_PER_DAY);
    }

    #[test]
    fn test_days_to_ticks_rejects_non_finite() {
        assert_eq!(days_to_ticks(f64::NAN), None);
        assert_eq!(days_to_ticks(f64::INFINITY), None);
    }
}
