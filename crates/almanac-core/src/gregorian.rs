//! Proleptic-Gregorian projection of the [`Timeline`].
//!
//! Day zero is January 1st of year 0. Year 0 itself is *not* a leap year in
//! this calendar (the leap rule only applies to years above zero), so
//! January 1st of year 1 is day 365.
//!
//! A [`DateTime`] stores nothing but its timeline point; every calendar field
//! is recomputed on demand, which keeps the fields consistent by
//! construction.
//!
//! # Key algorithms
//!
//! - **Year from day count**: split the day count into 400-, 100- and 4-year
//!   blocks, then correct the tentative year by the days left over.
//! - **Month from day of year**: guess `doy / 30` and step forward once if the
//!   guess ends before `doy` in the cumulative table.
//! - **Weekday**: Zeller's congruence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::duration::Duration;
use crate::error::{DateError, Result};
use crate::timeline::{Timeline, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND};

/// Days elapsed before the first of each month (index 0 = January); the
/// final two entries are the year length.
const DAYS_BEFORE_MONTH: [i64; 14] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365, 365];
const LEAP_DAYS_BEFORE_MONTH: [i64; 14] =
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366, 366];

const LAST_DAY: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const LEAP_LAST_DAY: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const LEAPS_PER_CENTURY: i64 = 24;
const DAYS_PER_400_YEARS: i64 = 400 * 365 + 4 * LEAPS_PER_CENTURY + 1;
const DAYS_PER_100_YEARS: i64 = 100 * 365 + LEAPS_PER_CENTURY;
const DAYS_PER_4_YEARS: i64 = 4 * 365 + 1;

// Day counts of January 1st 1900, 2000 and 2100.
const EPOCH_1900: i64 = 693_960;
const EPOCH_2000: i64 = 730_484;
const EPOCH_2100: i64 = 767_009;

/// `year > 0 && year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)`.
pub fn is_leap_year(year: i32) -> bool {
    year > 0 && year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of leap years between the epoch and January 1st of `year`.
pub const fn leaps_before(year: i32) -> i64 {
    let y = year as i64 - 1;
    y / 4 - y / 100 + y / 400
}

/// Day count of January 1st of `year`.
pub const fn days_before_year(year: i32) -> i64 {
    year as i64 * 365 + leaps_before(year)
}

/// Day count of December 31st of `i32::MAX`, the last day a [`DateTime`]
/// can hold. `i32::MAX` is not a leap year.
pub const MAX_DAYS: i64 = days_before_year(i32::MAX) + 364;

pub fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Length of `month` (1–12) in `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let table = if is_leap_year(year) {
        &LEAP_LAST_DAY
    } else {
        &LAST_DAY
    };
    table.get(month.checked_sub(1)? as usize).copied()
}

/// Days elapsed in the year before the first of `month` (1–12).
///
/// # Panics
///
/// Panics if `month` is 0 or greater than 13.
pub fn days_before_month(leap: bool, month: u32) -> i64 {
    cumulative(leap)[month as usize - 1]
}

fn cumulative(leap: bool) -> &'static [i64; 14] {
    if leap {
        &LEAP_DAYS_BEFORE_MONTH
    } else {
        &DAYS_BEFORE_MONTH
    }
}

/// Inverse of [`days_before_year`]: the year containing day `days` (>= 0).
///
/// Dates in the twentieth and twenty-first centuries skip the 400- and
/// 100-year divisions; both shortcuts agree with the general decomposition.
pub fn year_from_days(days: i64) -> i32 {
    let (x, a, b, c) = if (EPOCH_2000..EPOCH_2100).contains(&days) {
        let offset = days - EPOCH_2000 - 1;
        let b = offset / DAYS_PER_4_YEARS;
        (5, 0, b, offset - b * DAYS_PER_4_YEARS)
    } else if (EPOCH_1900..EPOCH_2000).contains(&days) {
        let offset = days - EPOCH_1900;
        let b = offset / DAYS_PER_4_YEARS;
        (4, 3, b, offset - b * DAYS_PER_4_YEARS)
    } else {
        decompose(days)
    };
    resolve_year(x, a, b, c)
}

/// Whole 400-, 100- and 4-year blocks in `days`, plus the remainder.
fn decompose(days: i64) -> (i64, i64, i64, i64) {
    let x = days / DAYS_PER_400_YEARS;
    let a = days % DAYS_PER_400_YEARS;
    let b = a % DAYS_PER_100_YEARS;
    let a = a / DAYS_PER_100_YEARS;
    let c = b % DAYS_PER_4_YEARS;
    let b = b / DAYS_PER_4_YEARS;
    (x, a, b, c)
}

fn resolve_year(x: i64, a: i64, b: i64, c: i64) -> i32 {
    let tentative = 400 * x + 100 * a + 4 * b;
    let year = if is_leap_year(tentative as i32) {
        if c < 365 {
            tentative
        } else {
            tentative + 1 + (c - 365) / 365
        }
    } else {
        tentative + c / 365
    };
    year as i32
}

/// A calendar date and time of day, projected from a [`Timeline`].
///
/// Values are immutable: the `with_*` methods return new values.
///
/// Deserialization goes through [`DateTime::from_timeline`], so out-of-range
/// day counts are rejected there too.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawDateTime")]
pub struct DateTime {
    timeline: Timeline,
}

#[derive(Deserialize)]
struct RawDateTime {
    timeline: Timeline,
}

impl TryFrom<RawDateTime> for DateTime {
    type Error = DateError;

    fn try_from(raw: RawDateTime) -> Result<Self> {
        DateTime::from_timeline(raw.timeline)
    }
}

impl DateTime {
    /// Midnight on the given date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        DateTime::default().with_date(year, month, day)
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        DateTime::from_ymd(year, month, day)?.with_time(hour, minute, second)
    }

    /// Midnight on the `ordinal`-th day (1-based) of `year`.
    pub fn from_ordinal(year: i32, ordinal: u32) -> Result<Self> {
        if year < 0 {
            return Err(DateError::out_of_range("year", year));
        }
        if ordinal < 1 || i64::from(ordinal) > days_in_year(year) {
            return Err(DateError::out_of_range("day of year", ordinal));
        }
        DateTime::from_timeline(Timeline::new(
            days_before_year(year) + i64::from(ordinal) - 1,
            0,
        ))
    }

    /// Wrap a timeline point.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for points before year 0 or after [`MAX_DAYS`].
    pub fn from_timeline(timeline: Timeline) -> Result<Self> {
        if !(0..=MAX_DAYS).contains(&timeline.days()) {
            return Err(DateError::out_of_range("days", timeline.days()));
        }
        Ok(Self { timeline })
    }

    /// Replace the date, keeping the time of day.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `month` is not 1–12, `year` is negative, or `day` is
    /// past the end of the month.
    pub fn with_date(self, year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DateError::out_of_range("month", month));
        }
        if year < 0 {
            return Err(DateError::out_of_range("year", year));
        }
        let last = days_in_month(year, month).unwrap_or(0);
        if day < 1 || day > last {
            return Err(DateError::out_of_range("day", day));
        }

        let days = days_before_year(year)
            + days_before_month(is_leap_year(year), month)
            + i64::from(day)
            - 1;
        Ok(Self {
            timeline: self.timeline.with_days(days),
        })
    }

    /// Replace the time of day. Sub-second ticks are cleared.
    ///
    /// `second` accepts 60 so that leap-second text can be represented; it is
    /// not otherwise special and rolls into the next minute.
    pub fn with_time(self, hour: u32, minute: u32, second: u32) -> Result<Self> {
        if hour > 23 {
            return Err(DateError::out_of_range("hour", hour));
        }
        if minute > 59 {
            return Err(DateError::out_of_range("minute", minute));
        }
        if second > 60 {
            return Err(DateError::out_of_range("second", second));
        }

        let ticks = i64::from(second) * TICKS_PER_SECOND
            + i64::from(minute) * TICKS_PER_MINUTE
            + i64::from(hour) * TICKS_PER_HOUR;
        Ok(Self {
            timeline: self.timeline.with_ticks(ticks),
        })
    }

    pub fn at_midnight(self) -> Self {
        Self {
            timeline: self.timeline.with_ticks(0),
        }
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    /// Days since the epoch.
    pub fn days(&self) -> i64 {
        self.timeline.days()
    }

    /// Milliseconds since midnight.
    pub fn ticks(&self) -> i64 {
        self.timeline.ticks()
    }

    pub fn year(&self) -> i32 {
        year_from_days(self.days())
    }

    pub fn month(&self) -> u32 {
        month_of(self.year(), i64::from(self.day_of_year()))
    }

    pub fn day(&self) -> u32 {
        self.ymd().2
    }

    /// `(year, month, day)` in one pass.
    pub fn ymd(&self) -> (i32, u32, u32) {
        let year = self.year();
        let doy = self.days() - days_before_year(year) + 1;
        let month = month_of(year, doy);
        let day = doy - days_before_month(is_leap_year(year), month);
        (year, month, day as u32)
    }

    /// 1-based day of the year (1–366).
    pub fn day_of_year(&self) -> u32 {
        (self.days() - days_before_year(self.year()) + 1) as u32
    }

    /// Day of the week, 0 = Sunday.
    pub fn day_of_week(&self) -> u32 {
        let (year, month, day) = self.ymd();
        zeller(year, month, day)
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    pub fn hour(&self) -> u32 {
        (self.ticks() / TICKS_PER_HOUR) as u32
    }

    pub fn minute(&self) -> u32 {
        (self.ticks() / TICKS_PER_MINUTE % 60) as u32
    }

    pub fn second(&self) -> u32 {
        (self.ticks() / TICKS_PER_SECOND % 60) as u32
    }

    /// Milliseconds into the current second.
    pub fn subsecond(&self) -> u32 {
        (self.ticks() % TICKS_PER_SECOND) as u32
    }

    /// Move forward by `span`; fails if the result leaves year 0 ..= `i32::MAX`.
    pub fn checked_add(self, span: Duration) -> Result<Self> {
        DateTime::from_timeline(self.timeline + span.delta())
    }

    /// Move backward by `span`; fails if the result leaves year 0 ..= `i32::MAX`.
    pub fn checked_sub(self, span: Duration) -> Result<Self> {
        DateTime::from_timeline(self.timeline - span.delta())
    }

    /// `YYYY-MM-DDTHH:MM:SS`, the form [`str::parse`] accepts back.
    pub fn to_iso_string(&self) -> String {
        let (year, month, day) = self.ymd();
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year,
            month,
            day,
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

fn month_of(year: i32, doy: i64) -> u32 {
    let table = cumulative(is_leap_year(year));
    // guess counts from 0 = January, so stepping past it yields the 1-based month.
    let guess = (doy / 30) as usize;
    if doy <= table[guess] {
        guess as u32
    } else {
        guess as u32 + 1
    }
}

/// Zeller's congruence with March = 3 .. February = 14 of the previous year.
fn zeller(year: i32, month: u32, day: u32) -> u32 {
    let (mut y, mut m) = (i64::from(year), i64::from(month));
    if m < 3 {
        m += 12;
        y -= 1;
    }
    let mut weekday = 2 + i64::from(day) + (13 * m - 2) / 5 + y + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400);
    // The congruence treats year 0 as leap; this calendar does not.
    if y < 0 {
        weekday += 1;
    }
    weekday.rem_euclid(7) as u32
}

impl Sub for DateTime {
    type Output = Duration;

    fn sub(self, other: DateTime) -> Duration {
        Duration::new(self.timeline - other.timeline)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.ymd();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            year,
            month,
            day,
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}
