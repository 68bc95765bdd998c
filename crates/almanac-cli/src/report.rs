//! Serializable views of dates and durations for `--json` output.

use almanac_core::{DateFormatter, DateTime, Duration};
use serde::Serialize;
use std::fmt;

/// Every projected field of one date.
#[derive(Debug, Serialize)]
pub struct DateReport {
    pub iso: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub day_of_year: u32,
    /// 0 = Sunday.
    pub day_of_week: u32,
    pub weekday: String,
    pub month_name: String,
    pub leap_year: bool,
    /// Days since January 1st of year 0.
    pub days: i64,
    pub ticks: i64,
}

impl DateReport {
    /// `weekday` and `month_name` render the `%A` and `%B` names.
    pub fn new(date: &DateTime, weekday: &DateFormatter, month_name: &DateFormatter) -> Self {
        let (year, month, day) = date.ymd();
        Self {
            iso: date.to_string(),
            year,
            month,
            day,
            hour: date.hour(),
            minute: date.minute(),
            second: date.second(),
            day_of_year: date.day_of_year(),
            day_of_week: date.day_of_week(),
            weekday: weekday.format(date),
            month_name: month_name.format(date),
            leap_year: date.is_leap_year(),
            days: date.days(),
            ticks: date.ticks(),
        }
    }
}

impl fmt::Display for DateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "date:         {}", self.iso)?;
        writeln!(f, "weekday:      {} ({})", self.weekday, self.day_of_week)?;
        writeln!(f, "month:        {} ({})", self.month_name, self.month)?;
        writeln!(f, "day of year:  {}", self.day_of_year)?;
        writeln!(f, "leap year:    {}", self.leap_year)?;
        write!(f, "day count:    {}", self.days)
    }
}

/// A duration in every unit.
#[derive(Debug, Serialize)]
pub struct DurationReport {
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub subseconds: i64,
}

impl From<Duration> for DurationReport {
    fn from(span: Duration) -> Self {
        Self {
            weeks: span.weeks(),
            days: span.days(),
            hours: span.hours(),
            minutes: span.minutes(),
            seconds: span.seconds(),
            subseconds: span.subseconds(),
        }
    }
}

impl fmt::Display for DurationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "weeks:    {}", self.weeks)?;
        writeln!(f, "days:     {}", self.days)?;
        writeln!(f, "hours:    {}", self.hours)?;
        writeln!(f, "minutes:  {}", self.minutes)?;
        writeln!(f, "seconds:  {}", self.seconds)?;
        write!(f, "millis:   {}", self.subseconds)
    }
}
