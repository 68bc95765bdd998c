//! Compatibility record: the broken-down time shape exchanged with text
//! renderers.
//!
//! Field conventions follow the POSIX `struct tm`: months run 0–11 and years
//! count from 1900. The record is purely derived from a
//! [`DateTime`](crate::DateTime); it carries no state of its own.

use serde::{Deserialize, Serialize};

use crate::error::{DateError, Result};
use crate::gregorian::DateTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompatRecord {
    pub second: i32,
    pub minute: i32,
    pub hour: i32,
    pub day_of_month: i32,
    /// 0 = Sunday.
    pub weekday: i32,
    /// 0 = January.
    pub month: i32,
    /// Years since 1900.
    pub year: i32,
}

impl DateTime {
    /// Project this value onto a [`CompatRecord`].
    pub fn to_record(&self) -> CompatRecord {
        let (year, month, day) = self.ymd();
        CompatRecord {
            second: self.second() as i32,
            minute: self.minute() as i32,
            hour: self.hour() as i32,
            day_of_month: day as i32,
            weekday: self.day_of_week() as i32,
            month: month as i32 - 1,
            year: year - 1900,
        }
    }

    /// Build a value from a [`CompatRecord`], validating every field exactly
    /// as [`DateTime::from_ymd_hms`] does. The record's weekday is ignored.
    pub fn from_record(record: &CompatRecord) -> Result<Self> {
        let year = record
            .year
            .checked_add(1900)
            .ok_or_else(|| DateError::out_of_range("year", record.year))?;
        DateTime::from_ymd_hms(
            year,
            unsigned("month", i64::from(record.month) + 1)?,
            unsigned("day", record.day_of_month.into())?,
            unsigned("hour", record.hour.into())?,
            unsigned("minute", record.minute.into())?,
            unsigned("second", record.second.into())?,
        )
    }
}

fn unsigned(field: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| DateError::out_of_range(field, value))
}
