//! Linear timeline: a count of whole days since the epoch plus millisecond
//! ticks into the current day.
//!
//! Every calendar value and every duration is a projection of a [`Timeline`].
//! Ticks are always kept in `[0, TICKS_PER_DAY)`; the day count carries the
//! sign, so a span of "minus one and a half days" is stored as
//! `days = -2, ticks = 12h`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

pub const TICKS_PER_SECOND: i64 = 1000;
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;
pub const TICKS_PER_WEEK: i64 = TICKS_PER_DAY * 7;
pub const DAYS_PER_WEEK: i64 = 7;

/// A `(days, ticks)` pair ordered by days first, then ticks.
///
/// Overflow follows the native `i64` range and is not handled specially.
/// Deserialized values are normalized the same way as [`Timeline::new`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "RawTimeline")]
pub struct Timeline {
    days: i64,
    ticks: i64,
}

#[derive(Deserialize)]
struct RawTimeline {
    days: i64,
    ticks: i64,
}

impl From<RawTimeline> for Timeline {
    fn from(raw: RawTimeline) -> Self {
        Timeline::new(raw.days, raw.ticks)
    }
}

impl Timeline {
    /// Build a timeline point, folding any out-of-range `ticks` into `days`.
    pub fn new(days: i64, ticks: i64) -> Self {
        Self {
            days: days + ticks.div_euclid(TICKS_PER_DAY),
            ticks: ticks.rem_euclid(TICKS_PER_DAY),
        }
    }

    /// Build a timeline point from a single tick count.
    pub fn from_ticks(total: i64) -> Self {
        Self::new(0, total)
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    /// `days * TICKS_PER_DAY + ticks`.
    pub fn total_ticks(&self) -> i64 {
        self.days * TICKS_PER_DAY + self.ticks
    }

    pub(crate) fn with_days(self, days: i64) -> Self {
        Self { days, ..self }
    }

    pub(crate) fn with_ticks(self, ticks: i64) -> Self {
        Self::new(self.days, ticks)
    }
}

impl AddAssign for Timeline {
    /// Sum the ticks, carry one day if the sum reaches a full day, then add
    /// the operand's day count.
    fn add_assign(&mut self, other: Timeline) {
        self.ticks += other.ticks;
        if self.ticks >= TICKS_PER_DAY {
            self.ticks -= TICKS_PER_DAY;
            self.days += 1;
        }
        self.days += other.days;
    }
}

impl SubAssign for Timeline {
    /// Subtract the ticks directly when possible; otherwise borrow one day
    /// before subtracting the operand's day count.
    fn sub_assign(&mut self, other: Timeline) {
        if self.ticks >= other.ticks {
            self.ticks -= other.ticks;
        } else {
            self.ticks = TICKS_PER_DAY - other.ticks + self.ticks;
            self.days -= 1;
        }
        self.days -= other.days;
    }
}

impl Add for Timeline {
    type Output = Timeline;

    fn add(mut self, other: Timeline) -> Timeline {
        self += other;
        self
    }
}

impl Sub for Timeline {
    type Output = Timeline;

    fn sub(mut self, other: Timeline) -> Timeline {
        self -= other;
        self
    }
}
