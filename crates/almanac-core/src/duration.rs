//! Elapsed spans between two calendar values.
//!
//! A [`Duration`] wraps a [`Timeline`] delta. The delta is *not* a calendar
//! point, so unit accessors work on the total tick count and never go through
//! the calendar projection.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

use crate::timeline::{
    Timeline, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND, TICKS_PER_WEEK,
};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration {
    delta: Timeline,
}

impl Duration {
    pub fn new(delta: Timeline) -> Self {
        Self { delta }
    }

    pub fn from_ticks(ticks: i64) -> Self {
        Self::new(Timeline::from_ticks(ticks))
    }

    pub fn from_weeks(weeks: i64) -> Self {
        Self::from_ticks(weeks * TICKS_PER_WEEK)
    }

    pub fn from_days(days: i64) -> Self {
        Self::from_ticks(days * TICKS_PER_DAY)
    }

    pub fn from_hours(hours: i64) -> Self {
        Self::from_ticks(hours * TICKS_PER_HOUR)
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::from_ticks(minutes * TICKS_PER_MINUTE)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self::from_ticks(seconds * TICKS_PER_SECOND)
    }

    /// Milliseconds.
    pub fn from_subseconds(subseconds: i64) -> Self {
        Self::from_ticks(subseconds)
    }

    pub fn delta(&self) -> Timeline {
        self.delta
    }

    pub fn total_ticks(&self) -> i64 {
        self.delta.total_ticks()
    }

    // Unit accessors truncate toward zero, so negative spans report
    // negative whole units.

    pub fn weeks(&self) -> i64 {
        self.total_ticks() / TICKS_PER_WEEK
    }

    pub fn days(&self) -> i64 {
        self.total_ticks() / TICKS_PER_DAY
    }

    pub fn hours(&self) -> i64 {
        self.total_ticks() / TICKS_PER_HOUR
    }

    pub fn minutes(&self) -> i64 {
        self.total_ticks() / TICKS_PER_MINUTE
    }

    pub fn seconds(&self) -> i64 {
        self.total_ticks() / TICKS_PER_SECOND
    }

    /// Milliseconds left over after the whole seconds.
    pub fn subseconds(&self) -> i64 {
        self.total_ticks() % TICKS_PER_SECOND
    }
}

impl From<Timeline> for Duration {
    fn from(delta: Timeline) -> Self {
        Self::new(delta)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::new(self.delta + other.delta)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Duration {
        Duration::new(self.delta - other.delta)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::new(Timeline::default() - self.delta)
    }
}
