//! Locale name tables for textual month, weekday and AM/PM tokens.
//!
//! Culture data enters the library through a single seam, the
//! [`TextRenderer`] trait: given a [`CompatRecord`] and a two-character
//! pattern such as `"%b"`, it returns the locale's text. A [`NameTable`] is
//! seeded by rendering every index of its kind once and recording the output
//! under the 1-based index; parsing looks names up, formatting reads them
//! back by index.
//!
//! [`NameCatalog`] owns one renderer and builds each table lazily, exactly
//! once, behind a [`OnceLock`], so a catalog can be shared between threads
//! through an `Arc`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{DateError, Result};
use crate::record::CompatRecord;

/// Characters that end a textual token in the input.
const DELIMITERS: &str = ",/-.!@#$%^&*()[]{};:<>?|\\";

/// The locale collaborator: renders one field of a record as text.
pub trait TextRenderer: Send + Sync {
    /// Render `record` through `pattern` (`'%'` followed by one field letter).
    fn render(&self, record: &CompatRecord, pattern: &str) -> String;
}

/// Default renderer backed by chrono's strftime implementation (POSIX
/// English names).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoRenderer;

impl TextRenderer for ChronoRenderer {
    fn render(&self, record: &CompatRecord, pattern: &str) -> String {
        let honour_weekday = matches!(pattern, "%a" | "%A");
        let when = naive_from_record(record, honour_weekday);
        let mut out = String::new();
        if write!(out, "{}", when.format(pattern)).is_err() {
            out.clear();
        }
        out
    }
}

/// Turn a record into a chrono value, clamping fields chrono cannot hold.
///
/// chrono derives the weekday from the date, so when the caller asks for a
/// weekday name the date is moved forward (at most six days) until it falls
/// on `record.weekday`.
fn naive_from_record(record: &CompatRecord, honour_weekday: bool) -> NaiveDateTime {
    let year = record.year.saturating_add(1900);
    let month = (record.month.clamp(0, 11) + 1) as u32;
    let mut date = NaiveDate::from_ymd_opt(year, month, record.day_of_month.max(1) as u32)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or(NaiveDate::MIN);

    if honour_weekday {
        let current = date.weekday().num_days_from_sunday() as i32;
        let shift = (record.weekday - current).rem_euclid(7) as u64;
        date = date.checked_add_days(Days::new(shift)).unwrap_or(date);
    }

    let time = NaiveTime::from_hms_opt(
        record.hour.clamp(0, 23) as u32,
        record.minute.clamp(0, 59) as u32,
        record.second.clamp(0, 59) as u32,
    )
    .unwrap_or_default();
    date.and_time(time)
}

/// Which names a [`NameTable`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    AbbrevMonth,
    FullMonth,
    AbbrevWeekday,
    FullWeekday,
}

impl NameKind {
    /// The strftime letter used to render this kind.
    pub fn code(self) -> char {
        match self {
            NameKind::AbbrevMonth => 'b',
            NameKind::FullMonth => 'B',
            NameKind::AbbrevWeekday => 'a',
            NameKind::FullWeekday => 'A',
        }
    }

    /// Number of entries: 12 months or 7 weekdays.
    pub fn len(self) -> usize {
        match self {
            NameKind::AbbrevMonth | NameKind::FullMonth => 12,
            NameKind::AbbrevWeekday | NameKind::FullWeekday => 7,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            NameKind::AbbrevMonth => "abbreviated month name",
            NameKind::FullMonth => "month name",
            NameKind::AbbrevWeekday => "abbreviated weekday name",
            NameKind::FullWeekday => "weekday name",
        }
    }
}

/// Canonical display strings of one [`NameKind`], keyed both ways.
///
/// Months are indexed 1 = January, weekdays 1 = Sunday.
#[derive(Debug, Clone)]
pub struct NameTable {
    kind: NameKind,
    entries: HashMap<String, u32>,
    names: Vec<String>,
}

impl NameTable {
    /// Render every index of `kind` once and record the results.
    pub fn build(kind: NameKind, renderer: &dyn TextRenderer) -> Self {
        let pattern = format!("%{}", kind.code());
        let mut record = CompatRecord::default();
        let names: Vec<String> = (0..kind.len() as i32)
            .map(|x| {
                record.month = x;
                record.weekday = x;
                renderer.render(&record, &pattern)
            })
            .collect();

        let entries = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as u32 + 1))
            .collect();

        debug!(?kind, ?names, "built name table");
        Self {
            kind,
            entries,
            names,
        }
    }

    pub fn kind(&self) -> NameKind {
        self.kind
    }

    /// Match the leading token of `text` (up to the first whitespace or
    /// punctuation character) against the table.
    ///
    /// Returns the 1-based index and the byte length matched.
    ///
    /// # Errors
    ///
    /// `BadFormatElement` if the token is not a name of this kind.
    pub fn lookup(&self, text: &str) -> Result<(u32, usize)> {
        let end = text
            .find(|c: char| c.is_whitespace() || DELIMITERS.contains(c))
            .unwrap_or(text.len());
        let candidate = &text[..end];
        self.entries
            .get(candidate)
            .map(|&index| (index, candidate.len()))
            .ok_or_else(|| {
                DateError::BadFormatElement(format!(
                    "'{}' is not a known {}",
                    candidate,
                    self.kind.describe()
                ))
            })
    }

    /// The name stored under the 1-based `index`.
    pub fn name(&self, index: u32) -> Option<&str> {
        let slot = index.checked_sub(1)? as usize;
        self.names.get(slot).map(String::as_str)
    }
}

/// Which half of the day an AM/PM marker denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfDay {
    Am,
    Pm,
}

/// The locale's AM/PM markers in both cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meridiem {
    pub am_upper: String,
    pub pm_upper: String,
    pub am_lower: String,
    pub pm_lower: String,
}

impl Meridiem {
    /// Render `%p` and `%P` at hour 0 and hour 13.
    pub fn build(renderer: &dyn TextRenderer) -> Self {
        let am = CompatRecord::default();
        let pm = CompatRecord {
            hour: 13,
            ..CompatRecord::default()
        };
        let meridiem = Self {
            am_upper: renderer.render(&am, "%p"),
            pm_upper: renderer.render(&pm, "%p"),
            am_lower: renderer.render(&am, "%P"),
            pm_lower: renderer.render(&pm, "%P"),
        };
        debug!(?meridiem, "built AM/PM markers");
        meridiem
    }

    /// The marker for `hour` (0–23) in upper or lower case.
    pub fn marker(&self, hour: u32, upper: bool) -> &str {
        match (hour < 12, upper) {
            (true, true) => &self.am_upper,
            (false, true) => &self.pm_upper,
            (true, false) => &self.am_lower,
            (false, false) => &self.pm_lower,
        }
    }

    /// Match a marker at the start of `text`, PM first. Empty markers never
    /// match. Returns the half of the day and the byte length matched.
    pub fn matches(&self, text: &str) -> Option<(HalfDay, usize)> {
        [
            (HalfDay::Pm, &self.pm_upper),
            (HalfDay::Pm, &self.pm_lower),
            (HalfDay::Am, &self.am_upper),
            (HalfDay::Am, &self.am_lower),
        ]
        .into_iter()
        .find(|(_, marker)| !marker.is_empty() && text.starts_with(marker.as_str()))
        .map(|(half, marker)| (half, marker.len()))
    }
}

/// All name tables of one locale, built on first use.
pub struct NameCatalog {
    renderer: Box<dyn TextRenderer>,
    abbrev_month: OnceLock<NameTable>,
    full_month: OnceLock<NameTable>,
    abbrev_weekday: OnceLock<NameTable>,
    full_weekday: OnceLock<NameTable>,
    meridiem: OnceLock<Meridiem>,
}

impl NameCatalog {
    pub fn new(renderer: impl TextRenderer + 'static) -> Self {
        Self {
            renderer: Box::new(renderer),
            abbrev_month: OnceLock::new(),
            full_month: OnceLock::new(),
            abbrev_weekday: OnceLock::new(),
            full_weekday: OnceLock::new(),
            meridiem: OnceLock::new(),
        }
    }

    pub fn table(&self, kind: NameKind) -> &NameTable {
        let slot = match kind {
            NameKind::AbbrevMonth => &self.abbrev_month,
            NameKind::FullMonth => &self.full_month,
            NameKind::AbbrevWeekday => &self.abbrev_weekday,
            NameKind::FullWeekday => &self.full_weekday,
        };
        slot.get_or_init(|| NameTable::build(kind, self.renderer.as_ref()))
    }

    pub fn meridiem(&self) -> &Meridiem {
        self.meridiem
            .get_or_init(|| Meridiem::build(self.renderer.as_ref()))
    }
}

impl Default for NameCatalog {
    fn default() -> Self {
        Self::new(ChronoRenderer)
    }
}

impl fmt::Debug for NameCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameCatalog")
            .field("abbrev_month", &self.abbrev_month.get())
            .field("full_month", &self.full_month.get())
            .field("abbrev_weekday", &self.abbrev_weekday.get())
            .field("full_weekday", &self.full_weekday.get())
            .field("meridiem", &self.meridiem.get())
            .finish_non_exhaustive()
    }
}
