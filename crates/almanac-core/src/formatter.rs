//! Pattern-driven rendering and parsing of [`DateTime`] values.
//!
//! A [`DateFormatter`] compiles its pattern once and can then be shared
//! freely: formatting walks the tokens and emits text; parsing walks the same
//! tokens with an input cursor, collects the fields it sees, and only builds
//! the date after the last token, through the validating constructors.
//!
//! ```
//! use almanac_core::{DateFormatter, DateTime};
//!
//! let formatter = DateFormatter::new("%A, %b %d, %Y").unwrap();
//! let date = formatter.parse("Monday, Jun 10, 2002").unwrap();
//! assert_eq!(date, DateTime::from_ymd(2002, 6, 10).unwrap());
//! assert_eq!(formatter.format(&date), "Monday, Jun 10, 2002");
//! ```

use std::str::FromStr;
use std::sync::Arc;
use tracing::trace;

use crate::error::{DateError, Result};
use crate::gregorian::DateTime;
use crate::names::{HalfDay, NameCatalog, NameKind};
use crate::options::ParseOptions;
use crate::pattern::{FieldCode, Pattern, Token};

/// Renders dates through a compiled pattern and parses text back.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    pattern: Pattern,
    catalog: Arc<NameCatalog>,
    options: ParseOptions,
}

impl DateFormatter {
    /// Compile `pattern` against the default (chrono, English) name catalog.
    ///
    /// # Errors
    ///
    /// `BadFormatElement` if the pattern has an unknown or dangling field code.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_catalog(pattern, Arc::new(NameCatalog::default()))
    }

    /// Compile `pattern` against a shared catalog.
    pub fn with_catalog(pattern: &str, catalog: Arc<NameCatalog>) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::compile(pattern)?,
            catalog,
            options: ParseOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn catalog(&self) -> &Arc<NameCatalog> {
        &self.catalog
    }

    /// Render `date` token by token.
    pub fn format(&self, date: &DateTime) -> String {
        let fields = Fields::of(date);
        let mut out = String::new();
        for token in self.pattern.tokens() {
            match token {
                Token::Literal(text) | Token::Whitespace(text) => out.push_str(text),
                Token::Field(code) => self.format_field(*code, &fields, &mut out),
            }
        }
        out
    }

    fn format_field(&self, code: FieldCode, fields: &Fields, out: &mut String) {
        match code {
            FieldCode::AbbrevWeekday => {
                self.push_name(NameKind::AbbrevWeekday, fields.weekday + 1, out)
            }
            FieldCode::FullWeekday => self.push_name(NameKind::FullWeekday, fields.weekday + 1, out),
            FieldCode::AbbrevMonth => self.push_name(NameKind::AbbrevMonth, fields.month, out),
            FieldCode::FullMonth => self.push_name(NameKind::FullMonth, fields.month, out),
            FieldCode::Century => out.push_str(&format!("{:02}", fields.year / 100)),
            FieldCode::Day => out.push_str(&format!("{:02}", fields.day)),
            FieldCode::DaySpacePadded => out.push_str(&format!("{:>2}", fields.day)),
            FieldCode::DayOfYear => out.push_str(&format!("{:03}", fields.day_of_year)),
            FieldCode::Hour => out.push_str(&format!("{:02}", fields.hour)),
            FieldCode::HourSpacePadded => out.push_str(&format!("{:>2}", fields.hour)),
            FieldCode::Hour12 => out.push_str(&format!("{:02}", fields.hour12())),
            FieldCode::Hour12SpacePadded => out.push_str(&format!("{:>2}", fields.hour12())),
            FieldCode::Month => out.push_str(&format!("{:02}", fields.month)),
            FieldCode::Minute => out.push_str(&format!("{:02}", fields.minute)),
            FieldCode::MeridiemUpper => out.push_str(self.catalog.meridiem().marker(fields.hour, true)),
            FieldCode::MeridiemLower => {
                out.push_str(self.catalog.meridiem().marker(fields.hour, false))
            }
            FieldCode::Second => out.push_str(&format!("{:02}", fields.second)),
            FieldCode::Weekday => out.push_str(&fields.weekday.to_string()),
            FieldCode::ShortYear => out.push_str(&format!("{:02}", fields.year % 100)),
            FieldCode::Year => out.push_str(&format!("{:04}", fields.year)),
        }
    }

    fn push_name(&self, kind: NameKind, index: u32, out: &mut String) {
        if let Some(name) = self.catalog.table(kind).name(index) {
            out.push_str(name);
        }
    }

    /// Parse `text` against the pattern.
    ///
    /// The whole input must be consumed.
    ///
    /// # Errors
    ///
    /// - `ParsingFailure` when a literal, whitespace run, AM/PM marker or
    ///   numeric field does not match, or text is left over;
    /// - `BadFormatElement` when a month or weekday name is not in the table;
    /// - `OutOfRange` when a field, or the assembled date, is invalid.
    pub fn parse(&self, text: &str) -> Result<DateTime> {
        let result = self
            .scan(text)
            .and_then(|parsed| parsed.resolve(&self.options));
        if let Err(ref error) = result {
            trace!(pattern = self.pattern(), input = text, %error, "parse rejected");
        }
        result
    }

    fn scan(&self, text: &str) -> Result<Parsed> {
        let mut parsed = Parsed::default();
        let mut pos = 0;

        for token in self.pattern.tokens() {
            let rest = &text[pos..];
            pos += match token {
                Token::Whitespace(_) => {
                    let run = rest.len() - rest.trim_start().len();
                    if run == 0 {
                        return Err(DateError::parsing(pos, "expected whitespace"));
                    }
                    run
                }
                Token::Literal(literal) => {
                    if !rest.starts_with(literal.as_str()) {
                        return Err(DateError::parsing(pos, format!("expected '{literal}'")));
                    }
                    literal.len()
                }
                Token::Field(code) => self.parse_field(*code, rest, pos, &mut parsed)?,
            };
        }

        if pos < text.len() {
            return Err(DateError::parsing(
                pos,
                format!("unexpected trailing text '{}'", &text[pos..]),
            ));
        }
        Ok(parsed)
    }

    /// Parse one field at the start of `rest`, returning the bytes consumed.
    ///
    /// Numeric values outside their field's bounds are recorded rather than
    /// rejected on the spot, so a later structural mismatch is reported as a
    /// parse failure first.
    fn parse_field(
        &self,
        code: FieldCode,
        rest: &str,
        offset: usize,
        parsed: &mut Parsed,
    ) -> Result<usize> {
        let (width, min, max, field, slot) = match code {
            FieldCode::AbbrevWeekday | FieldCode::FullWeekday => {
                let kind = if code == FieldCode::AbbrevWeekday {
                    NameKind::AbbrevWeekday
                } else {
                    NameKind::FullWeekday
                };
                let (index, consumed) = self.catalog.table(kind).lookup(rest)?;
                parsed.weekday = Some(index - 1);
                return Ok(consumed);
            }
            FieldCode::AbbrevMonth | FieldCode::FullMonth => {
                let kind = if code == FieldCode::AbbrevMonth {
                    NameKind::AbbrevMonth
                } else {
                    NameKind::FullMonth
                };
                let (index, consumed) = self.catalog.table(kind).lookup(rest)?;
                parsed.month = Some(index);
                return Ok(consumed);
            }
            FieldCode::MeridiemUpper | FieldCode::MeridiemLower => {
                let (half, consumed) = self
                    .catalog
                    .meridiem()
                    .matches(rest)
                    .ok_or_else(|| DateError::parsing(offset, "expected an AM/PM marker"))?;
                parsed.meridiem = Some(half);
                return Ok(consumed);
            }
            FieldCode::Century => (2, 0, 99, "century", &mut parsed.century),
            FieldCode::Day | FieldCode::DaySpacePadded => (2, 1, 31, "day", &mut parsed.day),
            FieldCode::DayOfYear => (3, 1, 366, "day of year", &mut parsed.day_of_year),
            FieldCode::Hour | FieldCode::HourSpacePadded => (2, 0, 23, "hour", &mut parsed.hour),
            FieldCode::Hour12 | FieldCode::Hour12SpacePadded => {
                (2, 1, 12, "hour", &mut parsed.hour)
            }
            FieldCode::Month => (2, 1, 12, "month", &mut parsed.month),
            FieldCode::Minute => (2, 0, 59, "minute", &mut parsed.minute),
            FieldCode::Second => (2, 0, 60, "second", &mut parsed.second),
            FieldCode::Weekday => (1, 0, 6, "weekday", &mut parsed.weekday),
            FieldCode::ShortYear => (2, 0, 99, "year", &mut parsed.short_year),
            FieldCode::Year => (4, 0, 9999, "year", &mut parsed.year),
        };

        let (value, consumed) = scan_number(rest, offset, width, field)?;
        *slot = Some(value);
        if !(min..=max).contains(&value) {
            parsed
                .out_of_range
                .get_or_insert(DateError::out_of_range(field, value));
        }
        Ok(consumed)
    }
}

/// Scan up to `width` characters of `input` for decimal digits.
///
/// Non-digit characters inside the window are skipped, so `" 7"` reads as 7
/// for space-padded fields. The consumed length ends just after the last
/// digit found. `offset` is only used to position errors.
///
/// # Errors
///
/// `ParsingFailure` if the window holds no digit.
pub(crate) fn scan_number(
    input: &str,
    offset: usize,
    width: usize,
    field: &'static str,
) -> Result<(u32, usize)> {
    let mut value = 0u32;
    let mut consumed = None;

    for (i, c) in input.char_indices().take(width) {
        if let Some(digit) = c.to_digit(10) {
            value = value * 10 + digit;
            consumed = Some(i + c.len_utf8());
        }
    }

    let consumed =
        consumed.ok_or_else(|| DateError::parsing(offset, format!("expected digits for {field}")))?;
    Ok((value, consumed))
}

impl FromStr for DateTime {
    type Err = DateError;

    /// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`.
    fn from_str(text: &str) -> Result<Self> {
        let pattern = match text.as_bytes().get(10) {
            None => "%Y-%m-%d",
            Some(b' ') => "%Y-%m-%d %H:%M:%S",
            Some(_) => "%Y-%m-%dT%H:%M:%S",
        };
        DateFormatter::new(pattern)?.parse(text)
    }
}

/// Calendar fields of one value, computed once per format call.
struct Fields {
    year: i32,
    month: u32,
    day: u32,
    day_of_year: u32,
    weekday: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl Fields {
    fn of(date: &DateTime) -> Self {
        let (year, month, day) = date.ymd();
        Self {
            year,
            month,
            day,
            day_of_year: date.day_of_year(),
            weekday: date.day_of_week(),
            hour: date.hour(),
            minute: date.minute(),
            second: date.second(),
        }
    }

    fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// Fields collected while scanning, before they are assembled into a date.
#[derive(Debug, Default)]
struct Parsed {
    year: Option<u32>,
    century: Option<u32>,
    short_year: Option<u32>,
    month: Option<u32>,
    day: Option<u32>,
    day_of_year: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    meridiem: Option<HalfDay>,
    weekday: Option<u32>,
    /// First numeric field that fell outside its bounds.
    out_of_range: Option<DateError>,
}

impl Parsed {
    fn resolve(self, options: &ParseOptions) -> Result<DateTime> {
        if let Some(error) = self.out_of_range {
            return Err(error);
        }

        let year = match (self.year, self.century, self.short_year) {
            (Some(year), _, _) => year as i32,
            (None, Some(century), Some(short)) => (century * 100 + short) as i32,
            (None, None, Some(short)) => options.expand_short_year(short),
            (None, Some(century), None) => (century * 100) as i32,
            (None, None, None) => options.default_year,
        };

        let date = match (self.month, self.day, self.day_of_year) {
            (None, None, Some(ordinal)) => DateTime::from_ordinal(year, ordinal)?,
            (month, day, _) => DateTime::from_ymd(year, month.unwrap_or(1), day.unwrap_or(1))?,
        };

        let hour = apply_meridiem(self.hour.unwrap_or(0), self.meridiem);
        date.with_time(hour, self.minute.unwrap_or(0), self.second.unwrap_or(0))
    }
}

/// 12 AM is midnight; PM moves hours below 12 into the afternoon.
fn apply_meridiem(hour: u32, half: Option<HalfDay>) -> u32 {
    match (hour, half) {
        (12, Some(HalfDay::Am)) => 0,
        (h, Some(HalfDay::Pm)) if h < 12 => h + 12,
        (h, _) => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn scan_number_skips_padding_inside_window() {
        assert_eq!(scan_number(" 7", 0, 2, "day").unwrap(), (7, 2));
        assert_eq!(scan_number("7/", 0, 2, "day").unwrap(), (7, 1));
        assert_eq!(scan_number("2005x", 0, 4, "year").unwrap(), (2005, 4));
        assert_eq!(scan_number("1-2", 0, 3, "day of year").unwrap(), (12, 3));
    }

    #[test]
    fn scan_number_without_digits_is_parse_failure() {
        let err = scan_number("ab", 3, 2, "minute").unwrap_err();
        assert_eq!(
            err,
            DateError::ParsingFailure {
                offset: 3,
                message: "expected digits for minute".into()
            }
        );
    }

    #[test]
    fn scan_number_empty_input() {
        assert_eq!(
            scan_number("", 0, 2, "second").unwrap_err().kind(),
            ErrorKind::ParsingFailure
        );
    }

    #[test]
    fn out_of_range_field_wins_over_defaults() {
        let parsed = Parsed {
            month: Some(13),
            out_of_range: Some(DateError::out_of_range("month", 13)),
            ..Parsed::default()
        };
        assert_eq!(
            parsed.resolve(&ParseOptions::default()).unwrap_err(),
            DateError::out_of_range("month", 13)
        );
    }

    #[test]
    fn meridiem_rules() {
        assert_eq!(apply_meridiem(12, Some(HalfDay::Am)), 0);
        assert_eq!(apply_meridiem(12, Some(HalfDay::Pm)), 12);
        assert_eq!(apply_meridiem(8, Some(HalfDay::Pm)), 20);
        assert_eq!(apply_meridiem(8, Some(HalfDay::Am)), 8);
        assert_eq!(apply_meridiem(15, None), 15);
    }

    #[test]
    fn hour12_wraps_midnight_and_noon() {
        let at = |hour| Fields {
            year: 2000,
            month: 1,
            day: 1,
            day_of_year: 1,
            weekday: 6,
            hour,
            minute: 0,
            second: 0,
        };
        assert_eq!(at(0).hour12(), 12);
        assert_eq!(at(12).hour12(), 12);
        assert_eq!(at(13).hour12(), 1);
        assert_eq!(at(23).hour12(), 11);
    }
}
