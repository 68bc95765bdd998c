//! # almanac-python
//!
//! Python bindings for almanac-core, built with PyO3.
//!
//! Exposes the following functions to Python as the `_native` module:
//!
//! - `format(pattern, at)` -- render an ISO instant through a pattern
//! - `parse(pattern, text, century_pivot=None)` -- parse text -> JSON of fields
//! - `duration_between(start, end)` -- JSON of whole units between two instants
//! - `is_leap_year(year)`

use almanac_core::{DateFormatter, DateTime, ParseOptions};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn parse_instant(text: &str) -> PyResult<DateTime> {
    text.parse::<DateTime>()
        .map_err(|e| PyValueError::new_err(format!("Invalid datetime '{}': {}", text, e)))
}

/// Render an instant through a pattern.
///
/// Args:
///     pattern: Pattern such as "%A, %B %d, %Y".
///     at: Instant as "YYYY-MM-DDTHH:MM:SS" or "YYYY-MM-DD".
///
/// Returns:
///     The rendered text.
///
/// Raises:
///     ValueError: If the pattern or the instant is invalid.
#[pyfunction]
fn format(pattern: &str, at: &str) -> PyResult<String> {
    let formatter = DateFormatter::new(pattern).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(formatter.format(&parse_instant(at)?))
}

/// Parse text against a pattern.
///
/// Args:
///     pattern: Pattern such as "%B-%d-%y %l:%M%p".
///     text: The text to parse.
///     century_pivot: Two-digit years below this value are read as 20xx.
///
/// Returns:
///     A JSON string with `iso` (`YYYY-MM-DDTHH:MM:SS`), `year`, `month`,
///     `day`, `hour`, `minute`, `second`, `day_of_year`, `day_of_week` and
///     `leap_year`.
///
/// Raises:
///     ValueError: If the pattern is invalid or the text does not match it.
#[pyfunction]
#[pyo3(signature = (pattern, text, century_pivot=None))]
fn parse(pattern: &str, text: &str, century_pivot: Option<u32>) -> PyResult<String> {
    let mut options = ParseOptions::default();
    if let Some(pivot) = century_pivot {
        options.century_pivot = pivot;
    }
    let date = DateFormatter::new(pattern)
        .and_then(|f| f.with_options(options).parse(text))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let (year, month, day) = date.ymd();
    let fields = serde_json::json!({
        "iso": date.to_iso_string(),
        "year": year,
        "month": month,
        "day": day,
        "hour": date.hour(),
        "minute": date.minute(),
        "second": date.second(),
        "day_of_year": date.day_of_year(),
        "day_of_week": date.day_of_week(),
        "leap_year": date.is_leap_year(),
    });
    serde_json::to_string(&fields).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Elapsed time between two instants.
///
/// Args:
///     start: Instant as "YYYY-MM-DDTHH:MM:SS" or "YYYY-MM-DD".
///     end: Instant in the same form.
///
/// Returns:
///     A JSON string with `weeks`, `days`, `hours`, `minutes`, `seconds` and
///     `subseconds`, truncated toward zero.
///
/// Raises:
///     ValueError: If either instant is invalid.
#[pyfunction]
fn duration_between(start: &str, end: &str) -> PyResult<String> {
    let span = parse_instant(end)? - parse_instant(start)?;
    let units = serde_json::json!({
        "weeks": span.weeks(),
        "days": span.days(),
        "hours": span.hours(),
        "minutes": span.minutes(),
        "seconds": span.seconds(),
        "subseconds": span.subseconds(),
    });
    serde_json::to_string(&units).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Whether `year` is a leap year (year 0 is not).
#[pyfunction]
fn is_leap_year(year: i32) -> bool {
    almanac_core::is_leap_year(year)
}

/// The `_native` Python module, implemented in Rust via PyO3.
#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(format, m)?)?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(duration_between, m)?)?;
    m.add_function(wrap_pyfunction!(is_leap_year, m)?)?;
    Ok(())
}

