//! WASM bindings for almanac-core.
//!
//! Exposes pattern formatting, pattern parsing and date differences to
//! JavaScript via `wasm-bindgen`. Instants cross the boundary as
//! `YYYY-MM-DDTHH:MM:SS` strings; structured results are JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p almanac-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/almanac-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/almanac_wasm.wasm
//! ```

use almanac_core::{DateFormatter, DateTime, Duration, ParseOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DateFieldsDto {
    iso: String,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    day_of_year: u32,
    day_of_week: u32,
    leap_year: bool,
}

impl From<&DateTime> for DateFieldsDto {
    fn from(date: &DateTime) -> Self {
        let (year, month, day) = date.ymd();
        Self {
            iso: date.to_iso_string(),
            year,
            month,
            day,
            hour: date.hour(),
            minute: date.minute(),
            second: date.second(),
            day_of_year: date.day_of_year(),
            day_of_week: date.day_of_week(),
            leap_year: date.is_leap_year(),
        }
    }
}

#[derive(Serialize)]
struct DurationDto {
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    subseconds: i64,
}

impl From<Duration> for DurationDto {
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

// ---------------------------------------------------------------------------
// Boundary-free implementations (testable on native targets)
// ---------------------------------------------------------------------------

fn parse_instant(text: &str) -> Result<DateTime, String> {
    text.parse::<DateTime>()
        .map_err(|e| format!("Invalid datetime '{}': {}", text, e))
}

fn format_impl(pattern: &str, at: &str) -> Result<String, String> {
    let formatter = DateFormatter::new(pattern).map_err(|e| e.to_string())?;
    Ok(formatter.format(&parse_instant(at)?))
}

fn parse_impl(pattern: &str, text: &str, century_pivot: Option<u32>) -> Result<String, String> {
    let mut options = ParseOptions::default();
    if let Some(pivot) = century_pivot {
        options.century_pivot = pivot;
    }
    let formatter = DateFormatter::new(pattern)
        .map_err(|e| e.to_string())?
        .with_options(options);
    let date = formatter.parse(text).map_err(|e| e.to_string())?;
    serde_json::to_string(&DateFieldsDto::from(&date))
        .map_err(|e| format!("Serialization error: {}", e))
}

fn duration_between_impl(from: &str, to: &str) -> Result<String, String> {
    let span = parse_instant(to)? - parse_instant(from)?;
    serde_json::to_string(&DurationDto::from(span))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Render `at` (`YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`) through `pattern`.
#[wasm_bindgen]
pub fn format(pattern: &str, at: &str) -> Result<String, JsValue> {
    format_impl(pattern, at).map_err(|e| JsValue::from_str(&e))
}

/// Parse `text` against `pattern`.
///
/// Returns a JSON object with `iso`, `year`, `month`, `day`, `hour`,
/// `minute`, `second`, `dayOfYear`, `dayOfWeek` (0 = Sunday) and `leapYear`.
#[wasm_bindgen]
pub fn parse(pattern: &str, text: &str, century_pivot: Option<u32>) -> Result<String, JsValue> {
    parse_impl(pattern, text, century_pivot).map_err(|e| JsValue::from_str(&e))
}

/// Elapsed time from `from` to `to`, as a JSON object of whole units.
#[wasm_bindgen(js_name = "durationBetween")]
pub fn duration_between(from: &str, to: &str) -> Result<String, JsValue> {
    duration_between_impl(from, to).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "isLeapYear")]
pub fn is_leap_year(year: i32) -> bool {
    almanac_core::is_leap_year(year)
}
