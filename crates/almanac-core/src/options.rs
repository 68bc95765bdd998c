//! Parse-time settings.

use serde::{Deserialize, Serialize};

/// Two-digit years below this value land in the 2000s, the rest in the 1900s.
pub const DEFAULT_CENTURY_PIVOT: u32 = 50;

/// Year used when the pattern carries no year field at all.
pub const DEFAULT_YEAR: i32 = 1900;

/// Settings consulted when parsed fields are resolved into a date.
///
/// Missing keys fall back to their defaults when deserialized:
///
/// ```
/// use almanac_core::ParseOptions;
///
/// let options: ParseOptions = serde_json::from_str(r#"{"century_pivot": 70}"#).unwrap();
/// assert_eq!(options.century_pivot, 70);
/// assert_eq!(options.default_year, 1900);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub century_pivot: u32,
    pub default_year: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            century_pivot: DEFAULT_CENTURY_PIVOT,
            default_year: DEFAULT_YEAR,
        }
    }
}

impl ParseOptions {
    /// Expand a two-digit `%y` value into a full year.
    pub fn expand_short_year(&self, short: u32) -> i32 {
        let century = if short < self.century_pivot { 2000 } else { 1900 };
        century + short as i32
    }
}
