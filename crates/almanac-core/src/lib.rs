//! # almanac-core
//!
//! Proleptic-Gregorian date/time values backed by a linear day/tick timeline,
//! with a `strftime`-style pattern engine for rendering dates as text and
//! parsing text back into dates.
//!
//! Every calendar value is a projection of a [`Timeline`] (whole days since
//! January 1st of year 0 plus milliseconds into the day). Calendar fields are
//! never stored; they are recomputed from the timeline on demand.
//!
//! ## Quick start
//!
//! ```rust
//! use almanac_core::{DateFormatter, DateTime};
//!
//! let formatter = DateFormatter::new("%B-%d-%y %l:%M%p").unwrap();
//! let when = formatter.parse("April-17-06 8:49PM").unwrap();
//! assert_eq!(when, DateTime::from_ymd_hms(2006, 4, 17, 20, 49, 0).unwrap());
//!
//! let start = DateTime::from_ymd(2005, 4, 7).unwrap();
//! let end = DateTime::from_ymd(2005, 4, 17).unwrap();
//! assert_eq!((end - start).days(), 10);
//! ```
//!
//! ## Modules
//!
//! - [`timeline`]: day/tick pairs with carry/borrow arithmetic
//! - [`gregorian`]: calendar projection (`DateTime`) and leap-year helpers
//! - [`duration`]: elapsed spans between two dates
//! - [`record`]: POSIX-style broken-down record exchanged with text renderers
//! - [`names`]: locale name tables, the `TextRenderer` seam, `NameCatalog`
//! - [`pattern`]: format-string compiler
//! - [`formatter`]: `DateFormatter` (format + parse)
//! - [`options`]: parse-time settings (`ParseOptions`)
//! - [`error`]: error types

pub mod duration;
pub mod error;
pub mod formatter;
pub mod gregorian;
pub mod names;
pub mod options;
pub mod pattern;
pub mod record;
pub mod timeline;

pub use duration::Duration;
pub use error::{DateError, ErrorKind, Result};
pub use formatter::DateFormatter;
pub use gregorian::{is_leap_year, DateTime};
pub use names::{ChronoRenderer, HalfDay, Meridiem, NameCatalog, NameKind, NameTable, TextRenderer};
pub use options::ParseOptions;
pub use pattern::{FieldCode, Pattern, Token};
pub use record::CompatRecord;
pub use timeline::Timeline;
