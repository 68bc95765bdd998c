//! Error types for calendar construction, formatting, and parsing.

use thiserror::Error;

/// Errors that can occur while building, formatting, or parsing a date.
///
/// The three variants separate programmer errors (a bad pattern) from data
/// errors (text that does not fit the pattern) and from values that fall
/// outside the calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// A year, month, day, hour, minute, or second is outside its valid domain.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    /// The input text does not satisfy a literal, whitespace, numeric, or
    /// AM/PM element of the pattern. `offset` is the byte offset into the
    /// input where the mismatch was detected.
    #[error("parse failure at offset {offset}: {message}")]
    ParsingFailure { offset: usize, message: String },

    /// The pattern contains an unrecognized field code, or a textual token
    /// matched no entry in the locale's name table.
    #[error("bad format element: {0}")]
    BadFormatElement(String),
}

/// Fieldless category of a [`DateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    ParsingFailure,
    BadFormatElement,
}

impl DateError {
    pub(crate) fn out_of_range(field: &'static str, value: impl Into<i64>) -> Self {
        DateError::OutOfRange {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn parsing(offset: usize, message: impl Into<String>) -> Self {
        DateError::ParsingFailure {
            offset,
            message: message.into(),
        }
    }

    /// The category of this error, for callers that only need to branch.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DateError::OutOfRange { .. } => ErrorKind::OutOfRange,
            DateError::ParsingFailure { .. } => ErrorKind::ParsingFailure,
            DateError::BadFormatElement(_) => ErrorKind::BadFormatElement,
        }
    }
}

/// Convenience alias used throughout almanac-core.
pub type Result<T> = std::result::Result<T, DateError>;
