//! Pattern compiler: turns a `%`-style format string into tokens once, so
//! every format and parse call walks a ready-made token list.

use tracing::trace;

use crate::error::{DateError, Result};

/// A `%` field code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCode {
    /// `%a`
    AbbrevWeekday,
    /// `%A`
    FullWeekday,
    /// `%b`, `%h`
    AbbrevMonth,
    /// `%B`
    FullMonth,
    /// `%C`
    Century,
    /// `%d`
    Day,
    /// `%e`
    DaySpacePadded,
    /// `%j`
    DayOfYear,
    /// `%H`
    Hour,
    /// `%k`
    HourSpacePadded,
    /// `%I`
    Hour12,
    /// `%l`
    Hour12SpacePadded,
    /// `%m`
    Month,
    /// `%M`
    Minute,
    /// `%p`
    MeridiemUpper,
    /// `%P`
    MeridiemLower,
    /// `%S`
    Second,
    /// `%w`
    Weekday,
    /// `%y`
    ShortYear,
    /// `%Y`
    Year,
}

impl FieldCode {
    pub fn from_char(c: char) -> Option<Self> {
        let code = match c {
            'a' => FieldCode::AbbrevWeekday,
            'A' => FieldCode::FullWeekday,
            'b' | 'h' => FieldCode::AbbrevMonth,
            'B' => FieldCode::FullMonth,
            'C' => FieldCode::Century,
            'd' => FieldCode::Day,
            'e' => FieldCode::DaySpacePadded,
            'j' => FieldCode::DayOfYear,
            'H' => FieldCode::Hour,
            'k' => FieldCode::HourSpacePadded,
            'I' => FieldCode::Hour12,
            'l' => FieldCode::Hour12SpacePadded,
            'm' => FieldCode::Month,
            'M' => FieldCode::Minute,
            'p' => FieldCode::MeridiemUpper,
            'P' => FieldCode::MeridiemLower,
            'S' => FieldCode::Second,
            'w' => FieldCode::Weekday,
            'y' => FieldCode::ShortYear,
            'Y' => FieldCode::Year,
            _ => return None,
        };
        Some(code)
    }

    /// Canonical letter (`%h` compiles to the same code as `%b`).
    pub fn as_char(self) -> char {
        match self {
            FieldCode::AbbrevWeekday => 'a',
            FieldCode::FullWeekday => 'A',
            FieldCode::AbbrevMonth => 'b',
            FieldCode::FullMonth => 'B',
            FieldCode::Century => 'C',
            FieldCode::Day => 'd',
            FieldCode::DaySpacePadded => 'e',
            FieldCode::DayOfYear => 'j',
            FieldCode::Hour => 'H',
            FieldCode::HourSpacePadded => 'k',
            FieldCode::Hour12 => 'I',
            FieldCode::Hour12SpacePadded => 'l',
            FieldCode::Month => 'm',
            FieldCode::Minute => 'M',
            FieldCode::MeridiemUpper => 'p',
            FieldCode::MeridiemLower => 'P',
            FieldCode::Second => 'S',
            FieldCode::Weekday => 'w',
            FieldCode::ShortYear => 'y',
            FieldCode::Year => 'Y',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text matched byte for byte. `%%` contributes a single `%`.
    Literal(String),
    /// One or more whitespace characters; the original run is kept so
    /// formatting reproduces it.
    Whitespace(String),
    Field(FieldCode),
}

/// A compiled format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile `source`.
    ///
    /// # Errors
    ///
    /// `BadFormatElement` for an unknown field letter or a `%` at the very
    /// end of the pattern.
    pub fn compile(source: &str) -> Result<Self> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c == '%' {
                match chars.next() {
                    Some('%') => push_literal(&mut tokens, '%'),
                    Some(letter) => {
                        let code = FieldCode::from_char(letter).ok_or_else(|| {
                            DateError::BadFormatElement(format!("unknown field code '%{letter}'"))
                        })?;
                        tokens.push(Token::Field(code));
                    }
                    None => {
                        return Err(DateError::BadFormatElement(
                            "pattern ends with a lone '%'".to_string(),
                        ))
                    }
                }
            } else if is_pattern_whitespace(c) {
                match tokens.last_mut() {
                    Some(Token::Whitespace(run)) => run.push(c),
                    _ => tokens.push(Token::Whitespace(c.to_string())),
                }
            } else {
                push_literal(&mut tokens, c);
            }
        }

        trace!(pattern = source, tokens = tokens.len(), "compiled pattern");
        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    match tokens.last_mut() {
        Some(Token::Literal(text)) => text.push(c),
        _ => tokens.push(Token::Literal(c.to_string())),
    }
}

fn is_pattern_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
