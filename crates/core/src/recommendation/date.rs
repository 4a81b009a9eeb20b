//! Normalization of the request `date` field into a forecast day offset.
//!
//! Callers send either a keyword (`"today"`, `"tomorrow"`) or a day number in
//! `1..=14`, as a JSON integer or as a string holding one. Both shapes land in
//! [`DateInput`] and resolve to a [`DayOffset`] through the same path.

use std::fmt;

use serde_json::Value;

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateKeyword {
    Today,
    Tomorrow,
}

impl DateKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }
}

/// 1-based index into the provider's per-day forecast, where 1 is today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOffset(u8);

impl DayOffset {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 14;
    pub const TODAY: Self = Self(1);
    pub const TOMORROW: Self = Self(2);

    pub fn new(value: i64) -> Option<Self> {
        let bounds = i64::from(Self::MIN)..=i64::from(Self::MAX);
        bounds.contains(&value).then(|| Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Position of this day in a zero-based forecast sequence.
    pub fn forecast_index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for DayOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateInput {
    Keyword(DateKeyword),
    NumericOffset(DayOffset),
}

impl Default for DateInput {
    fn default() -> Self {
        Self::Keyword(DateKeyword::Today)
    }
}

impl DateInput {
    /// Parses the raw `date` value. Absent and `null` both mean today.
    pub fn parse(raw: Option<&Value>) -> Result<Self, DomainError> {
        match raw {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::String(text)) => Self::parse_text(text),
            Some(Value::Number(number)) => {
                let whole = number.as_i64().or_else(|| {
                    number.as_f64().filter(|value| value.fract() == 0.0).map(|value| value as i64)
                });
                whole.ok_or(DomainError::InvalidDate).and_then(Self::from_number)
            }
            Some(_) => Err(DomainError::InvalidDate),
        }
    }

    fn parse_text(text: &str) -> Result<Self, DomainError> {
        match text {
            "today" => Ok(Self::Keyword(DateKeyword::Today)),
            "tomorrow" => Ok(Self::Keyword(DateKeyword::Tomorrow)),
            other => other
                .trim()
                .parse::<i64>()
                .map_err(|_| DomainError::InvalidDate)
                .and_then(Self::from_number),
        }
    }

    fn from_number(value: i64) -> Result<Self, DomainError> {
        DayOffset::new(value).map(Self::NumericOffset).ok_or(DomainError::InvalidDate)
    }

    pub fn day_offset(&self) -> DayOffset {
        match self {
            Self::Keyword(DateKeyword::Today) => DayOffset::TODAY,
            Self::Keyword(DateKeyword::Tomorrow) => DayOffset::TOMORROW,
            Self::NumericOffset(offset) => *offset,
        }
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => f.write_str(keyword.as_str()),
            Self::NumericOffset(offset) => write!(f, "{offset}"),
        }
    }
}

/// Resolves a raw `date` value to the day offset sent to the forecast provider.
pub fn normalize(raw: Option<&Value>) -> Result<DayOffset, DomainError> {
    DateInput::parse(raw).map(|input| input.day_offset())
}
