use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use time::{Date, macros::format_description};

/// An inclusive interval of calendar dates, written `YYYY-MM-DD:YYYY-MM-DD`.
///
/// `start <= end` is not enforced. An inverted range is passed to the store
/// as-is, and what it returns for one is up to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First day of the interval
    pub start: Date,
    /// Last day of the interval
    pub end: Date,
}

/// A date range that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The value is not two tokens joined by `:`
    #[error("must look like `YYYY-MM-DD:YYYY-MM-DD`")]
    Format,
    /// One of the bounds is not a valid calendar date
    #[error("`{0}` is not a valid `YYYY-MM-DD` date")]
    Date(String),
}

impl DateRange {
    /// Whether `date` falls within the interval, bounds included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the start of the interval lies after its end.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// The start bound formatted as `YYYY-MM-DD`.
    pub fn start_string(&self) -> String {
        format_date(self.start)
    }

    /// The end bound formatted as `YYYY-MM-DD`.
    pub fn end_string(&self) -> String {
        format_date(self.end)
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once(':').ok_or(RangeError::Format)?;
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_string(), self.end_string())
    }
}

fn parse_date(token: &str) -> Result<Date, RangeError> {
    Date::parse(token, format_description!("[year]-[month]-[day]"))
        .map_err(|_| RangeError::Date(token.to_owned()))
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
