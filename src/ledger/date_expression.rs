//! Date expressions accepted by date filters.
//!
//! Three forms are understood, compared case-insensitively after trimming:
//! - `now`: the instant the filter is evaluated
//! - `2024-02-16` or `2024/02/16`: an absolute calendar date
//! - `30d`, `30 days ago`, `2w from now`, `1 year`: an offset from now in
//!   days, weeks, months or years; the direction defaults to `ago`

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use crate::ledger::time_interval::{shift_datetime, shift_days, shift_month, shift_year};

static ABSOLUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})[-/]([0-9]{2})[-/]([0-9]{2})$").expect("absolute date pattern is valid")
});

static RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\s*(d|day|w|week|m|month|y|year)s?\s*(ago|from\s+now)?$")
        .expect("relative date pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Day,
    Week,
    Month,
    Year,
}

impl OffsetUnit {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "d" | "day" => Some(OffsetUnit::Day),
            "w" | "week" => Some(OffsetUnit::Week),
            "m" | "month" => Some(OffsetUnit::Month),
            "y" | "year" => Some(OffsetUnit::Year),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            OffsetUnit::Day => 'd',
            OffsetUnit::Week => 'w',
            OffsetUnit::Month => 'm',
            OffsetUnit::Year => 'y',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ago,
    FromNow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeOffset {
    pub amount: u32,
    pub unit: OffsetUnit,
    pub direction: Direction,
}

impl RelativeOffset {
    pub fn ago(amount: u32, unit: OffsetUnit) -> Self {
        Self {
            amount,
            unit,
            direction: Direction::Ago,
        }
    }

    pub fn from_now(amount: u32, unit: OffsetUnit) -> Self {
        Self {
            amount,
            unit,
            direction: Direction::FromNow,
        }
    }

    fn signed_amount(&self) -> i64 {
        match self.direction {
            Direction::Ago => -i64::from(self.amount),
            Direction::FromNow => i64::from(self.amount),
        }
    }

    /// Applies the offset to `now`, keeping the time of day.
    pub fn apply(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let amount = self.signed_amount();
        match self.unit {
            OffsetUnit::Day => shift_datetime(now, |date| shift_days(date, amount)),
            OffsetUnit::Week => {
                let days = amount.checked_mul(7)?;
                shift_datetime(now, |date| shift_days(date, days))
            }
            OffsetUnit::Month => {
                let months = i32::try_from(amount).ok()?;
                shift_datetime(now, |date| shift_month(date, months))
            }
            OffsetUnit::Year => {
                let years = i32::try_from(amount).ok()?;
                shift_datetime(now, |date| shift_year(date, years))
            }
        }
    }
}

/// A parsed, non-empty date expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateExpression {
    Now,
    Absolute(NaiveDate),
    Relative(RelativeOffset),
}

impl DateExpression {
    /// Parses `input`, returning `Ok(None)` for blank input (no bound).
    pub fn parse_optional(input: &str) -> Result<Option<Self>, ParseError> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        input.parse().map(Some)
    }

    /// Resolves the expression against the captured instant `now`. Absolute
    /// dates resolve to local midnight.
    pub fn resolve(&self, now: NaiveDateTime) -> Result<NaiveDateTime, ParseError> {
        match self {
            DateExpression::Now => Ok(now),
            DateExpression::Absolute(date) => Ok(date.and_time(NaiveTime::MIN)),
            DateExpression::Relative(offset) => offset
                .apply(now)
                .ok_or_else(|| ParseError::OutOfRange(self.to_string())),
        }
    }
}

impl FromStr for DateExpression {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();

        if normalized == "now" {
            return Ok(DateExpression::Now);
        }

        if let Some(caps) = ABSOLUTE.captures(&normalized) {
            let field = |idx: usize| caps[idx].parse::<u32>().ok();
            let date = match (caps[1].parse::<i32>().ok(), field(2), field(3)) {
                (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
                _ => None,
            };
            return date
                .map(DateExpression::Absolute)
                .ok_or_else(|| ParseError::InvalidDate(input.trim().to_string()));
        }

        if let Some(caps) = RELATIVE.captures(&normalized) {
            let amount = caps[1]
                .parse::<u32>()
                .map_err(|_| ParseError::OutOfRange(input.trim().to_string()))?;
            let unit = OffsetUnit::from_token(&caps[2])
                .ok_or_else(|| ParseError::InvalidFormat(input.to_string()))?;
            let direction = match caps.get(3) {
                Some(token) if token.as_str().starts_with("from") => Direction::FromNow,
                _ => Direction::Ago,
            };
            return Ok(DateExpression::Relative(RelativeOffset {
                amount,
                unit,
                direction,
            }));
        }

        Err(ParseError::InvalidFormat(input.to_string()))
    }
}

impl fmt::Display for DateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateExpression::Now => f.write_str("now"),
            DateExpression::Absolute(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateExpression::Relative(offset) => {
                let direction = match offset.direction {
                    Direction::Ago => "ago",
                    Direction::FromNow => "from now",
                };
                write!(f, "{}{} {}", offset.amount, offset.unit.letter(), direction)
            }
        }
    }
}

/// Parses one date expression against `now`.
///
/// Blank input yields `Ok(None)`; anything outside the grammar is a
/// [`ParseError`].
pub fn parse(input: &str, now: NaiveDateTime) -> Result<Option<NaiveDateTime>, ParseError> {
    DateExpression::parse_optional(input)?
        .map(|expr| expr.resolve(now))
        .transpose()
}
