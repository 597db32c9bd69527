use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::record::{IntervalUnit, Recurrence};

/// Step between two occurrences of a recurring record.
///
/// Month and year steps keep the day-of-month and let it overflow into the
/// following month, so Jan 31 + 1 month lands on Mar 3 (Mar 2 in leap years)
/// rather than being clamped to the end of February.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub every: i32,
    pub unit: IntervalUnit,
}

impl TimeInterval {
    pub fn new(every: i32, unit: IntervalUnit) -> Self {
        Self { every, unit }
    }

    /// Returns the date one step after `from`, or `None` when the result
    /// leaves the supported calendar.
    pub fn next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            IntervalUnit::Days => shift_days(from, i64::from(self.every)),
            IntervalUnit::Months => shift_month(from, self.every),
            IntervalUnit::Years => shift_year(from, self.every),
        }
    }

    pub fn label(&self) -> String {
        match (self.every, self.unit) {
            (1, IntervalUnit::Days) => "Daily".into(),
            (1, IntervalUnit::Months) => "Monthly".into(),
            (1, IntervalUnit::Years) => "Yearly".into(),
            (n, unit) => format!("Every {} {:?}", n, unit),
        }
    }
}

impl From<&Recurrence> for TimeInterval {
    fn from(rule: &Recurrence) -> Self {
        Self::new(rule.interval_value, rule.interval_unit)
    }
}

pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Moves `date` by `months` calendar months, rolling an overflowing
/// day-of-month forward into the next month.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(months)?;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day0())))
}

/// Moves `date` by `years`; Feb 29 rolls over to Mar 1 in common years.
pub fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    shift_month(date, years.checked_mul(12)?)
}

/// Applies a date shift to the calendar part of `moment`, keeping its time.
pub fn shift_datetime<F>(moment: NaiveDateTime, shift: F) -> Option<NaiveDateTime>
where
    F: FnOnce(NaiveDate) -> Option<NaiveDate>,
{
    shift(moment.date()).map(|date| date.and_time(moment.time()))
}
