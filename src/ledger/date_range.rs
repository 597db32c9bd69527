use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::domain::common::{DateField, DatedEntity};
use crate::domain::filter::{DateFilterConfig, FilterSpec};
use crate::ledger::date_expression;

/// Resolved inclusive date bounds; a missing side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Range between two calendar dates, both inclusive.
    pub fn between_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(midnight(start)), Some(midnight(end)))
    }

    /// Resolves the range a filter selects: its `dateFilter` when present,
    /// otherwise the legacy `from` / `to` dates.
    pub fn for_filter(spec: &FilterSpec, now: NaiveDateTime) -> Self {
        match &spec.date_filter {
            Some(config) => resolve_range(config, now),
            None => Self::new(spec.from.map(midnight), spec.to.map(midnight)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.map(|start| start.date())
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|end| end.date())
    }

    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        in_range(date, self.start, self.end)
    }

    /// Human-readable summary: `A to B`, `From A`, `Until B`, or empty.
    pub fn label(&self) -> String {
        let start = format_date(self.start);
        let end = format_date(self.end);
        match (start.is_empty(), end.is_empty()) {
            (false, false) => format!("{start} to {end}"),
            (false, true) => format!("From {start}"),
            (true, false) => format!("Until {end}"),
            (true, true) => String::new(),
        }
    }
}

/// Resolves both sides of `config` against the same instant.
///
/// A side that fails to parse is logged and left unbounded; it never fails
/// the whole range.
pub fn resolve_range(config: &DateFilterConfig, now: NaiveDateTime) -> DateRange {
    DateRange {
        start: resolve_side("start", config.start_date.as_deref(), now),
        end: resolve_side("end", config.end_date.as_deref(), now),
    }
}

fn resolve_side(side: &str, raw: Option<&str>, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let raw = raw?;
    match date_expression::parse(raw, now) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(side, input = raw, error = %err, "ignoring invalid date filter bound");
            None
        }
    }
}

/// Inclusive membership test at day granularity.
///
/// `date` is taken at midnight, the lower bound is normalized to midnight and
/// the upper bound to 23:59:59.999 of its day. A missing `date` never matches,
/// whatever the bounds.
pub fn in_range(
    date: Option<NaiveDate>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> bool {
    let Some(date) = date else {
        return false;
    };
    let moment = midnight(date);

    if let Some(start) = start {
        if moment < midnight(start.date()) {
            return false;
        }
    }

    if let Some(end) = end {
        if moment > end_of_day(end.date()) {
            return false;
        }
    }

    true
}

/// Keeps the items whose `field` date falls in `range`. With no bounds the
/// input is returned as is, including items without that date.
pub fn filter_by_date_range<'a, T: DatedEntity>(
    items: &'a [T],
    field: DateField,
    range: &DateRange,
) -> Vec<&'a T> {
    if range.is_unbounded() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| range.contains(item.date_for(field)))
        .collect()
}

/// ISO `YYYY-MM-DD`, or an empty string when there is no date.
pub fn format_date(moment: Option<NaiveDateTime>) -> String {
    moment
        .map(|moment| moment.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_milli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn bounds_are_inclusive_at_day_granularity() {
        let start = Some(at(2024, 3, 1, 18));
        let end = Some(at(2024, 3, 31, 6));
        assert!(in_range(Some(date(2024, 3, 1)), start, end));
        assert!(in_range(Some(date(2024, 3, 31)), start, end));
        assert!(!in_range(Some(date(2024, 2, 29)), start, end));
        assert!(!in_range(Some(date(2024, 4, 1)), start, end));
    }

    #[test]
    fn missing_date_never_matches() {
        assert!(!in_range(None, None, None));
        assert!(in_range(Some(date(1999, 1, 1)), None, None));
    }

    #[test]
    fn one_bad_side_leaves_the_other() {
        let now = at(2024, 6, 15, 9);
        let config = DateFilterConfig::between("not a date", "now");
        let range = resolve_range(&config, now);
        assert_eq!(range.start, None);
        assert_eq!(range.end, Some(now));
    }

    #[test]
    fn legacy_dates_apply_without_date_filter() {
        let spec = FilterSpec {
            from: Some(date(2024, 1, 1)),
            ..FilterSpec::default()
        };
        let range = DateRange::for_filter(&spec, at(2024, 6, 1, 0));
        assert_eq!(range.start_date(), Some(date(2024, 1, 1)));
        assert_eq!(range.end, None);
    }

    #[test]
    fn labels() {
        let both = DateRange::between_dates(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(both.label(), "2024-01-01 to 2024-01-31");
        assert_eq!(DateRange::new(both.start, None).label(), "From 2024-01-01");
        assert_eq!(DateRange::new(None, both.end).label(), "Until 2024-01-31");
        assert_eq!(DateRange::unbounded().label(), "");
    }
}
