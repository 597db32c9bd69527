use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::common::Displayable;
use crate::domain::record::{Record, RecordEntry, Recurrence};
use crate::ledger::time_interval::TimeInterval;

/// Upper bound on stepping iterations per recurring record.
pub const MAX_EXPANSION_ITERATIONS: usize = 1000;
/// Years past the current one covered when no end date is requested.
pub const DEFAULT_LOOKAHEAD_YEARS: i32 = 1;

/// Limits applied while expanding recurring records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    pub max_iterations: usize,
    pub lookahead_years: i32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            max_iterations: MAX_EXPANSION_ITERATIONS,
            lookahead_years: DEFAULT_LOOKAHEAD_YEARS,
        }
    }
}

/// Inclusive window in which projected occurrences are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ExpansionWindow {
    /// Fills in the defaults for missing bounds: 1970-01-01 for the start and
    /// December 31 of `today`'s year plus the lookahead for the end.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
        options: &ProjectionOptions,
    ) -> Self {
        let start = from.unwrap_or(NaiveDateTime::UNIX_EPOCH.date());
        let end = to.unwrap_or_else(|| {
            today
                .year()
                .checked_add(options.lookahead_years)
                .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
                .unwrap_or(NaiveDate::MAX)
        });
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Expands recurring records into projected occurrences with the default
/// limits. See [`expand_with`].
pub fn expand<'a>(
    records: &'a [Record],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<RecordEntry<'a>> {
    expand_with(records, from, to, today, &ProjectionOptions::default())
}

/// Replaces every record with an enabled recurrence by its occurrences inside
/// the window; every other record passes through exactly once, untouched.
pub fn expand_with<'a>(
    records: &'a [Record],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
    options: &ProjectionOptions,
) -> Vec<RecordEntry<'a>> {
    let window = ExpansionWindow::resolve(from, to, today, options);
    let mut expanded = Vec::with_capacity(records.len());

    for record in records {
        match record.active_recurrence() {
            None => expanded.push(RecordEntry::Stored(record)),
            Some(rule) => {
                let dates = occurrence_dates(record, rule, window, options.max_iterations);
                expanded.extend(
                    dates
                        .into_iter()
                        .map(|date| RecordEntry::Projected { source: record, date }),
                );
            }
        }
    }

    expanded
}

/// Walks the recurrence from its start date and collects the dates that fall
/// inside `window`.
///
/// The walk stops past the earlier of the rule's end date and the window end,
/// or after `max_iterations` steps whether or not they emitted. A zero or
/// negative interval never passes the stop date and is bounded only by the
/// iteration cap.
pub fn occurrence_dates(
    record: &Record,
    rule: &Recurrence,
    window: ExpansionWindow,
    max_iterations: usize,
) -> Vec<NaiveDate> {
    let Some(start) = rule.start_date.or(record.date) else {
        debug!(record_id = %record.id, "recurring record has no start date");
        return Vec::new();
    };
    let stop = match rule.end_date {
        Some(end) if end < window.end => end,
        _ => window.end,
    };
    let interval = TimeInterval::from(rule);

    let mut dates = Vec::new();
    let mut current = start;
    let mut iterations = 0usize;

    while current <= stop && iterations < max_iterations {
        if window.contains(current) {
            dates.push(current);
        }
        iterations += 1;
        match interval.next_date(current) {
            Some(next) => current = next,
            None => break,
        }
    }

    if iterations >= max_iterations {
        debug!(
            record_id = %record.id,
            record = %record.display_label(),
            interval = %interval.label(),
            emitted = dates.len(),
            "recurrence expansion stopped at iteration cap"
        );
    }

    dates
}
