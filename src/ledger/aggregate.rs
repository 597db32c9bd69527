use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::common::Transactional;
use crate::domain::filter::Interval;
use crate::domain::record::RecordType;

/// Bucket for entries that carry no date.
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// Parallel chart series, one slot per bucket label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntervalSeries {
    pub labels: Vec<String>,
    pub credits: Vec<f64>,
    pub debits: Vec<f64>,
    /// Running total of `credit - debit` across the buckets so far.
    pub nets: Vec<f64>,
}

impl IntervalSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub credits: f64,
    pub debits: f64,
    pub net: f64,
}

pub fn bucket_key(date: Option<NaiveDate>, interval: Interval) -> String {
    let Some(date) = date else {
        return UNKNOWN_BUCKET.to_string();
    };
    let pattern = match interval {
        Interval::Daily => "%Y-%m-%d",
        Interval::Monthly => "%Y-%m",
        Interval::Yearly => "%Y",
    };
    date.format(pattern).to_string()
}

/// Groups entries into buckets and produces series ordered by label.
///
/// Labels sort lexically, which is chronological for the fixed-width keys;
/// `Unknown` sorts after every dated bucket.
pub fn group_by_interval<I, T>(entries: I, interval: Interval) -> IntervalSeries
where
    I: IntoIterator<Item = T>,
    T: Transactional,
{
    let mut buckets: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for entry in entries {
        let slot = buckets
            .entry(bucket_key(entry.effective_date(), interval))
            .or_default();
        match entry.record_type() {
            RecordType::Credit => slot.0 += entry.amount(),
            RecordType::Debit => slot.1 += entry.amount(),
        }
    }

    let mut series = IntervalSeries::default();
    let mut running = 0.0;
    for (label, (credit, debit)) in buckets {
        running += credit - debit;
        series.labels.push(label);
        series.credits.push(credit);
        series.debits.push(debit);
        series.nets.push(running);
    }
    series
}

pub fn totals<I, T>(entries: I) -> Totals
where
    I: IntoIterator<Item = T>,
    T: Transactional,
{
    let mut totals = entries
        .into_iter()
        .fold(Totals::default(), |mut acc, entry| {
            match entry.record_type() {
                RecordType::Credit => acc.credits += entry.amount(),
                RecordType::Debit => acc.debits += entry.amount(),
            }
            acc
        });
    totals.net = totals.credits - totals.debits;
    totals
}

/// Credits add, debits subtract.
pub fn signed_sum<I, T>(entries: I) -> f64
where
    I: IntoIterator<Item = T>,
    T: Transactional,
{
    entries.into_iter().map(|entry| entry.signed_amount()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nets_accumulate_across_buckets() {
        let records = vec![
            Record::credit(100.0, date(2024, 1, 3)),
            Record::debit(50.0, date(2024, 1, 20)),
            Record::credit(200.0, date(2024, 2, 1)),
        ];
        let series = group_by_interval(&records, Interval::Monthly);
        assert_eq!(series.labels, vec!["2024-01", "2024-02"]);
        assert_eq!(series.credits, vec![100.0, 200.0]);
        assert_eq!(series.debits, vec![50.0, 0.0]);
        assert_eq!(series.nets, vec![50.0, 250.0]);
    }

    #[test]
    fn undated_entries_land_in_unknown() {
        let mut undated = Record::debit(7.0, date(2024, 1, 1));
        undated.date = None;
        let records = vec![Record::credit(1.0, date(2023, 5, 5)), undated];
        let series = group_by_interval(&records, Interval::Yearly);
        assert_eq!(series.labels, vec!["2023", UNKNOWN_BUCKET]);
        assert_eq!(series.nets, vec![1.0, -6.0]);
    }

    #[test]
    fn daily_keys_are_full_dates() {
        assert_eq!(bucket_key(Some(date(2024, 3, 9)), Interval::Daily), "2024-03-09");
        assert_eq!(bucket_key(None, Interval::Daily), UNKNOWN_BUCKET);
    }

    #[test]
    fn totals_and_signed_sum_agree() {
        let records = vec![
            Record::credit(120.0, date(2024, 1, 1)),
            Record::debit(20.5, date(2024, 1, 2)),
        ];
        let totals = totals(&records);
        assert_eq!(totals.credits, 120.0);
        assert_eq!(totals.debits, 20.5);
        assert_eq!(totals.net, 99.5);
        assert_eq!(signed_sum(&records), 99.5);
    }
}
