use std::borrow::Borrow;
use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::common::Transactional;
use crate::domain::filter::{AmountOp, FilterSpec, SortField, SortOrder, TagMatchMode};
use crate::domain::record::Record;
use crate::ledger::date_range::DateRange;

/// A [`FilterSpec`] prepared for repeated evaluation: tags and search text
/// are lowercased once instead of per record.
#[derive(Debug, Clone)]
pub struct RecordFilter<'s> {
    spec: &'s FilterSpec,
    range: DateRange,
    tags: Vec<String>,
    search: Option<String>,
}

impl<'s> RecordFilter<'s> {
    pub fn new(spec: &'s FilterSpec, range: DateRange) -> Self {
        let tags = spec.tags.iter().map(|tag| tag.to_lowercase()).collect();
        let search = spec
            .search
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());
        Self {
            spec,
            range,
            tags,
            search,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// All predicates ANDed; absent fields impose nothing. An entry without a
    /// date is always rejected.
    pub fn matches<T: Transactional>(&self, entry: &T) -> bool {
        self.range.contains(entry.effective_date())
            && self.matches_type(entry)
            && self.matches_tags(entry)
            && self.matches_amount(entry.amount())
            && self.matches_search(entry)
    }

    fn matches_type<T: Transactional>(&self, entry: &T) -> bool {
        self.spec
            .record_type
            .map_or(true, |wanted| entry.record_type() == wanted)
    }

    fn matches_tags<T: Transactional>(&self, entry: &T) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        let own: Vec<String> = entry.tags().iter().map(|tag| tag.to_lowercase()).collect();
        let has = |tag: &String| own.contains(tag);
        match self.spec.tag_mode() {
            TagMatchMode::All => self.tags.iter().all(has),
            TagMatchMode::Any => self.tags.iter().any(has),
        }
    }

    /// Missing comparison values count as 0, so `between` without an upper
    /// bound only admits zero amounts.
    #[allow(clippy::float_cmp)]
    fn matches_amount(&self, amount: f64) -> bool {
        let Some(op) = self.spec.amount_op else {
            return true;
        };
        let value = self.spec.amount_value.unwrap_or(0.0);
        match op {
            AmountOp::Eq => amount == value,
            AmountOp::Lt => amount < value,
            AmountOp::Lte => amount <= value,
            AmountOp::Gt => amount > value,
            AmountOp::Gte => amount >= value,
            AmountOp::Between => {
                let upper = self.spec.amount_value2.unwrap_or(0.0);
                amount >= value && amount <= upper
            }
        }
    }

    fn matches_search<T: Transactional>(&self, entry: &T) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        let haystack = format!(
            "{} {} {}",
            entry.description(),
            entry.record_type(),
            entry.tags().join(" ")
        )
        .to_lowercase();
        haystack.contains(needle.as_str())
    }
}

/// Keeps the entries matching `spec` within `range`, preserving input order.
pub fn apply<I, T>(entries: I, spec: &FilterSpec, range: DateRange) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Transactional,
{
    let filter = RecordFilter::new(spec, range);
    entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect()
}

/// Stable sort of records on one field. Missing values sort as the smallest.
pub fn sort_records<R: Borrow<Record>>(records: &mut [R], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a.borrow(), b.borrow(), field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
        SortField::Type => a.record_type.as_str().cmp(b.record_type.as_str()),
        SortField::StartDate => rule_start(a).cmp(&rule_start(b)),
        SortField::EndDate => rule_end(a).cmp(&rule_end(b)),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::ModifiedAt => a.modified_at.cmp(&b.modified_at),
    }
}

fn rule_start(record: &Record) -> Option<NaiveDate> {
    record.recurring.as_ref().and_then(|rule| rule.start_date)
}

fn rule_end(record: &Record) -> Option<NaiveDate> {
    record.recurring.as_ref().and_then(|rule| rule.end_date)
}
