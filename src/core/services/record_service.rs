use crate::core::context::ProjectionContext;
use crate::domain::filter::SavedFilter;
use crate::domain::record::Record;
use crate::ledger::{date_range::DateRange, filter};
use crate::storage::RecordStore;

use super::ServiceResult;

/// Backs the records page: stored records only, never projections.
pub struct RecordListService;

impl RecordListService {
    /// Fetches records (soft-deleted ones when the filter asks for them),
    /// filters them and sorts by the saved field and order, newest first by
    /// default.
    pub fn list(
        records: &dyn RecordStore,
        saved: &SavedFilter,
        ctx: &ProjectionContext,
    ) -> ServiceResult<Vec<Record>> {
        let all = records.get_all(saved.include_deleted)?;
        let range = DateRange::for_filter(&saved.filter, ctx.now());
        let mut listed = filter::apply(all, &saved.filter, range);
        filter::sort_records(
            &mut listed,
            saved.sort_field.unwrap_or_default(),
            saved.sort_order.unwrap_or_default(),
        );
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{FilterSpec, SortField, SortOrder};
    use crate::domain::record::Recurrence;
    use crate::storage::InMemoryRecordStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store
            .add(Record::debit(40.0, date(2024, 2, 3)).with_description("Groceries"))
            .unwrap();
        store
            .add(
                Record::debit(900.0, date(2024, 1, 1))
                    .with_description("Rent")
                    .with_recurrence(Recurrence::monthly()),
            )
            .unwrap();
        let gone = store
            .add(Record::credit(5.0, date(2024, 3, 1)).with_description("Refund"))
            .unwrap();
        store.remove(&gone.id).unwrap();
        store
    }

    fn ctx() -> ProjectionContext {
        ProjectionContext::at(date(2024, 6, 1).and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn lists_stored_records_newest_first() {
        let listed = RecordListService::list(&store(), &SavedFilter::default(), &ctx()).unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Rent"]);
    }

    #[test]
    fn include_deleted_and_sort_are_honoured() {
        let mut saved = SavedFilter::new(FilterSpec::default().with_search("r"))
            .with_sort(SortField::Amount, SortOrder::Asc);
        saved.include_deleted = true;
        let listed = RecordListService::list(&store(), &saved, &ctx()).unwrap();
        let amounts: Vec<f64> = listed.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![5.0, 40.0, 900.0]);
    }
}
