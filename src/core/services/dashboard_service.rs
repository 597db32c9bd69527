use serde::Serialize;

use crate::core::context::ProjectionContext;
use crate::domain::filter::{Interval, SavedFilter};
use crate::domain::record::Record;
use crate::ledger::aggregate::{self, IntervalSeries, Totals};
use crate::ledger::{date_range::DateRange, filter, recurring};
use crate::storage::{RecordStore, SettingsStore};

use super::settings_service::{SettingsService, DASHBOARD_PAGE};
use super::ServiceResult;

/// Everything the dashboard renders for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// `A to B` style description of the resolved range.
    pub range_label: String,
    pub interval: Interval,
    pub totals: Totals,
    pub series: IntervalSeries,
    pub entries: usize,
    #[serde(skip)]
    pub range: DateRange,
}

pub struct DashboardService;

impl DashboardService {
    /// Loads the dashboard's saved filter and projects the active records
    /// through it.
    pub fn refresh(
        records: &dyn RecordStore,
        settings: &dyn SettingsStore,
        ctx: &ProjectionContext,
    ) -> ServiceResult<DashboardSnapshot> {
        let saved = SettingsService::get_filter(settings, DASHBOARD_PAGE)?;
        let active = records.get_all(false)?;
        Ok(Self::project(&active, &saved, ctx))
    }

    /// Expands, filters and aggregates `records` for `saved`.
    pub fn project(
        records: &[Record],
        saved: &SavedFilter,
        ctx: &ProjectionContext,
    ) -> DashboardSnapshot {
        let now = ctx.now();
        let range = DateRange::for_filter(&saved.filter, now);
        let interval = saved.interval.unwrap_or(ctx.default_interval());

        let expanded = recurring::expand_with(
            records,
            range.start_date(),
            range.end_date(),
            now.date(),
            ctx.options(),
        );
        let matched = filter::apply(expanded, &saved.filter, range);

        DashboardSnapshot {
            range_label: range.label(),
            interval,
            totals: aggregate::totals(&matched),
            series: aggregate::group_by_interval(&matched, interval),
            entries: matched.len(),
            range,
        }
    }
}
