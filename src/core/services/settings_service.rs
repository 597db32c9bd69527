use crate::domain::filter::SavedFilter;
use crate::storage::SettingsStore;

use super::ServiceResult;

/// Prefix of the settings key each page filter is stored under.
pub const FILTER_KEY_PREFIX: &str = "filter_";
pub const DASHBOARD_PAGE: &str = "dashboard";
pub const RECORDS_PAGE: &str = "records";

/// Persists the filter selection of each page.
pub struct SettingsService;

impl SettingsService {
    pub fn filter_key(page: &str) -> String {
        format!("{FILTER_KEY_PREFIX}{page}")
    }

    /// Loads the saved filter for `page`; a page never saved yields the
    /// empty filter.
    pub fn get_filter(store: &dyn SettingsStore, page: &str) -> ServiceResult<SavedFilter> {
        match store.get(&Self::filter_key(page))? {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => Ok(SavedFilter::default()),
        }
    }

    pub fn save_filter(
        store: &dyn SettingsStore,
        page: &str,
        filter: &SavedFilter,
    ) -> ServiceResult<()> {
        let value = serde_json::to_value(filter)?;
        store.set(&Self::filter_key(page), value)?;
        Ok(())
    }
}
