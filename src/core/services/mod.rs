pub mod dashboard_service;
pub mod record_service;
pub mod settings_service;
pub mod widget_service;

pub use dashboard_service::{DashboardService, DashboardSnapshot};
pub use record_service::RecordListService;
pub use settings_service::SettingsService;
pub use widget_service::WidgetService;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Malformed stored value: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}
