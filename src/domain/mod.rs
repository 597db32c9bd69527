//! Persisted shapes consumed by the projection engine: records, saved filters
//! and dashboard widgets.

pub mod common;
pub mod filter;
pub mod record;
mod serde_helpers;
pub mod widget;

pub use common::{
    position_of, DateField, DatedEntity, Displayable, EntityId, Identifiable, Transactional,
};
pub use filter::{
    AmountOp, DateFilterConfig, FilterSpec, Interval, SavedFilter, SortField, SortOrder,
    TagMatchMode,
};
pub use record::{IntervalUnit, Record, RecordEntry, RecordType, Recurrence};
pub use widget::{Aggregation, Widget};
