//! Projection and filtering engine: date expressions, ranges, recurrence
//! expansion, record predicates and interval aggregation.

pub mod aggregate;
pub mod date_expression;
pub mod date_range;
pub mod filter;
pub mod recurring;
pub mod time_interval;
pub mod widget_value;

pub use aggregate::{group_by_interval, totals, IntervalSeries, Totals, UNKNOWN_BUCKET};
pub use date_expression::{DateExpression, Direction, OffsetUnit, RelativeOffset};
pub use date_range::{filter_by_date_range, format_date, in_range, resolve_range, DateRange};
pub use filter::{apply, sort_records, RecordFilter};
pub use recurring::{
    expand, expand_with, ExpansionWindow, ProjectionOptions, MAX_EXPANSION_ITERATIONS,
};
pub use time_interval::TimeInterval;
