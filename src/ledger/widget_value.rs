use tracing::debug;

use crate::core::context::ProjectionContext;
use crate::domain::common::Displayable;
use crate::domain::record::Record;
use crate::domain::widget::{Aggregation, Widget};
use crate::ledger::{aggregate, date_range::DateRange, filter, recurring};

/// Computes the scalar a dashboard widget displays.
///
/// `records` should already exclude soft-deleted entries. Recurring records
/// are expanded over the widget's resolved range before filtering, so a
/// monthly bill contributes once per month inside the range.
pub fn calculate(widget: &Widget, records: &[Record], ctx: &ProjectionContext) -> f64 {
    let now = ctx.now();
    let range = DateRange::for_filter(&widget.filter, now);
    let expanded = recurring::expand_with(
        records,
        range.start_date(),
        range.end_date(),
        now.date(),
        ctx.options(),
    );
    let matched = filter::apply(expanded, &widget.filter, range);

    let value = match widget.aggregation {
        Aggregation::Count => matched.len() as f64,
        Aggregation::Sum => aggregate::signed_sum(&matched),
    };
    debug!(
        widget = %widget.display_label(),
        matched = matched.len(),
        value,
        "widget value computed"
    );
    value
}
