use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fintrack_core::core::ProjectionContext;
use fintrack_core::domain::{
    Aggregation, DateFilterConfig, FilterSpec, Interval, IntervalUnit, Record, Recurrence,
    TagMatchMode, Widget,
};
use fintrack_core::ledger::{apply, expand, group_by_interval, widget_value, DateRange};

fn build_sample_records(count: usize) -> Vec<Record> {
    let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 730) as i64);
            let tag = if idx % 2 == 0 { "food" } else { "travel" };
            let base = if idx % 5 == 0 {
                Record::credit(100.0 + (idx % 50) as f64, date)
            } else {
                Record::debit(10.0 + (idx % 100) as f64, date)
            };
            let record = base.with_tags([tag]);
            match idx % 20 {
                0 => record.with_recurrence(Recurrence::monthly()),
                1 => record.with_recurrence(Recurrence::new(7, IntervalUnit::Days)),
                _ => record,
            }
        })
        .collect()
}

fn bench_projection(c: &mut Criterion) {
    let records = build_sample_records(black_box(5_000));
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    c.bench_function("expand_5k_default_window", |b| {
        b.iter(|| {
            let expanded = expand(&records, None, None, today);
            black_box(expanded.len());
        })
    });

    let spec = FilterSpec::default()
        .with_dates(DateFilterConfig::between("2024-01-01", "2024-12-31"))
        .with_tags(["food"], TagMatchMode::Any);
    let now = today.and_hms_opt(12, 0, 0).unwrap();
    let range = DateRange::for_filter(&spec, now);

    c.bench_function("expand_filter_group_5k", |b| {
        b.iter(|| {
            let expanded = expand(&records, range.start_date(), range.end_date(), today);
            let matched = apply(expanded, &spec, range);
            black_box(group_by_interval(&matched, Interval::Monthly));
        })
    });

    let widget = Widget::new("Food this year", Aggregation::Sum, spec.clone());
    let ctx = ProjectionContext::at(now);
    c.bench_function("widget_value_5k", |b| {
        b.iter(|| black_box(widget_value::calculate(&widget, &records, &ctx)))
    });
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
