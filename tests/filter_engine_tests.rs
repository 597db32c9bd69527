mod common;

use common::{date, expense, income, now, salary};
use fintrack_core::domain::{
    AmountOp, DateFilterConfig, FilterSpec, Interval, Record, RecordType, SavedFilter,
    TagMatchMode,
};
use fintrack_core::ledger::{apply, expand, group_by_interval, totals, DateRange};

fn ledger() -> Vec<Record> {
    vec![
        expense(15.0, date(2024, 5, 2), "Lunch", &["Food"]),
        expense(25.0, date(2024, 5, 9), "Tapas", &["food", "Dining"]),
        expense(60.0, date(2024, 5, 20), "Fuel", &["Car"]),
        income(300.0, date(2024, 5, 28), "Freelance"),
    ]
}

fn descriptions(entries: &[&Record]) -> Vec<String> {
    entries.iter().map(|r| r.description.clone()).collect()
}

#[test]
fn all_mode_requires_every_tag() {
    let records = ledger();
    let spec = FilterSpec::default().with_tags(["food", "dining"], TagMatchMode::All);
    let matched = apply(&records, &spec, DateRange::unbounded());
    assert_eq!(descriptions(&matched), vec!["Tapas"]);

    let spec = FilterSpec::default().with_tags(["food", "dining"], TagMatchMode::Any);
    let matched = apply(&records, &spec, DateRange::unbounded());
    assert_eq!(descriptions(&matched), vec!["Lunch", "Tapas"]);
}

#[test]
fn between_bounds_are_inclusive() {
    let records = vec![
        income(15.0, date(2024, 1, 1), "inside"),
        income(25.0, date(2024, 1, 1), "outside"),
        income(20.0, date(2024, 1, 1), "edge"),
    ];
    let spec = FilterSpec::default().with_amount_between(10.0, 20.0);
    let matched = apply(&records, &spec, DateRange::unbounded());
    assert_eq!(descriptions(&matched), vec!["inside", "edge"]);
}

#[test]
fn between_without_upper_value_excludes_positive_amounts() {
    let records = ledger();
    let spec = FilterSpec {
        amount_op: Some(AmountOp::Between),
        amount_value: Some(10.0),
        ..FilterSpec::default()
    };
    assert!(apply(&records, &spec, DateRange::unbounded()).is_empty());
}

#[test]
fn comparison_operators() {
    let records = ledger();
    let count = |op, value| {
        let spec = FilterSpec::default().with_amount(op, value);
        apply(&records, &spec, DateRange::unbounded()).len()
    };
    assert_eq!(count(AmountOp::Eq, 25.0), 1);
    assert_eq!(count(AmountOp::Lt, 25.0), 1);
    assert_eq!(count(AmountOp::Lte, 25.0), 2);
    assert_eq!(count(AmountOp::Gt, 60.0), 1);
    assert_eq!(count(AmountOp::Gte, 60.0), 2);
}

#[test]
fn legacy_saved_filter_still_applies() {
    let json = r#"{
        "from": "2024-05-05",
        "to": "2024-05-31",
        "type": "Debit",
        "amtOp": "gte",
        "amtVal": "20",
        "tags": [],
        "tagOp": ""
    }"#;
    let saved: SavedFilter = serde_json::from_str(json).expect("legacy filter");
    let records = ledger();
    let range = DateRange::for_filter(&saved.filter, now());
    let matched = apply(&records, &saved.filter, range);
    assert_eq!(descriptions(&matched), vec!["Tapas", "Fuel"]);
}

#[test]
fn date_filter_takes_precedence_over_legacy_dates() {
    let spec = FilterSpec {
        from: Some(date(2000, 1, 1)),
        ..FilterSpec::default()
    }
    .with_dates(DateFilterConfig::between("2024-05-10", "2024-05-25"));
    let records = ledger();
    let matched = apply(&records, &spec, DateRange::for_filter(&spec, now()));
    assert_eq!(descriptions(&matched), vec!["Fuel"]);
}

#[test]
fn projected_salary_flows_into_series() {
    let records = vec![
        salary(date(2024, 1, 1)),
        expense(100.0, date(2024, 1, 10), "Groceries", &["food"]),
        expense(50.0, date(2024, 1, 12), "Books", &[]),
    ];
    let spec = FilterSpec::default()
        .with_dates(DateFilterConfig::between("2024-01-01", "2024-02-29"))
        .with_type(RecordType::Credit);
    let range = DateRange::for_filter(&spec, now());
    let expanded = expand(&records, range.start_date(), range.end_date(), now().date());
    let matched = apply(expanded, &spec, range);
    assert_eq!(matched.len(), 2);

    let series = group_by_interval(&matched, Interval::Monthly);
    assert_eq!(series.labels, vec!["2024-01", "2024-02"]);
    assert_eq!(series.nets, vec![2500.0, 5000.0]);
    assert_eq!(totals(&matched).net, 5000.0);
}

#[test]
fn running_net_matches_bucket_sums() {
    let records = vec![
        income(100.0, date(2024, 1, 5), "a"),
        expense(50.0, date(2024, 1, 6), "b", &[]),
        income(200.0, date(2024, 2, 1), "c"),
    ];
    let series = group_by_interval(&records, Interval::Monthly);
    assert_eq!(series.credits, vec![100.0, 200.0]);
    assert_eq!(series.debits, vec![50.0, 0.0]);
    assert_eq!(series.nets, vec![50.0, 250.0]);
}
