#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use fintrack_core::{
    config::ConfigManager,
    core::{Clock, FixedClock, ProjectionContext},
    domain::{Record, Recurrence},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated JSON store and config manager sharing one directory.
pub fn setup_test_env() -> (JsonStorage, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (storage, config_manager)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).expect("valid test time")
}

/// Mid-morning on 2024-06-15, the reference "now" for most scenarios.
pub fn clock() -> FixedClock {
    FixedClock(at(2024, 6, 15, 10, 30))
}

pub fn ctx() -> ProjectionContext {
    ProjectionContext::capture(&clock())
}

pub fn now() -> NaiveDateTime {
    clock().now()
}

pub fn expense(amount: f64, on: NaiveDate, description: &str, tags: &[&str]) -> Record {
    Record::debit(amount, on)
        .with_description(description)
        .with_tags(tags.iter().copied())
}

pub fn income(amount: f64, on: NaiveDate, description: &str) -> Record {
    Record::credit(amount, on).with_description(description)
}

/// Monthly salary starting on `start`.
pub fn salary(start: NaiveDate) -> Record {
    income(2500.0, start, "Salary").with_recurrence(Recurrence::monthly().starting(start))
}
