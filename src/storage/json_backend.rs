use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    domain::{record::Record, EntityId},
    errors::StoreError,
};

use super::{RecordStore, Result, SettingsStore};

/// File-backed stores: `records.json` holds the record array and
/// `settings.json` a single key/value object, both pretty-printed.
///
/// Every operation reads the file afresh; writes go through a temp file and
/// a rename. Mutations are serialized within the process.
#[derive(Debug)]
pub struct JsonStorage {
    root: PathBuf,
    records_file: PathBuf,
    settings_file: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        Ok(Self {
            records_file: PathResolver::records_file_in(&app_root),
            settings_file: PathResolver::settings_file_in(&app_root),
            root: app_root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn add(&self, record: Record) -> Result<Record> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.read_records()?;
        let saved = super::insert(&mut records, record);
        self.write_records(&records)?;
        debug!(record_id = %saved.id, "record added");
        Ok(saved)
    }

    pub fn update(&self, record: Record) -> Result<Record> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.read_records()?;
        let saved = super::replace(&mut records, record)?;
        self.write_records(&records)?;
        Ok(saved)
    }

    pub fn remove(&self, id: &EntityId) -> Result<bool> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.read_records()?;
        let purged = super::remove(&mut records, id)?;
        self.write_records(&records)?;
        debug!(record_id = %id, purged, "record removed");
        Ok(purged)
    }

    fn read_records(&self) -> Result<Vec<Record>> {
        if self.records_file.exists() {
            let data = fs::read_to_string(&self.records_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Vec::new())
        }
    }

    fn write_records(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.records_file, &json)
    }

    fn read_settings(&self) -> Result<Map<String, Value>> {
        if self.settings_file.exists() {
            let data = fs::read_to_string(&self.settings_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Map::new())
        }
    }
}

impl RecordStore for JsonStorage {
    fn get_all(&self, include_deleted: bool) -> Result<Vec<Record>> {
        let records = self.read_records()?;
        Ok(super::select(&records, include_deleted))
    }

    fn get_by_id(&self, id: &EntityId) -> Result<Option<Record>> {
        Ok(self
            .read_records()?
            .into_iter()
            .find(|record| &record.id == id))
    }
}

impl SettingsStore for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_settings()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut settings = self.read_settings()?;
        settings.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&settings)?;
        write_atomic(&self.settings_file, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn records_survive_reopen() {
        let (storage, guard) = storage_with_temp_dir();
        let saved = storage
            .add(Record::debit(12.0, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()))
            .expect("add record");

        let reopened = JsonStorage::new(Some(guard.path().to_path_buf())).expect("reopen");
        let loaded = reopened.get_by_id(&saved.id).expect("load record");
        assert_eq!(loaded, Some(saved));
    }

    #[test]
    fn settings_are_keyed() {
        let (storage, _guard) = storage_with_temp_dir();
        storage
            .set("filter_records", json!({"search": "rent"}))
            .expect("save setting");
        storage
            .set("dashboard_widgets", json!([]))
            .expect("save widgets");
        assert_eq!(
            storage.get("filter_records").expect("read"),
            Some(json!({"search": "rent"}))
        );
        assert_eq!(storage.get("filter_dashboard").expect("read"), None);
    }

    #[test]
    fn malformed_records_file_is_an_error() {
        let (storage, guard) = storage_with_temp_dir();
        fs::write(guard.path().join("records.json"), "not json").expect("write");
        assert!(matches!(storage.get_all(false), Err(StoreError::Serde(_))));
    }
}
