use std::{collections::BTreeMap, sync::RwLock};

use serde_json::Value;

use crate::{
    domain::{position_of, record::Record, EntityId},
    errors::StoreError,
};

use super::{Result, RecordStore, SettingsStore};

/// Process-local record store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with records exactly as given, ids and timestamps
    /// included.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn add(&self, record: Record) -> Result<Record> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        Ok(super::insert(&mut records, record))
    }

    pub fn update(&self, record: Record) -> Result<Record> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        super::replace(&mut records, record)
    }

    pub fn remove(&self, id: &EntityId) -> Result<bool> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        super::remove(&mut records, id)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get_all(&self, include_deleted: bool) -> Result<Vec<Record>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(super::select(&records, include_deleted))
    }

    fn get_by_id(&self, id: &EntityId) -> Result<Option<Record>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(position_of(records.as_slice(), id).map(|index| records[index].clone()))
    }
}

#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<BTreeMap<String, Value>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
