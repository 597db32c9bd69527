pub mod json_backend;
pub mod memory;

use chrono::Utc;
use serde_json::Value;
use crate::{
    domain::{position_of, record::Record, EntityId},
    errors::StoreError,
};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read side of the record store consumed by the projection pipelines.
pub trait RecordStore: Send + Sync {
    /// Returns every record, soft-deleted ones only when `include_deleted`.
    fn get_all(&self, include_deleted: bool) -> Result<Vec<Record>>;
    fn get_by_id(&self, id: &EntityId) -> Result<Option<Record>>;
}

/// Key/value store for page filters and the widget registry.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::{InMemoryRecordStore, InMemorySettingsStore};

pub(crate) fn select(records: &[Record], include_deleted: bool) -> Vec<Record> {
    records
        .iter()
        .filter(|record| include_deleted || !record.is_deleted())
        .cloned()
        .collect()
}

/// Stores a new record with a fresh id and creation timestamps.
pub(crate) fn insert(records: &mut Vec<Record>, mut record: Record) -> Record {
    let now = Utc::now();
    record.id = EntityId::generate();
    record.created_at = Some(now);
    record.modified_at = Some(now);
    record.deleted_at = None;
    records.push(record.clone());
    record
}

/// Replaces the stored record with the same id, keeping its creation time.
pub(crate) fn replace(records: &mut [Record], mut record: Record) -> Result<Record> {
    let index = position_of(&*records, &record.id)
        .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
    record.created_at = records[index].created_at;
    record.modified_at = Some(Utc::now());
    records[index] = record.clone();
    Ok(record)
}

/// First removal marks the record deleted; removing an already deleted
/// record drops it for good. Returns whether the record is now gone.
pub(crate) fn remove(records: &mut Vec<Record>, id: &EntityId) -> Result<bool> {
    let index =
        position_of(records.as_slice(), id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
    if records[index].is_deleted() {
        records.remove(index);
        Ok(true)
    } else {
        let now = Utc::now();
        records[index].deleted_at = Some(now);
        records[index].modified_at = Some(now);
        Ok(false)
    }
}
