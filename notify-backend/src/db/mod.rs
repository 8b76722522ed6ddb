//! Record storage
//!
//! Every table is a flat list of JSON records. Stores expose whole-list
//! reads, appends and keyed upserts; services never touch files directly.
//! There is no locking across calls, so concurrent writers to the same
//! table can lose updates (last write wins).

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::AsRefStr;

use crate::error::StoreError;

/// Logical tables, one file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    Notifications,
    Detections,
    UserSettings,
}

impl Table {
    /// File name used by file-backed stores
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_ref())
    }
}

/// Whether an upsert replaced existing records or appended a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

pub trait RecordStore: Send + Sync {
    /// All records of a table in insertion order. Missing or unreadable
    /// tables read as empty.
    fn get_all(&self, table: Table) -> Result<Vec<Value>, StoreError>;

    /// Append one record to the end of a table
    fn append(&self, table: Table, record: Value) -> Result<(), StoreError>;

    /// Replace every record whose `key` field equals the new record's `key`
    /// field, or append when none match. Replacement is whole-record.
    fn upsert_by_key(
        &self,
        table: Table,
        key: &str,
        record: Value,
    ) -> Result<UpsertOutcome, StoreError>;
}

/// Read a table as typed records, skipping items that don't match `T`
pub fn load_typed<T: DeserializeOwned>(
    store: &dyn RecordStore,
    table: Table,
) -> Result<Vec<T>, StoreError> {
    let records = store.get_all(table)?;
    let total = records.len();
    let typed: Vec<T> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect();
    if typed.len() < total {
        log::warn!(
            "[STORE] Skipped {} malformed record(s) in {}",
            total - typed.len(),
            table.as_ref()
        );
    }
    Ok(typed)
}

/// Convert a typed record into the JSON value a store accepts
pub fn to_record<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(record)?)
}

/// Apply an upsert to an in-memory list. Shared by every backend so the
/// replacement rule lives in one place.
pub(crate) fn upsert_into(
    records: &mut Vec<Value>,
    key: &str,
    record: Value,
) -> Result<UpsertOutcome, StoreError> {
    let key_value = record
        .get(key)
        .cloned()
        .ok_or_else(|| StoreError::MissingKey(key.to_string()))?;

    let mut replaced = false;
    for existing in records.iter_mut() {
        if existing.get(key) == Some(&key_value) {
            *existing = record.clone();
            replaced = true;
        }
    }

    if replaced {
        Ok(UpsertOutcome::Updated)
    } else {
        records.push(record);
        Ok(UpsertOutcome::Inserted)
    }
}
