//! In-memory record store, used by tests and for ephemeral runs

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

use super::{RecordStore, Table, UpsertOutcome, upsert_into};
use crate::error::StoreError;

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in a table
    #[cfg(test)]
    pub fn len(&self, table: Table) -> usize {
        self.tables.lock().get(&table).map(Vec::len).unwrap_or(0)
    }
}

impl RecordStore for MemoryStore {
    fn get_all(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        Ok(self.tables.lock().get(&table).cloned().unwrap_or_default())
    }

    fn append(&self, table: Table, record: Value) -> Result<(), StoreError> {
        self.tables.lock().entry(table).or_default().push(record);
        Ok(())
    }

    fn upsert_by_key(
        &self,
        table: Table,
        key: &str,
        record: Value,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut tables = self.tables.lock();
        upsert_into(tables.entry(table).or_default(), key, record)
    }
}
