//! JSON file store
//!
//! One pretty-printed JSON array per table under the data directory. Every
//! operation reads the whole file, mutates the list and writes it back.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{RecordStore, Table, UpsertOutcome, upsert_into};
use crate::error::StoreError;

pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the file backing a table
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.data_dir.join(table.file_name())
    }

    /// Read a table file. Missing, unreadable, corrupt or non-array files
    /// all read as an empty list.
    fn load(&self, table: Table) -> Vec<Value> {
        let path = self.table_path(table);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("[STORE] Could not read {:?}, treating as empty: {}", path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                log::warn!("[STORE] {:?} is not a JSON array, treating as empty", path);
                Vec::new()
            }
            Err(e) => {
                log::warn!("[STORE] {:?} is not valid JSON, treating as empty: {}", path, e);
                Vec::new()
            }
        }
    }

    fn save(&self, table: Table, records: &[Value]) -> Result<(), StoreError> {
        let path = self.table_path(table);
        let bytes = to_pretty_json(records)?;
        write_file(&path, &bytes).map_err(|source| StoreError::Io { path, source })
    }
}

/// Serialize with 4-space indentation
fn to_pretty_json(records: &[Value]) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a file, creating parent directories as needed
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}

impl RecordStore for JsonFileStore {
    fn get_all(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        Ok(self.load(table))
    }

    fn append(&self, table: Table, record: Value) -> Result<(), StoreError> {
        let mut records = self.load(table);
        records.push(record);
        self.save(table, &records)
    }

    fn upsert_by_key(
        &self,
        table: Table,
        key: &str,
        record: Value,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut records = self.load(table);
        let outcome = upsert_into(&mut records, key, record)?;
        self.save(table, &records)?;
        Ok(outcome)
    }
}
