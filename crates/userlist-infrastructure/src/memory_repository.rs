//! In-memory implementation of `RecordRepository`.
//!
//! Behaves like the remote table (integer keys assigned on insert, update and
//! delete by key) without any network. Used for offline demos and tests.

use async_trait::async_trait;
use tokio::sync::Mutex;
use userlist_core::error::Result;
use userlist_core::record::{Record, RecordFields, RecordId, RecordRepository};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Record>,
    next_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    table: Mutex<Table>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table. New keys continue after the largest integer key.
    pub fn with_records(rows: Vec<Record>) -> Self {
        let next_id = rows
            .iter()
            .filter_map(|row| match row.id {
                RecordId::Int(value) => Some(value),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            table: Mutex::new(Table { rows, next_id }),
        }
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn list_all(&self) -> Result<Vec<Record>> {
        Ok(self.table.lock().await.rows.clone())
    }

    async fn insert(&self, fields: &RecordFields) -> Result<Vec<Record>> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let record = Record {
            id: RecordId::Int(table.next_id),
            full_name: fields.full_name.clone(),
            gender: fields.gender.clone(),
        };
        table.rows.push(record.clone());
        Ok(vec![record])
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> Result<Vec<Record>> {
        let mut table = self.table.lock().await;
        let updated = table
            .rows
            .iter_mut()
            .filter(|row| &row.id == id)
            .map(|row| {
                row.apply(fields);
                row.clone()
            })
            .collect();
        Ok(updated)
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        self.table.lock().await.rows.retain(|row| &row.id != id);
        Ok(())
    }
}
