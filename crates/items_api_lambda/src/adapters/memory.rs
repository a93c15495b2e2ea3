use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use items_api_core::contract::{Record, RecordChanges};

use super::record_store::{RecordStore, StoreError};

/// Test double with the same upsert semantics as the table.
/// Scans yield records in `id` order.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<BTreeMap<String, Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("poisoned mutex").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
        operation: &'static str,
    ) -> Result<MutexGuard<'_, BTreeMap<String, Record>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Request {
            operation,
            message: "in-memory store lock poisoned".to_string(),
        })
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, id: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.lock("get")?.get(id).cloned())
    }

    fn scan(&self, limit: usize) -> Result<Vec<Record>, StoreError> {
        Ok(self.lock("scan")?.values().take(limit).cloned().collect())
    }

    fn put(&self, record: &Record) -> Result<(), StoreError> {
        self.lock("put")?.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn update_fields(&self, id: &str, changes: &RecordChanges) -> Result<Record, StoreError> {
        let mut records = self.lock("update")?;
        let record = records.entry(id.to_string()).or_insert_with(|| Record {
            id: id.to_string(),
            data: changes.data.clone(),
            created_at: None,
            updated_at: None,
        });
        record.data = changes.data.clone();
        record.updated_at = Some(changes.updated_at.clone());
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.lock("delete")?.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_keeps_created_at() {
        let store = InMemoryRecordStore::with_records([Record::new(
            "a1",
            json!({"x": 1}),
            "2026-10-19T08:00:00.000000Z",
        )]);

        let updated = store
            .update_fields(
                "a1",
                &RecordChanges {
                    data: json!({"x": 2}),
                    updated_at: "2026-10-19T09:00:00.000000Z".to_string(),
                },
            )
            .expect("update should succeed");

        assert_eq!(updated.data, json!({"x": 2}));
        assert_eq!(
            updated.created_at.as_deref(),
            Some("2026-10-19T08:00:00.000000Z")
        );
        assert_eq!(
            updated.updated_at.as_deref(),
            Some("2026-10-19T09:00:00.000000Z")
        );
    }

    #[test]
    fn update_of_unknown_id_upserts_without_created_at() {
        let store = InMemoryRecordStore::new();

        let updated = store
            .update_fields(
                "ghost",
                &RecordChanges {
                    data: json!(true),
                    updated_at: "2026-10-19T09:00:00.000000Z".to_string(),
                },
            )
            .expect("update should succeed");

        assert_eq!(updated.created_at, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn scan_honors_limit() {
        let store = InMemoryRecordStore::with_records(
            (0..5).map(|index| Record::new(format!("r{index}"), json!(index), "t")),
        );

        assert_eq!(store.scan(3).expect("scan should succeed").len(), 3);
        assert_eq!(store.scan(10).expect("scan should succeed").len(), 5);
    }

    #[test]
    fn delete_of_unknown_id_is_noop() {
        let store = InMemoryRecordStore::new();
        store.delete("nope").expect("delete should succeed");
        assert!(store.is_empty());
    }
}
