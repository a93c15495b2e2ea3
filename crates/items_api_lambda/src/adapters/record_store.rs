use items_api_core::contract::{Record, RecordChanges};
use items_api_core::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
    #[error("malformed item in table: {0}")]
    MalformedItem(String),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        ApiError::internal(error.to_string())
    }
}

/// Single-table persistence keyed by the record `id`.
///
/// `put` and `update_fields` are upserts and `delete` is a no-op for unknown
/// ids; none of the operations check for prior existence.
pub trait RecordStore {
    fn get(&self, id: &str) -> Result<Option<Record>, StoreError>;

    /// Returns at most `limit` records in whatever order the table yields.
    fn scan(&self, limit: usize) -> Result<Vec<Record>, StoreError>;

    fn put(&self, record: &Record) -> Result<(), StoreError>;

    /// Sets `data` and `updated_at`, returning the record as stored afterwards.
    fn update_fields(&self, id: &str, changes: &RecordChanges) -> Result<Record, StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;
}
