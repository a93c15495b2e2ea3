use items_api_core::contract::{
    validate_create, validate_update, ItemDeletedResponse, ItemListResponse, ItemWrittenResponse,
    Record, SCAN_LIMIT,
};
use items_api_core::error::ApiError;
use serde_json::Value;

use crate::adapters::record_store::RecordStore;
use crate::handlers::response::{json_response, ApiGatewayResponse};

pub fn handle_get(
    store: &dyn RecordStore,
    item_id: Option<&str>,
) -> Result<ApiGatewayResponse, ApiError> {
    let Some(item_id) = item_id else {
        let items = store.scan(SCAN_LIMIT)?;
        return json_response(200, &ItemListResponse { items });
    };

    match store.get(item_id)? {
        Some(record) => json_response(200, &record),
        None => Err(ApiError::NotFound),
    }
}

pub fn handle_create(
    store: &dyn RecordStore,
    body: &Value,
    timestamp: &str,
) -> Result<ApiGatewayResponse, ApiError> {
    let request = validate_create(body)?;
    let record = Record::new(request.id, request.data, timestamp);

    store.put(&record)?;
    tracing::debug!(component = "items", event = "record_put", id = %record.id);

    json_response(201, &ItemWrittenResponse::created(record))
}

pub fn handle_update(
    store: &dyn RecordStore,
    item_id: Option<&str>,
    body: &Value,
    timestamp: &str,
) -> Result<ApiGatewayResponse, ApiError> {
    let (id, changes) = validate_update(item_id, body, timestamp)?;

    let record = store.update_fields(&id, &changes)?;
    tracing::debug!(component = "items", event = "record_updated", id = %id);

    json_response(200, &ItemWrittenResponse::updated(record))
}

pub fn handle_delete(
    store: &dyn RecordStore,
    item_id: Option<&str>,
) -> Result<ApiGatewayResponse, ApiError> {
    let id = item_id.ok_or(ApiError::MissingPathId)?;

    store.delete(id)?;
    tracing::debug!(component = "items", event = "record_deleted", id = %id);

    json_response(200, &ItemDeletedResponse::new(id))
}
