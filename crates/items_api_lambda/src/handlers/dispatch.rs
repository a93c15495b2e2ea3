use chrono::{DateTime, SecondsFormat, Utc};
use items_api_core::contract::ApiGatewayRequest;
use items_api_core::error::ApiError;

use crate::adapters::record_store::RecordStore;
use crate::handlers::items::{handle_create, handle_delete, handle_get, handle_update};
use crate::handlers::response::{error_response, ApiGatewayResponse};

/// Per-invocation values resolved before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub timestamp: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Routes one request to its handler. Always yields a complete response;
/// failures below this point become 4xx/5xx bodies here.
pub fn handle_api_event(
    request: &ApiGatewayRequest,
    context: &RequestContext,
    store: &dyn RecordStore,
) -> ApiGatewayResponse {
    tracing::info!(
        component = "dispatcher",
        event = "request_received",
        request_id = %context.request_id,
        method = %request.http_method,
        path = %request.path,
    );

    match route(request, context, store) {
        Ok(response) => response,
        Err(error) => {
            if let ApiError::Internal(detail) = &error {
                tracing::error!(
                    component = "dispatcher",
                    event = "request_failed",
                    request_id = %context.request_id,
                    method = %request.http_method,
                    error = %detail,
                    "error processing request"
                );
            }
            error_response(&error)
        }
    }
}

fn route(
    request: &ApiGatewayRequest,
    context: &RequestContext,
    store: &dyn RecordStore,
) -> Result<ApiGatewayResponse, ApiError> {
    let body = request.parse_body()?;

    match request.http_method.as_str() {
        "GET" => handle_get(store, request.item_id()),
        "POST" => handle_create(store, &body, &context.timestamp),
        "PUT" => handle_update(store, request.item_id(), &body, &context.timestamp),
        "DELETE" => handle_delete(store, request.item_id()),
        _ => Err(ApiError::MethodNotAllowed),
    }
}
