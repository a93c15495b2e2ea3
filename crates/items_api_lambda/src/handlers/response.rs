use items_api_core::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn json_response(
    status_code: u16,
    payload: &impl Serialize,
) -> Result<ApiGatewayResponse, ApiError> {
    let body = serde_json::to_string(payload).map_err(|error| {
        ApiError::internal(format!("failed to serialize response payload: {error}"))
    })?;
    Ok(ApiGatewayResponse {
        status_code,
        headers: default_headers(),
        body,
    })
}

pub fn error_response(error: &ApiError) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: error.status_code(),
        headers: default_headers(),
        body: json!({ "error": error.public_message() }).to_string(),
    }
}

fn default_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": ALLOWED_METHODS,
    })
}
