use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const SCAN_LIMIT: usize = 50;
pub const ID_FIELD: &str = "id";
pub const DATA_FIELD: &str = "data";

/// The subset of an API Gateway proxy event the dispatcher reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayRequest {
    #[serde(rename = "httpMethod", default, deserialize_with = "null_as_empty")]
    pub http_method: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
    #[serde(rename = "pathParameters", default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ApiGatewayRequest {
    /// The `{id}` path parameter. An empty value counts as absent.
    pub fn item_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(ID_FIELD))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Parses the raw body. A missing or empty body reads as `{}`.
    pub fn parse_body(&self) -> Result<Value, ApiError> {
        match self.body.as_deref() {
            None | Some("") => Ok(Value::Object(Map::new())),
            Some(text) => serde_json::from_str(text).map_err(|_| ApiError::InvalidJson),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Record {
    /// A freshly created record; both timestamps share the same instant.
    pub fn new(id: impl Into<String>, data: Value, timestamp: &str) -> Self {
        Self {
            id: id.into(),
            data,
            created_at: Some(timestamp.to_string()),
            updated_at: Some(timestamp.to_string()),
        }
    }
}

/// Fields written by an update. Everything else on the record is left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordChanges {
    pub data: Value,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub id: String,
    pub data: Value,
}

/// Fields of a parsed body. A body that is valid JSON but not an object is
/// an unexpected shape, not a client error.
fn body_fields(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object().ok_or_else(|| {
        ApiError::internal(format!("request body must be a JSON object, got {body}"))
    })
}

pub fn validate_create(body: &Value) -> Result<CreateRequest, ApiError> {
    let fields = body_fields(body)?;
    let (Some(id), Some(data)) = (fields.get(ID_FIELD), fields.get(DATA_FIELD)) else {
        return Err(ApiError::MissingCreateFields);
    };

    // The table key is a string attribute; anything else is rejected on write.
    let Some(id) = id.as_str() else {
        return Err(ApiError::internal(format!(
            "record id must be a string, got {id}"
        )));
    };

    Ok(CreateRequest {
        id: id.to_string(),
        data: data.clone(),
    })
}

pub fn validate_update(
    item_id: Option<&str>,
    body: &Value,
    timestamp: &str,
) -> Result<(String, RecordChanges), ApiError> {
    let id = item_id.ok_or(ApiError::MissingPathId)?;
    let data = body_fields(body)?
        .get(DATA_FIELD)
        .ok_or(ApiError::MissingData)?;

    Ok((
        id.to_string(),
        RecordChanges {
            data: data.clone(),
            updated_at: timestamp.to_string(),
        },
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemListResponse {
    pub items: Vec<Record>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemWrittenResponse {
    pub message: String,
    pub item: Record,
}

impl ItemWrittenResponse {
    pub fn created(item: Record) -> Self {
        Self {
            message: "Item created".to_string(),
            item,
        }
    }

    pub fn updated(item: Record) -> Self {
        Self {
            message: "Item updated".to_string(),
            item,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDeletedResponse {
    pub message: String,
    pub id: String,
}

impl ItemDeletedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: "Item deleted".to_string(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request_with_body(body: Option<&str>) -> ApiGatewayRequest {
        ApiGatewayRequest {
            http_method: "POST".to_string(),
            path: "/items".to_string(),
            path_parameters: None,
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn deserializes_api_gateway_event_shape() {
        let request: ApiGatewayRequest = serde_json::from_value(json!({
            "httpMethod": "PUT",
            "path": "/items/a1",
            "pathParameters": {"id": "a1"},
            "body": "{\"data\":1}",
            "requestContext": {"stage": "prod"}
        }))
        .expect("event should parse");

        assert_eq!(request.http_method, "PUT");
        assert_eq!(request.item_id(), Some("a1"));
        assert_eq!(request.body.as_deref(), Some("{\"data\":1}"));
    }

    #[test]
    fn null_path_parameters_mean_no_id() {
        let request: ApiGatewayRequest = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/items",
            "pathParameters": null,
            "body": null
        }))
        .expect("event should parse");

        assert_eq!(request.item_id(), None);
        assert_eq!(request.parse_body(), Ok(json!({})));
    }

    #[test]
    fn empty_path_id_counts_as_absent() {
        let request = ApiGatewayRequest {
            path_parameters: Some(HashMap::from([("id".to_string(), String::new())])),
            ..ApiGatewayRequest::default()
        };
        assert_eq!(request.item_id(), None);
    }

    #[test]
    fn empty_body_reads_as_empty_object() {
        assert_eq!(request_with_body(Some("")).parse_body(), Ok(json!({})));
        assert_eq!(request_with_body(None).parse_body(), Ok(json!({})));
    }

    #[test]
    fn malformed_body_is_invalid_json() {
        assert_eq!(
            request_with_body(Some("{\"id\":")).parse_body(),
            Err(ApiError::InvalidJson)
        );
    }

    #[test]
    fn create_requires_id_and_data() {
        assert_eq!(
            validate_create(&json!({"id": "a1"})),
            Err(ApiError::MissingCreateFields)
        );
        assert_eq!(
            validate_create(&json!({"data": {}})),
            Err(ApiError::MissingCreateFields)
        );
    }

    #[test]
    fn non_object_bodies_are_unexpected_shapes() {
        for body in [json!(null), json!(["id", "data"]), json!("iddata"), json!(0)] {
            let created = validate_create(&body);
            assert!(matches!(created, Err(ApiError::Internal(_))), "{body}");

            let updated = validate_update(Some("a1"), &body, "t");
            assert!(matches!(updated, Err(ApiError::Internal(_))), "{body}");
        }
    }

    #[test]
    fn update_reports_missing_path_id_before_body_shape() {
        assert_eq!(
            validate_update(None, &json!(null), "t"),
            Err(ApiError::MissingPathId)
        );
    }

    #[test]
    fn null_method_and_path_read_as_empty() {
        let request: ApiGatewayRequest = serde_json::from_value(json!({
            "httpMethod": null,
            "path": null,
            "pathParameters": null,
            "body": null
        }))
        .expect("event should parse");

        assert_eq!(request.http_method, "");
        assert_eq!(request.path, "");
    }

    #[test]
    fn create_accepts_null_data() {
        let request = validate_create(&json!({"id": "a1", "data": null})).expect("should pass");
        assert_eq!(request.id, "a1");
        assert_eq!(request.data, Value::Null);
    }

    #[test]
    fn create_with_non_string_id_is_internal() {
        let error = validate_create(&json!({"id": 7, "data": {}})).expect_err("should fail");
        assert!(error.is_internal());
    }

    #[test]
    fn update_checks_path_id_before_data() {
        assert_eq!(
            validate_update(None, &json!({}), "t"),
            Err(ApiError::MissingPathId)
        );
        assert_eq!(
            validate_update(Some("a1"), &json!({"other": 1}), "t"),
            Err(ApiError::MissingData)
        );
    }

    #[test]
    fn record_omits_missing_timestamps() {
        let record = Record {
            id: "a1".to_string(),
            data: json!({"x": 1}),
            created_at: None,
            updated_at: Some("2026-10-19T08:00:00.000000Z".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&record).expect("record should serialize"),
            json!({"id": "a1", "data": {"x": 1}, "updated_at": "2026-10-19T08:00:00.000000Z"})
        );
    }

    #[test]
    fn written_responses_carry_fixed_messages() {
        let record = Record::new("a1", json!(1), "2026-10-19T08:00:00.000000Z");
        assert_eq!(ItemWrittenResponse::created(record.clone()).message, "Item created");
        assert_eq!(ItemWrittenResponse::updated(record).message, "Item updated");
        assert_eq!(
            serde_json::to_value(ItemDeletedResponse::new("nope")).expect("should serialize"),
            json!({"message": "Item deleted", "id": "nope"})
        );
    }
}
