//! Mapping between JSON values and DynamoDB attribute values.
//!
//! Numbers come back from the table as decimal text and go through
//! [`normalize_decimal`], so everything leaving this module is plain JSON.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use items_api_core::contract::{Record, DATA_FIELD, ID_FIELD};
use items_api_core::numbers::normalize_decimal;
use serde_json::{Map, Number, Value};

use super::record_store::StoreError;

pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

pub type Item = HashMap<String, AttributeValue>;

pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, StoreError> {
    match value {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::N(text) => decimal_to_json(text).map(Value::Number),
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(fields) => fields
            .iter()
            .map(|(name, value)| Ok((name.clone(), attribute_to_json(value)?)))
            .collect::<Result<Map<_, _>, StoreError>>()
            .map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|text| decimal_to_json(text).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(StoreError::MalformedItem(
            "binary attributes have no JSON representation".to_string(),
        )),
        _ => Err(StoreError::MalformedItem(
            "unsupported attribute type".to_string(),
        )),
    }
}

pub fn record_to_item(record: &Record) -> Item {
    let mut item = Item::from([
        (ID_FIELD.to_string(), AttributeValue::S(record.id.clone())),
        (DATA_FIELD.to_string(), json_to_attribute(&record.data)),
    ]);
    if let Some(created_at) = &record.created_at {
        item.insert(
            CREATED_AT_FIELD.to_string(),
            AttributeValue::S(created_at.clone()),
        );
    }
    if let Some(updated_at) = &record.updated_at {
        item.insert(
            UPDATED_AT_FIELD.to_string(),
            AttributeValue::S(updated_at.clone()),
        );
    }
    item
}

pub fn record_from_item(item: &Item) -> Result<Record, StoreError> {
    let id = match item.get(ID_FIELD) {
        Some(AttributeValue::S(id)) => id.clone(),
        Some(_) => {
            return Err(StoreError::MalformedItem(
                "id attribute must be a string".to_string(),
            ))
        }
        None => return Err(StoreError::MalformedItem("item has no id".to_string())),
    };

    let data = item
        .get(DATA_FIELD)
        .map(attribute_to_json)
        .transpose()?
        .unwrap_or(Value::Null);

    Ok(Record {
        data,
        created_at: timestamp_attribute(item, CREATED_AT_FIELD, &id)?,
        updated_at: timestamp_attribute(item, UPDATED_AT_FIELD, &id)?,
        id,
    })
}

fn timestamp_attribute(item: &Item, name: &str, id: &str) -> Result<Option<String>, StoreError> {
    match item.get(name) {
        None => Ok(None),
        Some(AttributeValue::S(text)) => Ok(Some(text.clone())),
        Some(_) => Err(StoreError::MalformedItem(format!(
            "{name} of item '{id}' must be a string"
        ))),
    }
}

fn decimal_to_json(text: &str) -> Result<Number, StoreError> {
    normalize_decimal(text).map_err(|error| StoreError::MalformedItem(error.to_string()))
}
