use std::future::Future;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;
use items_api_core::contract::{ApiGatewayRequest, Record, RecordChanges, DATA_FIELD, ID_FIELD};
use items_api_lambda::adapters::attribute_values::{
    json_to_attribute, record_from_item, record_to_item, UPDATED_AT_FIELD,
};
use items_api_lambda::adapters::record_store::{RecordStore, StoreError};
use items_api_lambda::config::ItemsLambdaConfig;
use items_api_lambda::handlers::dispatch::{handle_api_event, RequestContext};
use items_api_lambda::handlers::response::ApiGatewayResponse;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

struct DynamoDbRecordStore {
    table_name: String,
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDbRecordStore {
    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

fn block_on_store<T, E>(
    operation: &'static str,
    future: impl Future<Output = Result<T, E>>,
) -> Result<T, StoreError>
where
    E: std::error::Error,
{
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future)).map_err(
        |error| StoreError::Request {
            operation,
            message: DisplayErrorContext(error).to_string(),
        },
    )
}

impl RecordStore for DynamoDbRecordStore {
    fn get(&self, id: &str) -> Result<Option<Record>, StoreError> {
        let output = block_on_store(
            "GetItem",
            self.client
                .get_item()
                .table_name(&self.table_name)
                .key(ID_FIELD, Self::key(id))
                .send(),
        )?;

        output.item().map(record_from_item).transpose()
    }

    fn scan(&self, limit: usize) -> Result<Vec<Record>, StoreError> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let output = block_on_store(
            "Scan",
            self.client
                .scan()
                .table_name(&self.table_name)
                .limit(limit)
                .send(),
        )?;

        output.items().iter().map(record_from_item).collect()
    }

    fn put(&self, record: &Record) -> Result<(), StoreError> {
        block_on_store(
            "PutItem",
            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(record_to_item(record)))
                .send(),
        )
        .map(|_| ())
    }

    fn update_fields(&self, id: &str, changes: &RecordChanges) -> Result<Record, StoreError> {
        let output = block_on_store(
            "UpdateItem",
            self.client
                .update_item()
                .table_name(&self.table_name)
                .key(ID_FIELD, Self::key(id))
                .update_expression(format!("SET #data = :data, {UPDATED_AT_FIELD} = :timestamp"))
                .expression_attribute_names("#data", DATA_FIELD)
                .expression_attribute_values(":data", json_to_attribute(&changes.data))
                .expression_attribute_values(
                    ":timestamp",
                    AttributeValue::S(changes.updated_at.clone()),
                )
                .return_values(ReturnValue::AllNew)
                .send(),
        )?;

        let attributes = output.attributes().ok_or_else(|| {
            StoreError::MalformedItem(format!("UpdateItem returned no attributes for '{id}'"))
        })?;
        record_from_item(attributes)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        block_on_store(
            "DeleteItem",
            self.client
                .delete_item()
                .table_name(&self.table_name)
                .key(ID_FIELD, Self::key(id))
                .send(),
        )
        .map(|_| ())
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &DynamoDbRecordStore,
) -> Result<ApiGatewayResponse, Error> {
    let request: ApiGatewayRequest = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid api gateway event: {error}")))?;
    let context = RequestContext::new(event.context.request_id, Utc::now());

    Ok(handle_api_event(&request, &context, store))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = ItemsLambdaConfig::from_env();
    tracing::info!(table = %config.table_name, "starting items lambda");

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoDbRecordStore {
        table_name: config.table_name,
        client: aws_sdk_dynamodb::Client::new(&aws_config),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &store))).await
}
