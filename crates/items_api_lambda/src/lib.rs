//! AWS-oriented adapters and handlers for the items API.
//!
//! This crate owns runtime integration details (Lambda handlers, the DynamoDB
//! attribute mapping and the store port) on top of the contracts in
//! `items_api_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
