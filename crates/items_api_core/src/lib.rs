//! Shared items API domain primitives.
//!
//! This crate owns the request/response contracts, the client-facing error
//! taxonomy and store number normalization. It intentionally excludes AWS SDK
//! and Lambda runtime concerns.

pub mod contract;
pub mod error;
pub mod numbers;
