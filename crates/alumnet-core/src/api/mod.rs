//! REST API client module for the alumnet backend.
//!
//! This module provides the `ApiClient` for the authentication,
//! directory, and profile endpoints, and the `ApiError` taxonomy every
//! caller pattern-matches on.
//!
//! The API uses JWT bearer token authentication; the client attaches
//! `Authorization: Bearer <token>` and nothing else on the wire.
//! Retries and backoff belong to the transport layer above it.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
