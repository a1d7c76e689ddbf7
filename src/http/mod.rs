//! HTTP client module
//!
//! Provides the network client behind the page fetcher.
//!
//! # Features
//!
//! - **Hard timeout**: every request carries a bounded timeout
//!   (default 9500 ms)
//! - **Cooperative cancellation**: a superseded request is abandoned via a
//!   `CancellationToken` without blocking the caller
//! - **Typed failures**: timeout, transport, and decode outcomes map onto
//!   the crate error taxonomy
//!
//! No automatic retries and no backoff: failures surface to the pagination
//! controller, and retries are always user-triggered.

mod client;

pub use client::{NetworkClient, NetworkConfig, NetworkConfigBuilder, RequestConfig};
