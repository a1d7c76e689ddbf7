//! Page fetching
//!
//! Composes the network client (optionally through the TTL cache) to
//! retrieve one page of a collection for a given cursor.
//!
//! # Overview
//!
//! - [`PageRequest`] - one immutable page attempt (resource, cursor, params)
//! - [`PageResult`] - the all-or-nothing outcome of an attempt
//! - [`CacheOptions`] - whether and how long a response may be cached
//! - [`PageFetcher`] - the read path (`fetch`) and write path (`submit`)

mod fetcher;
mod types;

pub use fetcher::PageFetcher;
pub use types::{CacheOptions, PageRequest, PageResult};
