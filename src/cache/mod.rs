//! TTL response cache
//!
//! Maps a request key (the full request URL including query string) to a
//! cached payload plus a capture timestamp. Staleness is decided against a
//! caller-supplied TTL and re-evaluated on every read, never on a timer.
//!
//! # Features
//!
//! - **Pluggable storage**: any [`CacheStore`] backend; an in-memory
//!   implementation is provided
//! - **Failure tolerance**: a missing or failed backing store degrades to a
//!   cache miss, never an error
//! - **Logical expiry**: entries are overwritten on refresh, not reaped

mod store;
mod ttl;

pub use store::{CacheStore, MemoryStore};
pub use ttl::{CacheEntry, TtlCache};
