//! Pagination controller
//!
//! The state machine every feed view used to hand-roll: owns the page
//! cursor, guards against overlapping fetches, classifies each page as
//! full/partial/empty/error, and stays put once exhausted or errored until
//! an explicit `retry()` or `reset()`.
//!
//! The concurrency guard is a synchronous state check performed before any
//! await point, so two `advance()` calls on the same controller can never
//! both reach the network. Serialization without locks.

mod controller;
mod types;

pub use controller::PaginationController;
pub use types::{classify_page, ControllerState, ExhaustKind, PageClass, PagerConfig};

#[cfg(test)]
mod tests;
