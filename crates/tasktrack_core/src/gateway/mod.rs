//! Task data gateway: the sole boundary between the controller and the
//! remote task store.
//!
//! # Responsibility
//! - Define the store-facing CRUD contract (`TaskGateway`).
//! - Normalize store failures into semantic errors and log them once.
//!
//! # Invariants
//! - Write paths validate payloads before any SQL runs.
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod task_gateway;
