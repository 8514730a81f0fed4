//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical task record and its mutation payloads.
//! - Keep one snake_case wire shape shared by storage and callers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `created_at` is assigned once by the store and never rewritten.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod task;
