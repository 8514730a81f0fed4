//! Task collection orchestration.
//!
//! # Responsibility
//! - Hold the authoritative in-memory task list for one session.
//! - Coordinate the refetch-after-mutation cycle against the gateway.
//! - Derive the filtered view consumed by presentation layers.
//!
//! # Invariants
//! - `tasks` is only ever replaced wholesale by a completed reload.
//! - Filtering is pure: no I/O, deterministic for fixed inputs.

pub mod filter;
pub mod task_controller;
