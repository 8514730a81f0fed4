//! Core domain logic for TaskTrack.
//! This crate is the single source of truth for task-collection behavior;
//! presentation layers consume its public surface and nothing else.

pub mod controller;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod session;
pub mod stats;

pub use controller::filter::{visible_subset, FilterCriteria};
pub use controller::task_controller::TaskController;
pub use gateway::task_gateway::{GatewayError, GatewayResult, SqliteTaskGateway, TaskGateway};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    NewTaskFields, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskValidationError,
};
pub use session::{MockSession, SessionContext, SessionError, User, UserId};
pub use stats::{summarize, TaskStatsSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
