//! Task collection controller.
//!
//! # Responsibility
//! - Own the authoritative loaded task list and its loading flag.
//! - Run every mutation as submit-then-refetch against the gateway.
//!
//! # Invariants
//! - `tasks` is assigned in exactly one place (`apply_load`), always with a
//!   complete store snapshot, never by splicing single records.
//! - A load completion older than the newest applied one is discarded.
//! - `loading` is cleared on both reload outcomes.

use crate::controller::filter::{visible_subset, FilterCriteria};
use crate::gateway::task_gateway::{GatewayResult, TaskGateway};
use crate::model::task::{NewTaskFields, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
use log::{error, info, warn};

/// In-memory coordinator of the task collection for one page session.
///
/// The store is the single source of truth: after every successful
/// mutation the controller refetches the full collection instead of
/// patching its local copy, trading an extra round trip for consistency
/// with concurrent writers.
pub struct TaskController<G: TaskGateway> {
    gateway: G,
    tasks: Vec<Task>,
    filter: FilterCriteria,
    loading: bool,
    issued_load_token: u64,
    applied_load_token: u64,
}

impl<G: TaskGateway> TaskController<G> {
    /// Creates a controller with an empty collection and identity filter.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            filter: FilterCriteria::default(),
            loading: false,
            issued_load_token: 0,
            applied_load_token: 0,
        }
    }

    /// Replaces the collection with a fresh store snapshot.
    ///
    /// On failure the previous list stays untouched and the error is
    /// returned once; there is no automatic retry. `loading` is cleared on
    /// both outcomes.
    pub fn reload(&mut self) -> GatewayResult<()> {
        let token = self.issue_load_token();
        self.loading = true;
        let outcome = self.gateway.list_tasks();
        self.loading = false;

        match outcome {
            Ok(snapshot) => {
                if self.apply_load(token, snapshot) {
                    info!(
                        "event=tasks_reload module=controller status=ok token={token} count={}",
                        self.tasks.len()
                    );
                } else {
                    info!("event=tasks_reload module=controller status=stale_discarded token={token}");
                }
                Ok(())
            }
            Err(err) => {
                error!("event=tasks_reload module=controller status=error token={token} error={err}");
                Err(err)
            }
        }
    }

    /// Creates one task, then refetches the collection.
    ///
    /// A submit failure propagates with the list unchanged, letting form
    /// callers keep their editing state open. A refetch failure after a
    /// successful submit leaves the stale list in place and does not fail
    /// the mutation.
    pub fn create(&mut self, fields: &NewTaskFields) -> GatewayResult<Task> {
        let created = self.gateway.create_task(fields)?;
        info!(
            "event=task_create module=controller status=ok id={}",
            created.id
        );
        self.refetch_after_mutation("task_create");
        Ok(created)
    }

    /// Merges a partial field set into one task, then refetches.
    ///
    /// Existence of the target is the store's concern; the controller does
    /// not pre-check its local list.
    pub fn update(&mut self, id: TaskId, patch: &TaskPatch) -> GatewayResult<Task> {
        let updated = self.gateway.update_task(id, patch)?;
        info!("event=task_update module=controller status=ok id={id}");
        self.refetch_after_mutation("task_update");
        Ok(updated)
    }

    /// Deletes one task, then refetches.
    pub fn remove(&mut self, id: TaskId) -> GatewayResult<()> {
        self.gateway.delete_task(id)?;
        info!("event=task_remove module=controller status=ok id={id}");
        self.refetch_after_mutation("task_remove");
        Ok(())
    }

    /// Replaces the whole filter. Synchronous, no I/O.
    pub fn set_filter(&mut self, filter: FilterCriteria) {
        self.filter = filter;
    }

    /// Updates the search term only.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    /// Updates the status constraint only. `None` clears it.
    pub fn set_status_filter(&mut self, status: Option<TaskStatus>) {
        self.filter.status = status;
    }

    /// Updates the priority constraint only. `None` clears it.
    pub fn set_priority_filter(&mut self, priority: Option<TaskPriority>) {
        self.filter.priority = priority;
    }

    /// Full loaded collection, ordered as the store returned it.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Active filter criteria.
    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Whether a reload is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Derived filtered view. Recomputed per call, side-effect free.
    pub fn visible_tasks(&self) -> Vec<Task> {
        visible_subset(&self.tasks, &self.filter)
    }

    fn issue_load_token(&mut self) -> u64 {
        self.issued_load_token += 1;
        self.issued_load_token
    }

    /// Installs a load result unless a newer one has already been applied.
    ///
    /// Returns whether the snapshot was installed. This is the only
    /// assignment site for `tasks`.
    fn apply_load(&mut self, token: u64, snapshot: Vec<Task>) -> bool {
        if token <= self.applied_load_token {
            return false;
        }
        self.applied_load_token = token;
        self.tasks = snapshot;
        true
    }

    fn refetch_after_mutation(&mut self, op: &str) {
        if let Err(err) = self.reload() {
            // The mutation itself succeeded; the caller keeps the stale
            // list until the next reload.
            warn!("event={op} module=controller status=stale_list error={err}");
        }
    }
}
