//! Session-local filter criteria and the derived-view predicate.

use crate::model::task::{Task, TaskPriority, TaskStatus};

/// Transient view filter. Never persisted.
///
/// An empty `search_term` and `None` status/priority constrain nothing, so
/// the default value is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against title and description.
    pub search_term: String,
    /// Exact status match when set.
    pub status: Option<TaskStatus>,
    /// Exact priority match when set.
    pub priority: Option<TaskPriority>,
}

impl FilterCriteria {
    /// Returns whether this filter lets every task through.
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.status.is_none() && self.priority.is_none()
    }

    /// Decides whether one task belongs to the visible subset.
    pub fn matches(&self, task: &Task) -> bool {
        matches_search(&self.search_term, task)
            && self.status.map_or(true, |status| task.status == status)
            && self
                .priority
                .map_or(true, |priority| task.priority == priority)
    }
}

/// Computes the visible subset of `tasks` under `filter`.
///
/// Pure and order-preserving: repeated calls with unchanged inputs yield
/// structurally identical output.
pub fn visible_subset(tasks: &[Task], filter: &FilterCriteria) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

fn matches_search(term: &str, task: &Task) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    if task.title.to_lowercase().contains(&needle) {
        return true;
    }
    task.description
        .as_deref()
        .map_or(false, |description| description.to_lowercase().contains(&needle))
}
