//! Pure summary numbers over a loaded task collection.

use crate::model::task::{Task, TaskPriority, TaskStatus};

/// Headline counts for a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatsSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub high_priority: usize,
    /// Completed share as a whole percentage, rounded. Zero when empty.
    pub completion_rate_pct: u32,
}

/// Computes summary counts in one pass.
pub fn summarize(tasks: &[Task]) -> TaskStatsSummary {
    let mut summary = TaskStatsSummary {
        total: tasks.len(),
        ..TaskStatsSummary::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => summary.completed += 1,
            TaskStatus::InProgress => summary.in_progress += 1,
            TaskStatus::Pending => summary.pending += 1,
        }
        if task.priority == TaskPriority::High {
            summary.high_priority += 1;
        }
    }

    if summary.total > 0 {
        let rate = summary.completed as f64 / summary.total as f64 * 100.0;
        summary.completion_rate_pct = rate.round() as u32;
    }

    summary
}
