//! Gateway contract and SQLite-backed store client.
//!
//! # Responsibility
//! - Translate domain CRUD operations into remote-table statements.
//! - Keep query shape (ordering, merge semantics) out of the controller.
//!
//! # Invariants
//! - `list_tasks` returns rows ordered by `created_at` ascending, ties
//!   broken by store insertion order.
//! - `updated_at` is refreshed store-side on every mutation.
//! - Deleting or updating a missing id is `NotFound`, never a silent no-op.

use crate::db::{migrations, DbError};
use crate::model::task::{
    NewTaskFields, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskValidationError,
};
use log::error;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    priority,
    due_date,
    created_at,
    updated_at
FROM tasks";

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error taxonomy.
///
/// `Store` covers anything the remote store reports or any transport
/// failure reaching it; `NotFound` is the semantic miss for update/delete
/// against a vanished id.
#[derive(Debug)]
pub enum GatewayError {
    Validation(TaskValidationError),
    Store(DbError),
    NotFound(TaskId),
    /// A persisted row does not satisfy model invariants.
    InvalidData(String),
    /// A write succeeded but its read-back found nothing.
    InconsistentState(&'static str),
    /// The connection has not been bootstrapped through `db::open_db`.
    UninitializedStore {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
            Self::UninitializedStore {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task store not initialized: schema version {actual_version}, expected {expected_version}"
            ),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for GatewayError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(value))
    }
}

/// Store-facing CRUD contract for task records.
///
/// The controller only ever talks to this trait; tests substitute failing
/// or scripted implementations through it.
pub trait TaskGateway {
    /// Fetches every task ordered by `created_at` ascending.
    fn list_tasks(&self) -> GatewayResult<Vec<Task>>;
    /// Inserts one task and returns the stored row (store-assigned id and
    /// timestamps are authoritative).
    fn create_task(&self, fields: &NewTaskFields) -> GatewayResult<Task>;
    /// Merges a partial field set into an existing row and returns the
    /// merged result. `NotFound` when the id does not exist.
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<Task>;
    /// Removes one row. `NotFound` when the id does not exist.
    fn delete_task(&self, id: TaskId) -> GatewayResult<()>;
    /// Fetches one task, `None` when absent.
    fn get_task(&self, id: TaskId) -> GatewayResult<Option<Task>>;
}

/// SQLite-backed store client standing in for the hosted tasks table.
pub struct SqliteTaskGateway<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskGateway<'conn> {
    /// Wraps a bootstrapped connection.
    ///
    /// Rejects connections whose schema version does not match this build,
    /// so raw unmigrated connections cannot reach query paths.
    pub fn try_new(conn: &'conn Connection) -> GatewayResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = migrations::latest_version();
        if actual_version != expected_version {
            return Err(GatewayError::UninitializedStore {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    fn query_all(&self) -> GatewayResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn insert_one(&self, fields: &NewTaskFields) -> GatewayResult<Task> {
        fields.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO tasks (id, title, description, status, priority, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                fields.title.as_str(),
                fields.description.as_deref(),
                fields.status.as_store_str(),
                fields.priority.as_store_str(),
                fields.due_date,
            ],
        )?;

        self.fetch_one(id)?
            .ok_or(GatewayError::InconsistentState(
                "created task missing on read-back",
            ))
    }

    fn merge_one(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<Task> {
        patch.validate()?;

        // An empty patch still refreshes updated_at and asserts existence.
        let mut sql = String::from("UPDATE tasks SET updated_at = (strftime('%s', 'now') * 1000)");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = &patch.title {
            sql.push_str(", title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(description) = &patch.description {
            sql.push_str(", description = ?");
            bind_values.push(Value::Text(description.clone()));
        }
        if let Some(status) = patch.status {
            sql.push_str(", status = ?");
            bind_values.push(Value::Text(status.as_store_str().to_string()));
        }
        if let Some(priority) = patch.priority {
            sql.push_str(", priority = ?");
            bind_values.push(Value::Text(priority.as_store_str().to_string()));
        }
        if let Some(due_date) = patch.due_date {
            sql.push_str(", due_date = ?");
            bind_values.push(Value::Integer(due_date));
        }

        sql.push_str(" WHERE id = ?;");
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(GatewayError::NotFound(id));
        }

        self.fetch_one(id)?
            .ok_or(GatewayError::InconsistentState(
                "updated task missing on read-back",
            ))
    }

    fn remove_one(&self, id: TaskId) -> GatewayResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }

    fn fetch_one(&self, id: TaskId) -> GatewayResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }
}

impl TaskGateway for SqliteTaskGateway<'_> {
    fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        log_failure("task_list", self.query_all())
    }

    fn create_task(&self, fields: &NewTaskFields) -> GatewayResult<Task> {
        log_failure("task_create", self.insert_one(fields))
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<Task> {
        log_failure("task_update", self.merge_one(id, patch))
    }

    fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        log_failure("task_delete", self.remove_one(id))
    }

    fn get_task(&self, id: TaskId) -> GatewayResult<Option<Task>> {
        log_failure("task_get", self.fetch_one(id))
    }
}

// The gateway logs every failure once at the store boundary; callers decide
// whether to also surface the returned error.
fn log_failure<T>(op: &str, result: GatewayResult<T>) -> GatewayResult<T> {
    if let Err(err) = &result {
        error!("event={op} module=gateway status=error error={err}");
    }
    result
}

fn parse_task_row(row: &Row<'_>) -> GatewayResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        GatewayError::InvalidData(format!("invalid uuid value `{id_text}` in tasks.id"))
    })?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::from_store_str(&status_text).ok_or_else(|| {
        GatewayError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = TaskPriority::from_store_str(&priority_text).ok_or_else(|| {
        GatewayError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let task = Task {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        priority,
        due_date: row.get("due_date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate()?;
    Ok(task)
}
