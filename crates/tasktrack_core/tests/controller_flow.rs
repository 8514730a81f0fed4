use std::cell::Cell;
use std::rc::Rc;
use tasktrack_core::db::open_db_in_memory;
use tasktrack_core::{
    FilterCriteria, GatewayError, GatewayResult, NewTaskFields, SqliteTaskGateway, Task,
    TaskController, TaskGateway, TaskId, TaskPatch, TaskPriority, TaskStatus,
};
use uuid::Uuid;

/// Wraps the real store client with switchable list failures, so reload
/// error paths can be exercised against otherwise working storage.
struct FlakyListGateway<'conn> {
    inner: SqliteTaskGateway<'conn>,
    fail_list: Rc<Cell<bool>>,
}

impl TaskGateway for FlakyListGateway<'_> {
    fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        if self.fail_list.get() {
            return Err(GatewayError::InconsistentState("injected list failure"));
        }
        self.inner.list_tasks()
    }
    fn create_task(&self, fields: &NewTaskFields) -> GatewayResult<Task> {
        self.inner.create_task(fields)
    }
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<Task> {
        self.inner.update_task(id, patch)
    }
    fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        self.inner.delete_task(id)
    }
    fn get_task(&self, id: TaskId) -> GatewayResult<Option<Task>> {
        self.inner.get_task(id)
    }
}

fn fields(title: &str) -> NewTaskFields {
    NewTaskFields::new(title, TaskStatus::Pending, TaskPriority::Medium)
}

#[test]
fn reload_replaces_collection_wholesale_and_sorted() {
    let conn = open_db_in_memory().unwrap();
    let gateway = SqliteTaskGateway::try_new(&conn).unwrap();
    for title in ["one", "two", "three"] {
        gateway.create_task(&fields(title)).unwrap();
    }

    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());
    assert!(controller.tasks().is_empty());

    controller.reload().unwrap();
    assert_eq!(controller.tasks().len(), 3);
    assert!(controller
        .tasks()
        .windows(2)
        .all(|w| w[0].created_at <= w[1].created_at));
    assert!(!controller.is_loading());
}

#[test]
fn create_adds_exactly_one_matching_record_after_refetch() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());
    controller.reload().unwrap();
    let before = controller.tasks().len();

    let mut new_fields = fields("Write changelog");
    new_fields.priority = TaskPriority::High;
    let created = controller.create(&new_fields).unwrap();

    assert_eq!(controller.tasks().len(), before + 1);
    let stored = controller
        .tasks()
        .iter()
        .find(|task| task.id == created.id)
        .expect("created task should appear after refetch");
    assert_eq!(stored.title, "Write changelog");
    assert_eq!(stored.status, TaskStatus::Pending);
    assert_eq!(stored.priority, TaskPriority::High);
}

#[test]
fn update_refetches_merged_record() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());
    let created = controller.create(&fields("draft")).unwrap();

    let patch = TaskPatch {
        title: Some("final".to_string()),
        status: Some(TaskStatus::Completed),
        ..TaskPatch::default()
    };
    controller.update(created.id, &patch).unwrap();

    let stored = controller
        .tasks()
        .iter()
        .find(|task| task.id == created.id)
        .expect("updated task should remain loaded");
    assert_eq!(stored.title, "final");
    assert_eq!(stored.status, TaskStatus::Completed);
}

#[test]
fn remove_leaves_no_record_with_that_id() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());
    let keep = controller.create(&fields("keep")).unwrap();
    let doomed = controller.create(&fields("doomed")).unwrap();

    controller.remove(doomed.id).unwrap();

    assert!(controller.tasks().iter().all(|task| task.id != doomed.id));
    assert!(controller.tasks().iter().any(|task| task.id == keep.id));
}

#[test]
fn remove_missing_id_fails_and_leaves_list_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());
    controller.create(&fields("survivor")).unwrap();
    let before = controller.tasks().to_vec();

    let err = controller.remove(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
    assert_eq!(controller.tasks(), before.as_slice());
}

#[test]
fn failed_reload_keeps_previous_list_and_clears_loading() {
    let conn = open_db_in_memory().unwrap();
    let fail_list = Rc::new(Cell::new(false));
    let gateway = FlakyListGateway {
        inner: SqliteTaskGateway::try_new(&conn).unwrap(),
        fail_list: Rc::clone(&fail_list),
    };

    let mut controller = TaskController::new(gateway);
    controller.create(&fields("stable")).unwrap();
    let before = controller.tasks().to_vec();

    fail_list.set(true);
    assert!(controller.reload().is_err());

    assert_eq!(controller.tasks(), before.as_slice());
    assert!(!controller.is_loading());
}

#[test]
fn submit_failure_propagates_with_list_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());
    controller.create(&fields("existing")).unwrap();
    let before = controller.tasks().to_vec();

    let err = controller.create(&fields("   ")).unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
    assert_eq!(controller.tasks(), before.as_slice());
}

#[test]
fn refetch_failure_after_submit_keeps_stale_list_but_row_exists() {
    let conn = open_db_in_memory().unwrap();
    let fail_list = Rc::new(Cell::new(false));
    let gateway = FlakyListGateway {
        inner: SqliteTaskGateway::try_new(&conn).unwrap(),
        fail_list: Rc::clone(&fail_list),
    };

    let mut controller = TaskController::new(gateway);
    controller.reload().unwrap();

    fail_list.set(true);
    // Submit succeeds; only the follow-up refetch fails.
    let created = controller.create(&fields("landed store-side")).unwrap();
    assert!(controller.tasks().is_empty());

    fail_list.set(false);
    controller.reload().unwrap();
    assert!(controller.tasks().iter().any(|task| task.id == created.id));
}

#[test]
fn filter_setters_shape_the_visible_view() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = TaskController::new(SqliteTaskGateway::try_new(&conn).unwrap());

    controller.create(&fields("Buy milk")).unwrap();
    let mut shipped = fields("Ship release");
    shipped.status = TaskStatus::Completed;
    controller.create(&shipped).unwrap();

    controller.set_search_term("ship");
    let visible = controller.visible_tasks();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Ship release");

    controller.set_search_term("");
    controller.set_status_filter(Some(TaskStatus::Completed));
    assert_eq!(controller.visible_tasks().len(), 1);

    controller.set_status_filter(None);
    controller.set_priority_filter(Some(TaskPriority::Low));
    assert!(controller.visible_tasks().is_empty());

    controller.set_filter(FilterCriteria::default());
    assert_eq!(controller.visible_tasks().len(), controller.tasks().len());
}
