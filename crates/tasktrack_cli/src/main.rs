//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the core wiring (store -> gateway -> controller) end to end
//!   against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use tasktrack_core::{
    core_version, db, NewTaskFields, SqliteTaskGateway, TaskController, TaskPriority, TaskStatus,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("tasktrack smoke failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let conn = db::open_db_in_memory()?;
    let gateway = SqliteTaskGateway::try_new(&conn)?;
    let mut controller = TaskController::new(gateway);

    controller.reload()?;
    controller.create(&NewTaskFields::new(
        "Smoke-check the task core",
        TaskStatus::Pending,
        TaskPriority::Medium,
    ))?;

    controller.set_search_term("smoke");
    println!("tasktrack_core version={}", core_version());
    println!(
        "tasks loaded={} visible={}",
        controller.tasks().len(),
        controller.visible_tasks().len()
    );
    Ok(())
}
