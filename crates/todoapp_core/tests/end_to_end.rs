use rusqlite::Connection;
use todoapp_core::db::open_db_in_memory;
use todoapp_core::{
    DayWindow, FormData, NavCounts, Priority, TodoActions, TodoStatus, ViewGeneration,
};
use uuid::Uuid;

#[test]
fn list_todo_toggle_and_orphaning_scenario() {
    let conn = open_db_in_memory().unwrap();
    let views = ViewGeneration::new();
    let actions = TodoActions::new(&conn, &views);

    let created_list =
        actions.create_list(&FormData::new().with("name", "Work").with("color", "#3B82F6"));
    let work = created_list.as_list().cloned().unwrap();
    assert_eq!(work.name, "Work");

    let created = actions.create_todo(
        &FormData::new()
            .with("title", "Ship spec")
            .with("priority", "high")
            .with("listId", work.id.to_string()),
    );
    assert!(created.is_success(), "{:?}", created.error_message());

    let todos = actions.get_todos();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Ship spec");
    assert_eq!(todos[0].priority, Priority::High);
    assert_eq!(todos[0].status, TodoStatus::Pending);
    assert_eq!(todos[0].list_id, work.id);
    assert_eq!(todos[0].due_date, None);

    let toggled = actions.toggle_todo_status(&todos[0].id.to_string());
    assert_eq!(
        toggled.as_todo().map(|todo| todo.status),
        Some(TodoStatus::Completed)
    );

    let deleted = actions.delete_list(&work.id.to_string());
    assert!(deleted.is_success());
    assert!(actions.get_lists().is_empty());

    let remaining = actions.get_todos();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].list_id, work.id);
    assert!(actions.list_page(&work.id.to_string()).is_none());

    // create list, create todo, toggle, delete list
    assert_eq!(views.current(), 4);
}

#[test]
fn create_todo_requires_title_and_list() {
    let conn = open_db_in_memory().unwrap();
    let views = ViewGeneration::new();
    let actions = TodoActions::new(&conn, &views);

    let response = actions.create_todo(
        &FormData::new()
            .with("title", "")
            .with("listId", Uuid::new_v4().to_string()),
    );
    assert_eq!(response.error_message(), Some("Title and list are required."));

    let response = actions.create_todo(&FormData::new().with("title", "No list"));
    assert_eq!(response.error_message(), Some("Title and list are required."));

    assert!(actions.get_todos().is_empty());
    assert_eq!(views.current(), 0);
}

#[test]
fn update_todo_clears_empty_description_and_keeps_absent_fields() {
    let conn = open_db_in_memory().unwrap();
    let actions = TodoActions::new(&conn, ViewGeneration::new());
    let list_id = Uuid::new_v4().to_string();

    let created = actions.create_todo(
        &FormData::new()
            .with("title", "Write report")
            .with("description", "first draft")
            .with("listId", list_id.as_str())
            .with("dueDate", "2024-03-11T00:00:00Z"),
    );
    let original = created.as_todo().cloned().unwrap();
    assert_eq!(original.description.as_deref(), Some("first draft"));

    let unchanged = actions.update_todo(&FormData::new().with("id", original.id.to_string()));
    assert_eq!(unchanged.as_todo(), Some(&original));

    let cleared = actions.update_todo(
        &FormData::new()
            .with("id", original.id.to_string())
            .with("description", ""),
    );
    let cleared = cleared.as_todo().cloned().unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.title, "Write report");
    assert_eq!(cleared.due_date, original.due_date);

    let missing_id = actions.update_todo(&FormData::new().with("title", "x"));
    assert_eq!(missing_id.error_message(), Some("Id is required."));
}

#[test]
fn toggle_and_delete_report_expected_envelopes() {
    let conn = open_db_in_memory().unwrap();
    let actions = TodoActions::new(&conn, ViewGeneration::new());

    let unknown = Uuid::new_v4().to_string();
    let toggled = actions.toggle_todo_status(&unknown);
    assert_eq!(toggled.error_message(), Some("Todo not found."));

    let deleted_once = actions.delete_todo(&unknown);
    let deleted_twice = actions.delete_todo(&unknown);
    let done = serde_json::json!({ "success": true });
    assert_eq!(serde_json::to_value(&deleted_once).unwrap(), done);
    assert_eq!(serde_json::to_value(&deleted_twice).unwrap(), done);
}

#[test]
fn reads_degrade_to_empty_when_store_is_unavailable() {
    let conn = Connection::open_in_memory().unwrap();
    let actions = TodoActions::new(&conn, ViewGeneration::new());

    assert!(actions.get_todos().is_empty());
    assert!(actions.get_lists().is_empty());
    assert!(actions.get_todo_by_id(&Uuid::new_v4().to_string()).is_none());
    assert_eq!(actions.nav_counts(&DayWindow::today()), NavCounts::default());

    let response =
        actions.create_list(&FormData::new().with("name", "Home").with("color", "#fff"));
    assert_eq!(response.error_message(), Some("Failed to create list."));
}

#[test]
fn list_page_collects_todos_of_that_list() {
    let conn = open_db_in_memory().unwrap();
    let actions = TodoActions::new(&conn, ViewGeneration::new());

    let home = actions
        .create_list(&FormData::new().with("name", "Home").with("color", "#10B981"))
        .as_list()
        .cloned()
        .unwrap();
    let other = Uuid::new_v4().to_string();
    for (title, list_id) in [
        ("dishes", home.id.to_string()),
        ("laundry", home.id.to_string()),
        ("elsewhere", other),
    ] {
        let response = actions.create_todo(
            &FormData::new()
                .with("title", title)
                .with("listId", list_id),
        );
        assert!(response.is_success());
    }
    let dishes = actions
        .get_todos()
        .into_iter()
        .find(|todo| todo.title == "dishes")
        .unwrap();
    let toggled = actions.toggle_todo_status(&dishes.id.to_string());
    assert!(toggled.is_success(), "{:?}", toggled.error_message());

    let page = actions.list_page(&home.id.to_string()).unwrap();
    assert_eq!(page.list, home);
    assert_eq!(page.todos.len(), 2);
    assert_eq!(page.pending_count, 1);
    assert!(actions.get_todo_by_id(&dishes.id.to_string()).is_some());
}

#[test]
fn submitted_text_is_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let actions = TodoActions::new(&conn, ViewGeneration::new());

    let list = actions
        .create_list(&FormData::new().with("name", " Errands ").with("color", "#F59E0B "))
        .as_list()
        .cloned()
        .unwrap();
    assert_eq!(list.name, " Errands ");
    assert_eq!(list.color, "#F59E0B ");

    let created = actions.create_todo(
        &FormData::new()
            .with("title", "  Ship spec ")
            .with("listId", list.id.to_string()),
    );
    assert_eq!(
        created.as_todo().map(|todo| todo.title.as_str()),
        Some("  Ship spec ")
    );
}
