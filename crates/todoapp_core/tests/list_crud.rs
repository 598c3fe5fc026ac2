use rusqlite::params;
use todoapp_core::db::open_db_in_memory;
use todoapp_core::{
    ListRepository, ListService, ListServiceError, NewList, NewTodo, Priority,
    SqliteListRepository, SqliteTodoRepository, TodoRepository, ValidationError, ViewGeneration,
};
use uuid::Uuid;

fn new_list(name: &str) -> NewList {
    NewList {
        name: name.to_string(),
        color: "#3B82F6".to_string(),
    }
}

#[test]
fn insert_returns_persisted_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let list = repo.insert_list(&new_list("Work")).unwrap();
    assert_eq!(list.name, "Work");
    assert_eq!(list.color, "#3B82F6");
    assert!(list.created_at > 0);
    assert_eq!(repo.list_lists().unwrap(), vec![list]);
}

#[test]
fn list_orders_oldest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let newer = repo.insert_list(&new_list("Newer")).unwrap();
    let older = repo.insert_list(&new_list("Older")).unwrap();
    conn.execute(
        "UPDATE lists SET created_at = 2000 WHERE id = ?1;",
        params![newer.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE lists SET created_at = 1000 WHERE id = ?1;",
        params![older.id.to_string()],
    )
    .unwrap();

    let names: Vec<_> = repo
        .list_lists()
        .unwrap()
        .into_iter()
        .map(|list| list.name)
        .collect();
    assert_eq!(names, vec!["Older", "Newer"]);
}

#[test]
fn delete_is_idempotent_and_keeps_todos() {
    let conn = open_db_in_memory().unwrap();
    let lists = SqliteListRepository::try_new(&conn).unwrap();
    let todos = SqliteTodoRepository::try_new(&conn).unwrap();

    let list = lists.insert_list(&new_list("Errands")).unwrap();
    let todo = todos
        .insert_todo(&NewTodo {
            title: "buy stamps".to_string(),
            description: None,
            priority: Priority::Low,
            due_date: None,
            list_id: list.id,
        })
        .unwrap();

    lists.delete_list(list.id).unwrap();
    lists.delete_list(list.id).unwrap();

    assert!(lists.list_lists().unwrap().is_empty());
    let orphan = todos.get_todo(todo.id).unwrap().unwrap();
    assert_eq!(orphan.list_id, list.id);
}

#[test]
fn service_rejects_blank_name_or_color_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();
    let views = ViewGeneration::new();
    let service = ListService::new(repo, &views);

    let err = service.create_list("  ", "#EF4444").unwrap_err();
    assert!(matches!(
        err,
        ListServiceError::Validation(ValidationError::MissingName)
    ));
    let err = service.create_list("Home", "").unwrap_err();
    assert!(matches!(
        err,
        ListServiceError::Validation(ValidationError::MissingColor)
    ));

    assert!(service.list_lists().unwrap().is_empty());
    assert_eq!(views.current(), 0);
}

#[test]
fn service_mutations_invalidate_views() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();
    let views = ViewGeneration::new();
    let service = ListService::new(repo, &views);

    let list = service.create_list("Home", "#10B981").unwrap();
    service.delete_list(list.id).unwrap();
    service.delete_list(Uuid::new_v4()).unwrap();

    assert_eq!(views.current(), 3);
}
