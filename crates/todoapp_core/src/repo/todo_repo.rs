//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and status-toggle APIs over the `todos` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `list_todos` is ordered newest first (`created_at DESC, rowid DESC`).
//! - `toggle_status` flips status in one conditional statement, so
//!   concurrent toggles never lose an update.
//! - An empty patch issues no write and leaves `updated_at` untouched.

use crate::model::todo::{NewTodo, Priority, Todo, TodoId, TodoPatch, TodoStatus};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    priority,
    status,
    due_date,
    list_id,
    created_at,
    updated_at
FROM todos";

const TODO_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "priority",
    "status",
    "due_date",
    "list_id",
    "created_at",
    "updated_at",
];

/// Repository interface for todo persistence.
pub trait TodoRepository {
    /// Returns every todo, newest first.
    fn list_todos(&self) -> RepoResult<Vec<Todo>>;
    /// Returns one todo, or `None` when the id is unknown.
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    /// Inserts a pending todo and returns the persisted row.
    fn insert_todo(&self, todo: &NewTodo) -> RepoResult<Todo>;
    /// Applies the present patch fields and returns the persisted row.
    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo>;
    /// Deletes by id. Unknown ids are not an error.
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
    /// Flips `pending <-> completed` atomically and returns the persisted row.
    fn toggle_status(&self, id: TodoId) -> RepoResult<Todo>;
}

impl<T: TodoRepository + ?Sized> TodoRepository for &T {
    fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        (**self).list_todos()
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        (**self).get_todo(id)
    }

    fn insert_todo(&self, todo: &NewTodo) -> RepoResult<Todo> {
        (**self).insert_todo(todo)
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        (**self).update_todo(id, patch)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        (**self).delete_todo(id)
    }

    fn toggle_status(&self, id: TodoId) -> RepoResult<Todo> {
        (**self).toggle_status(id)
    }
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "todos", TODO_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        select_todo(self.conn, id)
    }

    fn insert_todo(&self, todo: &NewTodo) -> RepoResult<Todo> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO todos (
                id,
                title,
                description,
                priority,
                status,
                due_date,
                list_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id.to_string(),
                todo.title.as_str(),
                todo.description.as_deref(),
                todo.priority.as_str(),
                TodoStatus::Pending.as_str(),
                todo.due_date,
                todo.list_id.to_string(),
            ],
        )?;

        select_todo(self.conn, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted todo {id} missing on read-back"))
        })
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        if patch.is_empty() {
            return select_todo(self.conn, id)?.ok_or(RepoError::NotFound(id));
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = &patch.title {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(description) = &patch.description {
            assignments.push("description = ?");
            bind_values.push(description.clone().map_or(Value::Null, Value::Text));
        }
        if let Some(priority) = patch.priority {
            assignments.push("priority = ?");
            bind_values.push(Value::Text(priority.as_str().to_string()));
        }
        if let Some(status) = patch.status {
            assignments.push("status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(due_date) = patch.due_date {
            assignments.push("due_date = ?");
            bind_values.push(due_date.map_or(Value::Null, Value::Integer));
        }
        if let Some(list_id) = patch.list_id {
            assignments.push("list_id = ?");
            bind_values.push(Value::Text(list_id.to_string()));
        }
        bind_values.push(Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE todos SET {}, updated_at = {NOW_MS_SQL} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        select_todo(self.conn, id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM todos WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn toggle_status(&self, id: TodoId) -> RepoResult<Todo> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            &format!(
                "UPDATE todos
                 SET
                    status = CASE status WHEN 'pending' THEN 'completed' ELSE 'pending' END,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        let todo = select_todo(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        tx.commit()?;
        Ok(todo)
    }
}

fn select_todo(conn: &Connection, id: TodoId) -> RepoResult<Option<Todo>> {
    let mut stmt = conn.prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_todo_row(row)?));
    }

    Ok(None)
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id_text: String = row.get("id")?;
    let list_id_text: String = row.get("list_id")?;

    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in todos.priority"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = TodoStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in todos.status"))
    })?;

    Ok(Todo {
        id: parse_uuid(&id_text, "todos.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        priority,
        status,
        due_date: row.get("due_date")?,
        list_id: parse_uuid(&list_id_text, "todos.list_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
