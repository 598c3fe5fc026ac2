//! List repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_lists` is ordered oldest first (`created_at ASC, rowid ASC`).
//! - `delete_list` never touches `todos`; referencing rows keep a dangling
//!   `list_id`.

use crate::model::list::{ListId, NewList, TodoList};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const LIST_SELECT_SQL: &str = "SELECT id, name, color, created_at FROM lists";

const LIST_COLUMNS: &[&str] = &["id", "name", "color", "created_at"];

/// Repository interface for list persistence.
pub trait ListRepository {
    /// Returns every list, oldest first.
    fn list_lists(&self) -> RepoResult<Vec<TodoList>>;
    /// Inserts a list and returns the persisted row.
    fn insert_list(&self, list: &NewList) -> RepoResult<TodoList>;
    /// Deletes by id. Unknown ids are not an error.
    fn delete_list(&self, id: ListId) -> RepoResult<()>;
}

impl<T: ListRepository + ?Sized> ListRepository for &T {
    fn list_lists(&self) -> RepoResult<Vec<TodoList>> {
        (**self).list_lists()
    }

    fn insert_list(&self, list: &NewList) -> RepoResult<TodoList> {
        (**self).insert_list(list)
    }

    fn delete_list(&self, id: ListId) -> RepoResult<()> {
        (**self).delete_list(id)
    }
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "lists", LIST_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn list_lists(&self) -> RepoResult<Vec<TodoList>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut lists = Vec::new();

        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(row)?);
        }

        Ok(lists)
    }

    fn insert_list(&self, list: &NewList) -> RepoResult<TodoList> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO lists (id, name, color) VALUES (?1, ?2, ?3);",
            params![id.to_string(), list.name.as_str(), list.color.as_str()],
        )?;

        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_list_row(row);
        }

        Err(RepoError::InvalidData(format!(
            "inserted list {id} missing on read-back"
        )))
    }

    fn delete_list(&self, id: ListId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM lists WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<TodoList> {
    let id_text: String = row.get("id")?;
    Ok(TodoList {
        id: parse_uuid(&id_text, "lists.id")?,
        name: row.get("name")?,
        color: row.get("color")?,
        created_at: row.get("created_at")?,
    })
}
