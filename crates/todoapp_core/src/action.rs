//! Presentation-facing action API.
//!
//! # Responsibility
//! - Accept form submissions or scalar ids from the rendering layer.
//! - Return tagged envelopes (`{success, todo}`, `{success, list}`,
//!   `{success}`, `{error}`) the caller branches on.
//! - Degrade read failures to empty/absent results.
//!
//! # Invariants
//! - Store error detail is logged, never returned; callers only see fixed
//!   per-operation messages.
//! - Form parsing happens before any store call.

use crate::logging::log_value;
use crate::model::list::{ListId, TodoList};
use crate::model::todo::{Priority, Todo, TodoId, TodoStatus};
use crate::model::validation::{non_blank, ValidationError};
use crate::repo::list_repo::SqliteListRepository;
use crate::repo::todo_repo::SqliteTodoRepository;
use crate::service::invalidation::ViewInvalidator;
use crate::service::list_service::{ListService, ListServiceError};
use crate::service::todo_service::{
    CreateTodoInput, TodoService, TodoServiceError, UpdateTodoInput,
};
use crate::view::{self, DayWindow, NavCounts};
use chrono::DateTime;
use log::{error, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const TODO_CREATE_FAILED: &str = "Failed to create todo.";
const TODO_UPDATE_FAILED: &str = "Failed to update todo.";
const TODO_DELETE_FAILED: &str = "Failed to delete todo.";
const TODO_TOGGLE_FAILED: &str = "Failed to change todo status.";
const TODO_NOT_FOUND: &str = "Todo not found.";
const LIST_CREATE_FAILED: &str = "Failed to create list.";
const LIST_DELETE_FAILED: &str = "Failed to delete list.";

/// Key/value form submission.
///
/// Todo keys: `id`, `title`, `description`, `priority`, `status`, `listId`,
/// `dueDate` (RFC 3339). List keys: `name`, `color`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FormData::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the submitted value; `Some("")` means present but empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (key, value) in iter {
            form.set(key, value);
        }
        form
    }
}

/// Tagged action result returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Todo { success: bool, todo: Todo },
    List { success: bool, list: TodoList },
    Done { success: bool },
    Error { error: String },
}

impl ActionResponse {
    fn todo(todo: Todo) -> Self {
        Self::Todo {
            success: true,
            todo,
        }
    }

    fn list(list: TodoList) -> Self {
        Self::List {
            success: true,
            list,
        }
    }

    fn done() -> Self {
        Self::Done { success: true }
    }

    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error.as_str()),
            _ => None,
        }
    }

    pub fn as_todo(&self) -> Option<&Todo> {
        match self {
            Self::Todo { todo, .. } => Some(todo),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TodoList> {
        match self {
            Self::List { list, .. } => Some(list),
            _ => None,
        }
    }
}

/// Data behind the per-list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    pub list: TodoList,
    pub todos: Vec<Todo>,
    /// Pending todos in this list, shown as the page subtitle.
    pub pending_count: usize,
}

/// Action entry points bound to one store connection.
pub struct TodoActions<'conn, V: ViewInvalidator> {
    conn: &'conn Connection,
    invalidator: V,
}

impl<'conn, V: ViewInvalidator> TodoActions<'conn, V> {
    pub fn new(conn: &'conn Connection, invalidator: V) -> Self {
        Self { conn, invalidator }
    }

    /// All todos, newest first. Empty when the store fails.
    pub fn get_todos(&self) -> Vec<Todo> {
        self.todo_service()
            .and_then(|service| service.list_todos().map_err(TodoServiceError::from))
            .unwrap_or_else(|err| {
                error!(
                    "event=action_get_todos module=action status=degraded error={}",
                    log_value(err)
                );
                Vec::new()
            })
    }

    /// One todo. `None` when unknown, malformed, or the store fails.
    pub fn get_todo_by_id(&self, id: &str) -> Option<Todo> {
        let result = parse_id(id)
            .map_err(TodoServiceError::from)
            .and_then(|id| Ok(self.todo_service()?.get_todo(id)?));
        match result {
            Ok(todo) => todo,
            Err(err) => {
                warn!(
                    "event=action_get_todo module=action status=degraded error={}",
                    log_value(err)
                );
                None
            }
        }
    }

    /// All lists, oldest first. Empty when the store fails.
    pub fn get_lists(&self) -> Vec<TodoList> {
        self.list_service()
            .and_then(|service| service.list_lists().map_err(ListServiceError::from))
            .unwrap_or_else(|err| {
                error!(
                    "event=action_get_lists module=action status=degraded error={}",
                    log_value(err)
                );
                Vec::new()
            })
    }

    pub fn create_todo(&self, form: &FormData) -> ActionResponse {
        let result = parse_create_form(form)
            .map_err(TodoServiceError::from)
            .and_then(|input| self.todo_service()?.create_todo(input));
        todo_response(result, TODO_CREATE_FAILED)
    }

    pub fn update_todo(&self, form: &FormData) -> ActionResponse {
        let result = parse_update_form(form)
            .map_err(TodoServiceError::from)
            .and_then(|(id, input)| self.todo_service()?.update_todo(id, input));
        todo_response(result, TODO_UPDATE_FAILED)
    }

    pub fn delete_todo(&self, id: &str) -> ActionResponse {
        let result = parse_id(id)
            .map_err(TodoServiceError::from)
            .and_then(|id| self.todo_service()?.delete_todo(id));
        match result {
            Ok(()) => ActionResponse::done(),
            Err(err) => todo_failure(err, TODO_DELETE_FAILED),
        }
    }

    pub fn toggle_todo_status(&self, id: &str) -> ActionResponse {
        let result = parse_id(id)
            .map_err(TodoServiceError::from)
            .and_then(|id| self.todo_service()?.toggle_todo_status(id));
        todo_response(result, TODO_TOGGLE_FAILED)
    }

    pub fn create_list(&self, form: &FormData) -> ActionResponse {
        let name = form.get("name").unwrap_or_default();
        let color = form.get("color").unwrap_or_default();
        match self
            .list_service()
            .and_then(|service| service.create_list(name, color))
        {
            Ok(list) => ActionResponse::list(list),
            Err(err) => list_failure(err, LIST_CREATE_FAILED),
        }
    }

    pub fn delete_list(&self, id: &str) -> ActionResponse {
        let result = parse_id(id)
            .map_err(ListServiceError::from)
            .and_then(|id| self.list_service()?.delete_list(id));
        match result {
            Ok(()) => ActionResponse::done(),
            Err(err) => list_failure(err, LIST_DELETE_FAILED),
        }
    }

    /// Navigation badge counters for the day `window`.
    pub fn nav_counts(&self, window: &DayWindow) -> NavCounts {
        view::nav_counts(&self.get_todos(), window)
    }

    /// Per-list page data. `None` when the list id is unknown.
    pub fn list_page(&self, list_id: &str) -> Option<ListPage> {
        let list_id: ListId = parse_id(list_id).ok()?;
        let list = self
            .get_lists()
            .into_iter()
            .find(|list| list.id == list_id)?;
        let todos = view::in_list(&self.get_todos(), list_id);
        Some(ListPage {
            pending_count: view::pending_count(&todos),
            list,
            todos,
        })
    }

    fn todo_service(
        &self,
    ) -> Result<TodoService<SqliteTodoRepository<'conn>, &V>, TodoServiceError> {
        let repo = SqliteTodoRepository::try_new(self.conn).inspect_err(|err| {
            error!(
                "event=action_todo_store module=action status=error error={}",
                log_value(err)
            );
        })?;
        Ok(TodoService::new(repo, &self.invalidator))
    }

    fn list_service(
        &self,
    ) -> Result<ListService<SqliteListRepository<'conn>, &V>, ListServiceError> {
        let repo = SqliteListRepository::try_new(self.conn).inspect_err(|err| {
            error!(
                "event=action_list_store module=action status=error error={}",
                log_value(err)
            );
        })?;
        Ok(ListService::new(repo, &self.invalidator))
    }
}

fn todo_response(result: Result<Todo, TodoServiceError>, failure: &str) -> ActionResponse {
    match result {
        Ok(todo) => ActionResponse::todo(todo),
        Err(err) => todo_failure(err, failure),
    }
}

fn todo_failure(err: TodoServiceError, failure: &str) -> ActionResponse {
    match err {
        TodoServiceError::Validation(err) => ActionResponse::error(validation_message(&err)),
        TodoServiceError::NotFound(_) => ActionResponse::error(TODO_NOT_FOUND),
        TodoServiceError::Store(_) => ActionResponse::error(failure),
    }
}

fn list_failure(err: ListServiceError, failure: &str) -> ActionResponse {
    match err {
        ListServiceError::Validation(err) => ActionResponse::error(validation_message(&err)),
        ListServiceError::Store(_) => ActionResponse::error(failure),
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingTitle | ValidationError::MissingListId => {
            "Title and list are required.".to_string()
        }
        ValidationError::MissingName | ValidationError::MissingColor => {
            "Name and color are required.".to_string()
        }
        ValidationError::MissingId => "Id is required.".to_string(),
        other => format!("Invalid input: {other}."),
    }
}

fn parse_create_form(form: &FormData) -> Result<CreateTodoInput, ValidationError> {
    Ok(CreateTodoInput {
        title: form.get("title").unwrap_or_default().to_string(),
        description: form.get("description").map(str::to_string),
        priority: parse_optional(form.get("priority"), parse_priority)?,
        due_date: parse_optional(form.get("dueDate"), parse_due_date)?,
        list_id: parse_optional(form.get("listId"), parse_id)?,
    })
}

fn parse_update_form(form: &FormData) -> Result<(TodoId, UpdateTodoInput), ValidationError> {
    let id = parse_id(form.get("id").unwrap_or_default())?;

    let list_id = match form.get("listId") {
        Some(raw) => Some(non_blank(raw).ok_or(ValidationError::MissingListId)?),
        None => None,
    };
    let due_date = match form.get("dueDate") {
        Some(raw) => Some(parse_optional(Some(raw), parse_due_date)?),
        None => None,
    };

    let input = UpdateTodoInput {
        title: form.get("title").map(str::to_string),
        description: form.get("description").map(str::to_string),
        priority: parse_optional(form.get("priority"), parse_priority)?,
        status: parse_optional(form.get("status"), parse_status)?,
        due_date,
        list_id: list_id.map(parse_id).transpose()?,
    };
    Ok((id, input))
}

/// Parses a present, non-blank value; absent and blank both yield `None`.
fn parse_optional<T>(
    raw: Option<&str>,
    parse: fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    raw.and_then(non_blank).map(parse).transpose()
}

fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    let trimmed = non_blank(raw).ok_or(ValidationError::MissingId)?;
    Uuid::parse_str(trimmed).map_err(|_| ValidationError::InvalidId(trimmed.to_string()))
}

fn parse_priority(raw: &str) -> Result<Priority, ValidationError> {
    Priority::parse(raw).ok_or_else(|| ValidationError::InvalidPriority(raw.to_string()))
}

fn parse_status(raw: &str) -> Result<TodoStatus, ValidationError> {
    TodoStatus::parse(raw).ok_or_else(|| ValidationError::InvalidStatus(raw.to_string()))
}

fn parse_due_date(raw: &str) -> Result<i64, ValidationError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|due| due.timestamp_millis())
        .map_err(|_| ValidationError::InvalidDueDate(raw.to_string()))
}
