//! Todo use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/toggle/list entry points for todos.
//! - Apply create defaults (`priority=medium`, `status=pending`).
//! - Normalize empty optional inputs to "absent".
//!
//! # Invariants
//! - Validation failures never reach the repository.
//! - Successful mutations invalidate [`ROOT_PATH`] exactly once.
//! - Reads return explicit results; degrading to empty is a caller decision.

use crate::logging::log_value;
use crate::model::list::ListId;
use crate::model::todo::{NewTodo, Priority, Todo, TodoId, TodoPatch, TodoStatus};
use crate::model::validation::{non_blank, ValidationError};
use crate::repo::todo_repo::TodoRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::invalidation::{ViewInvalidator, ROOT_PATH};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Required input missing or malformed; no store call was made.
    Validation(ValidationError),
    /// Target todo does not exist.
    NotFound(TodoId),
    /// The store reported a failure.
    Store(RepoError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for TodoServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Request model for creating a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoInput {
    pub title: String,
    /// Empty text is stored as "no description".
    pub description: Option<String>,
    /// Defaults to `Priority::Medium`.
    pub priority: Option<Priority>,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    pub list_id: Option<ListId>,
}

/// Request model for a partial todo update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodoInput {
    pub title: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TodoStatus>,
    /// `Some(None)` clears the deadline.
    pub due_date: Option<Option<i64>>,
    pub list_id: Option<ListId>,
}

/// Todo service facade over repository implementations.
pub struct TodoService<R: TodoRepository, V: ViewInvalidator> {
    repo: R,
    invalidator: V,
}

impl<R: TodoRepository, V: ViewInvalidator> TodoService<R, V> {
    /// Creates a service using the provided repository and invalidation hook.
    pub fn new(repo: R, invalidator: V) -> Self {
        Self { repo, invalidator }
    }

    /// Lists all todos, newest first.
    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos().inspect_err(|err| {
            error!("event=todo_list module=service status=error error={}", log_value(err));
        })
    }

    /// Gets one todo by id.
    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id).inspect_err(|err| {
            error!(
                "event=todo_get module=service status=error todo_id={id} error={}",
                log_value(err)
            );
        })
    }

    /// Creates a pending todo.
    ///
    /// # Errors
    /// - `Validation` when the title is blank or the list id is missing.
    /// - `Store` when the insert fails.
    pub fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, TodoServiceError> {
        let new_todo = validate_create(input).inspect_err(|err| {
            warn!("event=todo_create module=service status=rejected reason={}", log_value(err));
        })?;

        let todo = self.repo.insert_todo(&new_todo).inspect_err(|err| {
            error!("event=todo_create module=service status=error error={}", log_value(err));
        })?;

        info!(
            "event=todo_create module=service status=ok todo_id={} list_id={}",
            todo.id, todo.list_id
        );
        self.invalidator.invalidate(ROOT_PATH);
        Ok(todo)
    }

    /// Changes only the fields present in `input`.
    ///
    /// An input with no fields returns the stored todo unchanged.
    pub fn update_todo(
        &self,
        id: TodoId,
        input: UpdateTodoInput,
    ) -> Result<Todo, TodoServiceError> {
        let patch = validate_update(input).inspect_err(|err| {
            warn!(
                "event=todo_update module=service status=rejected todo_id={id} reason={}",
                log_value(err)
            );
        })?;

        let todo = self.repo.update_todo(id, &patch).inspect_err(|err| {
            error!(
                "event=todo_update module=service status=error todo_id={id} error={}",
                log_value(err)
            );
        })?;

        info!("event=todo_update module=service status=ok todo_id={id}");
        self.invalidator.invalidate(ROOT_PATH);
        Ok(todo)
    }

    /// Deletes a todo. Deleting an unknown id succeeds.
    pub fn delete_todo(&self, id: TodoId) -> Result<(), TodoServiceError> {
        self.repo.delete_todo(id).inspect_err(|err| {
            error!(
                "event=todo_delete module=service status=error todo_id={id} error={}",
                log_value(err)
            );
        })?;

        info!("event=todo_delete module=service status=ok todo_id={id}");
        self.invalidator.invalidate(ROOT_PATH);
        Ok(())
    }

    /// Flips `pending <-> completed`.
    ///
    /// # Errors
    /// - `NotFound` when no todo has this id.
    pub fn toggle_todo_status(&self, id: TodoId) -> Result<Todo, TodoServiceError> {
        let todo = self.repo.toggle_status(id).inspect_err(|err| {
            error!(
                "event=todo_toggle module=service status=error todo_id={id} error={}",
                log_value(err)
            );
        })?;

        info!(
            "event=todo_toggle module=service status=ok todo_id={id} new_status={}",
            todo.status.as_str()
        );
        self.invalidator.invalidate(ROOT_PATH);
        Ok(todo)
    }
}

fn validate_create(input: CreateTodoInput) -> Result<NewTodo, ValidationError> {
    non_blank(&input.title).ok_or(ValidationError::MissingTitle)?;
    let list_id = input.list_id.ok_or(ValidationError::MissingListId)?;

    Ok(NewTodo {
        title: input.title,
        description: input.description.filter(|value| !value.is_empty()),
        priority: input.priority.unwrap_or_default(),
        due_date: input.due_date,
        list_id,
    })
}

fn validate_update(input: UpdateTodoInput) -> Result<TodoPatch, ValidationError> {
    if let Some(title) = &input.title {
        non_blank(title).ok_or(ValidationError::MissingTitle)?;
    }

    Ok(TodoPatch {
        title: input.title,
        description: input
            .description
            .map(|value| Some(value).filter(|value| !value.is_empty())),
        priority: input.priority,
        status: input.status,
        due_date: input.due_date,
        list_id: input.list_id,
    })
}
