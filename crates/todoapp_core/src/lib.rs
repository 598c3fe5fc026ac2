//! Core data access and view logic for the todo application.
//! This crate is the single source of truth for todo/list invariants.

pub mod action;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use action::{ActionResponse, FormData, ListPage, TodoActions};
pub use config::{AppConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{ListId, NewList, TodoList};
pub use model::todo::{NewTodo, Priority, Todo, TodoId, TodoPatch, TodoStatus};
pub use model::validation::ValidationError;
pub use repo::list_repo::{ListRepository, SqliteListRepository};
pub use repo::todo_repo::{SqliteTodoRepository, TodoRepository};
pub use repo::{RepoError, RepoResult};
pub use service::invalidation::{NoopInvalidator, ViewGeneration, ViewInvalidator, ROOT_PATH};
pub use service::list_service::{ListService, ListServiceError};
pub use service::todo_service::{CreateTodoInput, TodoService, TodoServiceError, UpdateTodoInput};
pub use view::{DayWindow, NavCounts, ViewKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
