//! List use-case service.
//!
//! # Invariants
//! - Name and color must be non-blank before the store is touched.
//! - Deleting a list never cascades to its todos.

use crate::logging::log_value;
use crate::model::list::{ListId, NewList, TodoList};
use crate::model::validation::{non_blank, ValidationError};
use crate::repo::list_repo::ListRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::invalidation::{ViewInvalidator, ROOT_PATH};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for list use-cases.
#[derive(Debug)]
pub enum ListServiceError {
    Validation(ValidationError),
    Store(RepoError),
}

impl Display for ListServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ListServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ListServiceError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// List service facade over repository implementations.
pub struct ListService<R: ListRepository, V: ViewInvalidator> {
    repo: R,
    invalidator: V,
}

impl<R: ListRepository, V: ViewInvalidator> ListService<R, V> {
    pub fn new(repo: R, invalidator: V) -> Self {
        Self { repo, invalidator }
    }

    /// Lists all lists, oldest first.
    pub fn list_lists(&self) -> RepoResult<Vec<TodoList>> {
        self.repo.list_lists().inspect_err(|err| {
            error!("event=list_list module=service status=error error={}", log_value(err));
        })
    }

    /// Creates a list from a display name and a color token.
    pub fn create_list(&self, name: &str, color: &str) -> Result<TodoList, ListServiceError> {
        let new_list = validate_list(name, color).inspect_err(|err| {
            warn!("event=list_create module=service status=rejected reason={}", log_value(err));
        })?;

        let list = self.repo.insert_list(&new_list).inspect_err(|err| {
            error!("event=list_create module=service status=error error={}", log_value(err));
        })?;

        info!("event=list_create module=service status=ok list_id={}", list.id);
        self.invalidator.invalidate(ROOT_PATH);
        Ok(list)
    }

    /// Deletes a list. Todos that reference it are left in place.
    pub fn delete_list(&self, id: ListId) -> Result<(), ListServiceError> {
        self.repo.delete_list(id).inspect_err(|err| {
            error!(
                "event=list_delete module=service status=error list_id={id} error={}",
                log_value(err)
            );
        })?;

        info!("event=list_delete module=service status=ok list_id={id}");
        self.invalidator.invalidate(ROOT_PATH);
        Ok(())
    }
}

fn validate_list(name: &str, color: &str) -> Result<NewList, ValidationError> {
    non_blank(name).ok_or(ValidationError::MissingName)?;
    non_blank(color).ok_or(ValidationError::MissingColor)?;
    Ok(NewList {
        name: name.to_string(),
        color: color.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::validate_list;
    use crate::model::validation::ValidationError;

    #[test]
    fn validate_requires_name_then_color() {
        assert_eq!(validate_list("", ""), Err(ValidationError::MissingName));
        assert_eq!(validate_list("Work", " "), Err(ValidationError::MissingColor));

        let list = validate_list(" Work ", "#3B82F6").unwrap();
        assert_eq!(list.name, " Work ");
        assert_eq!(list.color, "#3B82F6");
    }
}
