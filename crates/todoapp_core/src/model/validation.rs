//! Input validation failures raised before any store call.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// A required field is missing/blank, or a field value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingTitle,
    MissingListId,
    MissingId,
    MissingName,
    MissingColor,
    InvalidId(String),
    InvalidPriority(String),
    InvalidStatus(String),
    InvalidDueDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title must not be blank"),
            Self::MissingListId => write!(f, "list id is required"),
            Self::MissingId => write!(f, "id is required"),
            Self::MissingName => write!(f, "list name must not be blank"),
            Self::MissingColor => write!(f, "list color must not be blank"),
            Self::InvalidId(value) => write!(f, "invalid id `{value}`"),
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected high|medium|low")
            }
            Self::InvalidStatus(value) => {
                write!(f, "invalid status `{value}`; expected pending|completed")
            }
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected RFC 3339 date-time")
            }
        }
    }
}

impl Error for ValidationError {}

/// Returns the trimmed value when it carries any non-whitespace text.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
