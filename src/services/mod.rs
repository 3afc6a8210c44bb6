pub mod caretaker_service;
pub mod catalog_service;
pub mod child_service;
pub mod group_service;
pub mod volunteer_service;

pub use caretaker_service::CaretakerService;
pub use catalog_service::CatalogService;
pub use child_service::ChildService;
pub use group_service::GroupService;
pub use volunteer_service::VolunteerService;

use crate::database::manager::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(DatabaseError),
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => ServiceError::NotFound(what),
            DatabaseError::MissingIdentifier(field) => {
                ServiceError::validation(field, "must not be empty")
            }
            other => ServiceError::Storage(other),
        }
    }
}

/// Reject values that are empty once surrounding whitespace is removed
pub(crate) fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(field, "is required"));
    }
    Ok(())
}

pub(crate) fn require_id(field: &str, id: &str) -> Result<(), ServiceError> {
    if id.trim().is_empty() {
        return Err(ServiceError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// `Some("")` and `Some("  ")` mean "not set"
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
