use thiserror::Error;

use crate::domain::errors::ErrorKey;
use crate::domain::pagination::PageError;

/// Error for audit entry field validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditFieldError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Action is required")]
    MissingAction,

    #[error("Entity is required")]
    MissingEntity,
}

/// Top-level error for audit trail operations
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Invalid audit entry: {0}")]
    InvalidEntry(#[from] AuditFieldError),

    #[error("Invalid page request: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AuditError {
    pub fn key(&self) -> ErrorKey {
        match self {
            AuditError::InvalidEntry(AuditFieldError::MissingTitle) => ErrorKey::TitleIsRequired,
            AuditError::InvalidEntry(AuditFieldError::MissingAction) => ErrorKey::ActionIsRequired,
            AuditError::InvalidEntry(AuditFieldError::MissingEntity) => ErrorKey::EntityIsRequired,
            AuditError::InvalidPage(e) => e.key(),
            AuditError::DatabaseError(_) | AuditError::Unknown(_) => ErrorKey::InternalServerError,
        }
    }
}

impl From<anyhow::Error> for AuditError {
    fn from(err: anyhow::Error) -> Self {
        AuditError::Unknown(err.to_string())
    }
}
