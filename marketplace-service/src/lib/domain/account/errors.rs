use thiserror::Error;

use crate::domain::access::errors::RoleError;
use crate::domain::errors::ErrorKey;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for registration password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Password contains characters outside the allowed set")]
    InvalidCharacters,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AccountError {
    pub fn key(&self) -> ErrorKey {
        match self {
            AccountError::InvalidEmail(EmailError::Empty) => ErrorKey::EmailIsRequired,
            AccountError::InvalidEmail(_) => ErrorKey::EmailIsInvalid,
            AccountError::InvalidPassword(PasswordPolicyError::Empty) => {
                ErrorKey::PasswordIsRequired
            }
            AccountError::InvalidPassword(_) => ErrorKey::PasswordIsInvalid,
            AccountError::InvalidRole(_) => ErrorKey::RoleIsInvalid,
            AccountError::AlreadyExists(_) => ErrorKey::AlreadyExists,
            AccountError::InvalidCredentials => ErrorKey::WrongCredentials,
            AccountError::Hashing(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ErrorKey::InternalServerError,
        }
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
