use thiserror::Error;

use crate::domain::access::models::Operation;
use crate::domain::access::models::Role;
use crate::domain::errors::ErrorKey;

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Terminal failure states of the access gate.
///
/// Token verification detail (bad signature, malformed token, unknown role in
/// claims) is collapsed into `Unauthenticated`. Only expiry stays distinct.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Role {role} may not perform {operation:?}")]
    Forbidden { role: Role, operation: Operation },
}

impl AccessError {
    pub fn key(&self) -> ErrorKey {
        match self {
            AccessError::Unauthenticated => ErrorKey::Unauthenticated,
            AccessError::TokenExpired => ErrorKey::TokenExpiredError,
            AccessError::Forbidden { .. } => ErrorKey::Forbidden,
        }
    }
}
