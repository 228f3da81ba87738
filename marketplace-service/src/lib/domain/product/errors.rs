use thiserror::Error;

use crate::domain::errors::ErrorKey;
use crate::domain::pagination::PageError;
use crate::domain::product::models::ProductId;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ProductName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNameError {
    #[error("Product name is required")]
    Empty,

    #[error("Product name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must be a positive number, got {0}")]
    NotPositive(f64),
}

/// Error for Stock validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Stock must be positive, got {0}")]
    NotPositive(i64),

    #[error("Stock too large: maximum {max}, got {actual}")]
    TooLarge { max: i64, actual: i64 },
}

/// Top-level error for all product operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    // Value object validation errors
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] ProductNameError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid stock: {0}")]
    InvalidStock(#[from] StockError),

    #[error("Invalid page request: {0}")]
    InvalidPage(#[from] PageError),

    // Domain-level errors
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    // Infrastructure errors
    #[error("Audit trail write failed: {0}")]
    Audit(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ProductError {
    pub fn key(&self) -> ErrorKey {
        match self {
            ProductError::InvalidProductId(_) => ErrorKey::IdIsInvalid,
            ProductError::InvalidName(_) => ErrorKey::NameIsInvalid,
            ProductError::InvalidPrice(_) => ErrorKey::PriceIsInvalid,
            ProductError::InvalidStock(_) => ErrorKey::StockIsInvalid,
            ProductError::InvalidPage(e) => e.key(),
            ProductError::NotFound(_) => ErrorKey::ProductNotFound,
            ProductError::Audit(_) | ProductError::DatabaseError(_) | ProductError::Unknown(_) => {
                ErrorKey::InternalServerError
            }
        }
    }
}

impl From<anyhow::Error> for ProductError {
    fn from(err: anyhow::Error) -> Self {
        ProductError::Unknown(err.to_string())
    }
}
