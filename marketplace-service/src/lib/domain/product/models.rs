use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductNameError;
use crate::domain::product::errors::StockError;

/// A product as it was right before a partial update and as it is after.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub previous: Product,
    pub current: Product,
}

/// Product aggregate entity.
///
/// `deleted_at` is set by a soft delete; deleted products are invisible to
/// every read and write path.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Apply the supplied fields of `command` in place.
    pub fn apply(&mut self, command: &UpdateProductCommand, now: DateTime<Utc>) {
        if let Some(name) = &command.name {
            self.name = name.clone();
        }
        if let Some(description) = &command.description {
            self.description = Some(description.clone());
        }
        if let Some(price) = command.price {
            self.price = price;
        }
        if let Some(stock) = command.stock {
            self.stock = stock;
        }
        self.updated_at = now;
    }
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product name value type
///
/// Trimmed, non-empty, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - More than 255 characters after trimming
    pub fn new(name: String) -> Result<Self, ProductNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(ProductNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Strictly positive, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// # Errors
    /// * `NotPositive` - Zero, negative, NaN or infinite
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(PriceError::NotPositive(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Strictly positive stock count that fits the storage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stock(i32);

impl Stock {
    /// # Errors
    /// * `NotPositive` - Zero or negative
    /// * `TooLarge` - Does not fit a 32-bit column
    pub fn new(value: i64) -> Result<Self, StockError> {
        if value <= 0 {
            return Err(StockError::NotPositive(value));
        }
        i32::try_from(value).map(Self).map_err(|_| StockError::TooLarge {
            max: i64::from(i32::MAX),
            actual: value,
        })
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new product with domain types
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
}

impl CreateProductCommand {
    pub fn new(name: ProductName, description: Option<String>, price: Price, stock: Stock) -> Self {
        Self {
            name,
            description,
            price,
            stock,
        }
    }
}

/// Command to update an existing product.
///
/// Only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
}

impl UpdateProductCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }

    /// Human-readable list of the fields this command would actually change
    /// on `original`, e.g. `name changed from "a" to "b", stock changed from "1" to "2"`.
    ///
    /// Fields that are absent or equal to the current value are skipped. An
    /// empty string means nothing would change.
    pub fn describe_changes(&self, original: &Product) -> String {
        let mut changes = Vec::new();

        if let Some(name) = self.name.as_ref().filter(|name| **name != original.name) {
            changes.push(change("name", &original.name, name));
        }
        if let Some(description) = self
            .description
            .as_ref()
            .filter(|description| original.description.as_ref() != Some(*description))
        {
            let old = original.description.as_deref().unwrap_or_default();
            changes.push(change("description", old, description));
        }
        if let Some(price) = self.price.filter(|price| *price != original.price) {
            changes.push(change("price", original.price, price));
        }
        if let Some(stock) = self.stock.filter(|stock| *stock != original.stock) {
            changes.push(change("stock", original.stock, stock));
        }

        changes.join(", ")
    }
}

fn change(field: &str, old: impl fmt::Display, new: impl fmt::Display) -> String {
    format!("{} changed from \"{}\" to \"{}\"", field, old, new)
}
