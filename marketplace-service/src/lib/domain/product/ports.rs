use async_trait::async_trait;

use crate::domain::access::models::AuthenticatedUser;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductUpdate;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product domain service operations.
///
/// Mutations take the acting identity so the audit trail can record it.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a product and record it in the audit trail.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    /// * `Audit` - Audit write failed under the strict policy
    async fn create_product(
        &self,
        command: CreateProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Product, ProductError>;

    /// List live products newest first, filtered by name and description.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_products(&self, request: &PageRequest) -> Result<Page<Product>, ProductError>;

    /// Retrieve a live product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist or was deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Apply a partial update and record the changed fields.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist or was deleted
    /// * `DatabaseError` - Database operation failed
    /// * `Audit` - Audit write failed under the strict policy
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Product, ProductError>;

    /// Soft-delete a product and record the deletion.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist or was already deleted
    /// * `DatabaseError` - Database operation failed
    /// * `Audit` - Audit write failed under the strict policy
    async fn delete_product(
        &self,
        id: &ProductId,
        actor: &AuthenticatedUser,
    ) -> Result<(), ProductError>;
}

/// Persistence operations for products.
///
/// Every read and write ignores soft-deleted rows.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, product: Product) -> Result<Product, ProductError>;

    /// # Returns
    /// Optional live product (None if missing or deleted)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Write the supplied fields of `command`.
    ///
    /// The previous state is read in the same atomic step as the write, so
    /// concurrent updates each see the row they actually replaced.
    ///
    /// # Returns
    /// The product before and after, or None if it is missing or deleted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_partial(
        &self,
        id: &ProductId,
        command: &UpdateProductCommand,
    ) -> Result<Option<ProductUpdate>, ProductError>;

    /// Mark a product deleted.
    ///
    /// # Returns
    /// `true` if a live product was deleted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn soft_delete(&self, id: &ProductId) -> Result<bool, ProductError>;

    /// Count live products matching the request's search and return its page.
    ///
    /// # Returns
    /// Page of products (newest first) and the total matching count
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_and_list(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<Product>, u64), ProductError>;
}
