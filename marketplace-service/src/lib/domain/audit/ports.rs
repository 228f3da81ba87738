use async_trait::async_trait;

use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditEntry;
use crate::domain::audit::models::NewAuditEntry;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

/// Port for the audit log writer.
#[async_trait]
pub trait AuditServicePort: Send + Sync + 'static {
    /// Append an entry, stamping it with an id and the current time.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry, AuditError>;

    /// List entries newest first, filtered by title and action.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_entries(&self, request: &PageRequest) -> Result<Page<AuditEntry>, AuditError>;
}

/// Append-only persistence for audit entries.
#[async_trait]
pub trait AuditRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn append(&self, entry: AuditEntry) -> Result<AuditEntry, AuditError>;

    /// Count all entries matching the request's search and return its page.
    ///
    /// # Returns
    /// Page of entries (newest first) and the total matching count
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_and_list(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<AuditEntry>, u64), AuditError>;
}
