use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditEntry;
use crate::domain::audit::models::AuditEntryId;
use crate::domain::audit::models::NewAuditEntry;
use crate::domain::audit::ports::AuditRepository;
use crate::domain::audit::ports::AuditServicePort;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

/// Domain service implementation for the audit trail.
pub struct AuditService<AR>
where
    AR: AuditRepository,
{
    repository: Arc<AR>,
}

impl<AR> AuditService<AR>
where
    AR: AuditRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> AuditServicePort for AuditService<AR>
where
    AR: AuditRepository,
{
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry, AuditError> {
        let entry = entry.into_entry(AuditEntryId::new(), Utc::now());
        let appended = self.repository.append(entry).await?;

        tracing::debug!(
            audit_id = %appended.id,
            entity = %appended.entity,
            actor_id = %appended.actor_id,
            "Audit entry recorded"
        );

        Ok(appended)
    }

    async fn list_entries(&self, request: &PageRequest) -> Result<Page<AuditEntry>, AuditError> {
        let (entries, total) = self.repository.count_and_list(request).await?;
        Ok(Page::new(entries, total, request))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::access::models::AuthenticatedUser;
    use crate::domain::access::models::Role;
    use crate::domain::account::models::AccountId;

    mock! {
        pub TestAuditRepository {}

        #[async_trait]
        impl AuditRepository for TestAuditRepository {
            async fn append(&self, entry: AuditEntry) -> Result<AuditEntry, AuditError>;
            async fn count_and_list(&self, request: &PageRequest) -> Result<(Vec<AuditEntry>, u64), AuditError>;
        }
    }

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser {
            account_id: AccountId::new(),
            email: "admin@x.com".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn test_record_assigns_id_and_timestamp() {
        let mut repository = MockTestAuditRepository::new();
        let actor = actor();
        let actor_id = actor.account_id;

        repository
            .expect_append()
            .withf(move |entry| {
                entry.title == "Deleted product"
                    && entry.entity == "Product"
                    && entry.actor_id == actor_id
                    && entry.actor_role == Some(Role::Admin)
            })
            .times(1)
            .returning(|entry| Ok(entry));

        let service = AuditService::new(Arc::new(repository));

        let before = Utc::now();
        let entry = NewAuditEntry::new("Deleted product", "Deleted product with ID: 1", "Product", &actor)
            .unwrap();
        let recorded = service.record(entry).await.unwrap();

        assert!(recorded.created_at >= before);
    }

    #[tokio::test]
    async fn test_list_entries_builds_meta() {
        let mut repository = MockTestAuditRepository::new();
        let actor = actor();

        let entries: Vec<AuditEntry> = (0..3)
            .map(|i| {
                NewAuditEntry::new(format!("title {}", i), "action", "Product", &actor)
                    .unwrap()
                    .into_entry(AuditEntryId::new(), Utc::now())
            })
            .collect();

        repository
            .expect_count_and_list()
            .withf(|request| request.page() == 2 && request.page_size() == 3)
            .times(1)
            .returning(move |_| Ok((entries.clone(), 7)));

        let service = AuditService::new(Arc::new(repository));

        let request = PageRequest::new(2, 3, None).unwrap();
        let page = service.list_entries(&request).await.unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.meta.total_items, 7);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_previous_page);
        assert!(page.meta.has_next_page);
    }

    #[tokio::test]
    async fn test_record_propagates_database_error() {
        let mut repository = MockTestAuditRepository::new();
        repository
            .expect_append()
            .returning(|_| Err(AuditError::DatabaseError("timeout".to_string())));

        let service = AuditService::new(Arc::new(repository));

        let entry = NewAuditEntry::new("t", "a", "Product", &actor()).unwrap();
        assert!(matches!(
            service.record(entry).await,
            Err(AuditError::DatabaseError(_))
        ));
    }
}
