use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::models::AuthenticatedUser;
use crate::domain::audit::models::NewAuditEntry;
use crate::domain::audit::ports::AuditServicePort;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

const AUDIT_ENTITY: &str = "Product";

/// What happens when the audit write after a mutation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuditPolicy {
    /// Log the failure; the mutation still reports success.
    #[default]
    BestEffort,
    /// Report the failure to the caller. The mutation is not rolled back.
    Strict,
}

impl AuditPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            AuditPolicy::Strict
        } else {
            AuditPolicy::BestEffort
        }
    }
}

/// Domain service implementation for product operations.
pub struct ProductService<PR, AS>
where
    PR: ProductRepository,
    AS: AuditServicePort,
{
    repository: Arc<PR>,
    audit: Arc<AS>,
    audit_policy: AuditPolicy,
}

impl<PR, AS> ProductService<PR, AS>
where
    PR: ProductRepository,
    AS: AuditServicePort,
{
    /// Create a new product service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Product persistence implementation
    /// * `audit` - Audit trail writer
    /// * `audit_policy` - How audit write failures are treated
    pub fn new(repository: Arc<PR>, audit: Arc<AS>, audit_policy: AuditPolicy) -> Self {
        Self {
            repository,
            audit,
            audit_policy,
        }
    }

    async fn record(
        &self,
        title: &str,
        action: String,
        actor: &AuthenticatedUser,
    ) -> Result<(), ProductError> {
        let entry = NewAuditEntry::new(title, action, AUDIT_ENTITY, actor)
            .map_err(|e| ProductError::Audit(e.to_string()))?;

        match self.audit.record(entry).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, title, actor_id = %actor.account_id, "Failed to write audit entry");
                match self.audit_policy {
                    AuditPolicy::BestEffort => Ok(()),
                    AuditPolicy::Strict => Err(ProductError::Audit(e.to_string())),
                }
            }
        }
    }
}

#[async_trait]
impl<PR, AS> ProductServicePort for ProductService<PR, AS>
where
    PR: ProductRepository,
    AS: AuditServicePort,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Product, ProductError> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            description: command.description,
            price: command.price,
            stock: command.stock,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let created = self.repository.insert(product).await?;
        tracing::info!(product_id = %created.id, "Product created");

        self.record(
            "Added new product",
            format!("Added new product with title \"{}\"", created.name),
            actor,
        )
        .await?;

        Ok(created)
    }

    async fn list_products(&self, request: &PageRequest) -> Result<Page<Product>, ProductError> {
        let (products, total) = self.repository.count_and_list(request).await?;
        Ok(Page::new(products, total, request))
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(*id))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Product, ProductError> {
        let update = self
            .repository
            .update_partial(id, &command)
            .await?
            .ok_or(ProductError::NotFound(*id))?;
        tracing::info!(product_id = %id, "Product updated");

        let changes = command.describe_changes(&update.previous);

        if !changes.is_empty() {
            self.record(
                "Edited product",
                format!("Edited product with changes: {}", changes),
                actor,
            )
            .await?;
        }

        Ok(update.current)
    }

    async fn delete_product(
        &self,
        id: &ProductId,
        actor: &AuthenticatedUser,
    ) -> Result<(), ProductError> {
        if !self.repository.soft_delete(id).await? {
            return Err(ProductError::NotFound(*id));
        }
        tracing::info!(product_id = %id, "Product deleted");

        self.record(
            "Deleted product",
            format!("Deleted product with ID: {}", id),
            actor,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::access::models::Role;
    use crate::domain::account::models::AccountId;
    use crate::domain::audit::errors::AuditError;
    use crate::domain::audit::models::AuditEntry;
    use crate::domain::audit::models::AuditEntryId;
    use crate::domain::product::models::Price;
    use crate::domain::product::models::ProductName;
    use crate::domain::product::models::ProductUpdate;
    use crate::domain::product::models::Stock;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn insert(&self, product: Product) -> Result<Product, ProductError>;
            async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;
            async fn update_partial(&self, id: &ProductId, command: &UpdateProductCommand) -> Result<Option<ProductUpdate>, ProductError>;
            async fn soft_delete(&self, id: &ProductId) -> Result<bool, ProductError>;
            async fn count_and_list(&self, request: &PageRequest) -> Result<(Vec<Product>, u64), ProductError>;
        }
    }

    mock! {
        pub TestAuditService {}

        #[async_trait]
        impl AuditServicePort for TestAuditService {
            async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry, AuditError>;
            async fn list_entries(&self, request: &PageRequest) -> Result<Page<AuditEntry>, AuditError>;
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            account_id: AccountId::new(),
            email: "admin@x.com".to_string(),
            role: Role::Admin,
        }
    }

    fn product(name: &str) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(),
            name: ProductName::new(name.to_string()).unwrap(),
            description: Some("Product Description".to_string()),
            price: Price::new(750.0).unwrap(),
            stock: Stock::new(20).unwrap(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn recorded(entry: NewAuditEntry) -> Result<AuditEntry, AuditError> {
        Ok(entry.into_entry(AuditEntryId::new(), Utc::now()))
    }

    fn create_command() -> CreateProductCommand {
        CreateProductCommand::new(
            ProductName::new("Samsung Galaxy Note 10".to_string()).unwrap(),
            None,
            Price::new(750.0).unwrap(),
            Stock::new(20).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_product_records_audit_entry() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();
        let actor = admin();
        let actor_id = actor.account_id;

        repository
            .expect_insert()
            .withf(|product| product.name.as_str() == "Samsung Galaxy Note 10" && !product.is_deleted())
            .times(1)
            .returning(|product| Ok(product));
        audit
            .expect_record()
            .withf(move |entry| {
                entry.title() == "Added new product"
                    && entry.action() == "Added new product with title \"Samsung Galaxy Note 10\""
                    && entry.entity() == "Product"
                    && entry.actor_id() == actor_id
            })
            .times(1)
            .returning(recorded);

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        let created = service.create_product(create_command(), &actor).await.unwrap();
        assert_eq!(created.stock.value(), 20);
    }

    #[tokio::test]
    async fn test_create_product_best_effort_audit_failure_still_succeeds() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();

        repository.expect_insert().returning(|product| Ok(product));
        audit
            .expect_record()
            .times(1)
            .returning(|_| Err(AuditError::DatabaseError("down".to_string())));

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        assert!(service.create_product(create_command(), &admin()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_product_strict_audit_failure_is_reported() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();

        repository.expect_insert().times(1).returning(|product| Ok(product));
        audit
            .expect_record()
            .returning(|_| Err(AuditError::DatabaseError("down".to_string())));

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::Strict);

        assert!(matches!(
            service.create_product(create_command(), &admin()).await,
            Err(ProductError::Audit(_))
        ));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut repository = MockTestProductRepository::new();
        repository.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = ProductService::new(
            Arc::new(repository),
            Arc::new(MockTestAuditService::new()),
            AuditPolicy::BestEffort,
        );

        let id = ProductId::new();
        assert!(matches!(
            service.get_product(&id).await,
            Err(ProductError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_update_product_records_changes() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();

        let original = product("Phone");
        let id = original.id;

        repository.expect_find_by_id().times(0);
        repository
            .expect_update_partial()
            .withf(move |candidate, _| *candidate == id)
            .times(1)
            .returning(move |_, command| {
                let mut current = original.clone();
                current.apply(command, Utc::now());
                Ok(Some(ProductUpdate {
                    previous: original.clone(),
                    current,
                }))
            });
        audit
            .expect_record()
            .withf(|entry| {
                entry.title() == "Edited product"
                    && entry.action()
                        == "Edited product with changes: name changed from \"Phone\" to \"Tablet\", stock changed from \"20\" to \"5\""
            })
            .times(1)
            .returning(recorded);

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        let command = UpdateProductCommand {
            name: Some(ProductName::new("Tablet".to_string()).unwrap()),
            stock: Some(Stock::new(5).unwrap()),
            ..Default::default()
        };
        let updated = service.update_product(&id, command, &admin()).await.unwrap();

        assert_eq!(updated.name.as_str(), "Tablet");
        assert_eq!(updated.stock.value(), 5);
        assert_eq!(updated.price.value(), 750.0);
    }

    #[tokio::test]
    async fn test_update_product_describes_the_row_it_replaced() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();

        // Another writer renamed the product to "Tablet" just before this update.
        let mut replaced = product("Phone");
        replaced.name = ProductName::new("Tablet".to_string()).unwrap();
        let id = replaced.id;

        repository.expect_find_by_id().times(0);
        repository
            .expect_update_partial()
            .times(1)
            .returning(move |_, command| {
                let mut current = replaced.clone();
                current.apply(command, Utc::now());
                Ok(Some(ProductUpdate {
                    previous: replaced.clone(),
                    current,
                }))
            });
        audit
            .expect_record()
            .withf(|entry| {
                entry.action()
                    == "Edited product with changes: name changed from \"Tablet\" to \"Watch\""
            })
            .times(1)
            .returning(recorded);

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        let command = UpdateProductCommand {
            name: Some(ProductName::new("Watch".to_string()).unwrap()),
            ..Default::default()
        };
        let updated = service.update_product(&id, command, &admin()).await.unwrap();
        assert_eq!(updated.name.as_str(), "Watch");
    }

    #[tokio::test]
    async fn test_update_product_without_changes_skips_audit() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();

        let original = product("Phone");
        let id = original.id;

        repository
            .expect_update_partial()
            .times(1)
            .returning(move |_, _| {
                Ok(Some(ProductUpdate {
                    previous: original.clone(),
                    current: original.clone(),
                }))
            });
        audit.expect_record().times(0);

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        let command = UpdateProductCommand {
            name: Some(ProductName::new("Phone".to_string()).unwrap()),
            ..Default::default()
        };
        assert!(service.update_product(&id, command, &admin()).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let mut repository = MockTestProductRepository::new();
        repository.expect_update_partial().times(1).returning(|_, _| Ok(None));

        let service = ProductService::new(
            Arc::new(repository),
            Arc::new(MockTestAuditService::new()),
            AuditPolicy::BestEffort,
        );

        let result = service
            .update_product(&ProductId::new(), UpdateProductCommand::default(), &admin())
            .await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_product_records_audit_entry() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();
        let id = ProductId::new();
        let expected_action = format!("Deleted product with ID: {}", id);

        repository
            .expect_soft_delete()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(|_| Ok(true));
        audit
            .expect_record()
            .withf(move |entry| entry.title() == "Deleted product" && entry.action() == expected_action)
            .times(1)
            .returning(recorded);

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        assert!(service.delete_product(&id, &admin()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_product_not_found() {
        let mut repository = MockTestProductRepository::new();
        let mut audit = MockTestAuditService::new();

        repository.expect_soft_delete().returning(|_| Ok(false));
        audit.expect_record().times(0);

        let service = ProductService::new(Arc::new(repository), Arc::new(audit), AuditPolicy::BestEffort);

        assert!(matches!(
            service.delete_product(&ProductId::new(), &admin()).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_products_builds_meta() {
        let mut repository = MockTestProductRepository::new();
        let products = vec![product("a"), product("b")];

        repository
            .expect_count_and_list()
            .times(1)
            .returning(move |_| Ok((products.clone(), 12)));

        let service = ProductService::new(
            Arc::new(repository),
            Arc::new(MockTestAuditService::new()),
            AuditPolicy::BestEffort,
        );

        let request = PageRequest::new(6, 2, None).unwrap();
        let page = service.list_products(&request).await.unwrap();

        assert_eq!(page.meta.items_on_page, 2);
        assert_eq!(page.meta.total_pages, 6);
        assert!(!page.meta.has_next_page);
        assert!(page.meta.has_previous_page);
    }
}
