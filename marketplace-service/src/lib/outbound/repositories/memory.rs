//! In-memory repositories.
//!
//! Back the integration tests and local runs without PostgreSQL. They honour
//! the same contracts as the SQL adapters: email uniqueness is checked and
//! written under one lock, soft-deleted products are invisible, and lists
//! come back newest first.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;
use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditEntry;
use crate::domain::audit::ports::AuditRepository;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductUpdate;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;

/// Newest first; among equal timestamps the later insert wins.
fn page_of<T: Clone>(
    rows: &[T],
    request: &PageRequest,
    created_at: impl Fn(&T) -> chrono::DateTime<Utc>,
    matches: impl Fn(&T) -> bool,
) -> (Vec<T>, u64) {
    let mut hits: Vec<(usize, &T)> = rows.iter().enumerate().filter(|(_, row)| matches(*row)).collect();
    hits.sort_by_key(|(index, row)| Reverse((created_at(*row), *index)));

    let total = hits.len() as u64;
    let page = hits
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
        .map(|(_, row)| row.clone())
        .collect();

    (page, total)
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::AlreadyExists(account.email.to_string()));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    // Insertion order is kept so ties on created_at sort deterministically.
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> Result<Product, ProductError> {
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.id == *id && !p.is_deleted())
            .cloned())
    }

    async fn update_partial(
        &self,
        id: &ProductId,
        command: &UpdateProductCommand,
    ) -> Result<Option<ProductUpdate>, ProductError> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == *id && !p.is_deleted()) else {
            return Ok(None);
        };

        let previous = product.clone();
        product.apply(command, Utc::now());
        Ok(Some(ProductUpdate {
            previous,
            current: product.clone(),
        }))
    }

    async fn soft_delete(&self, id: &ProductId) -> Result<bool, ProductError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == *id && !p.is_deleted()) {
            Some(product) => {
                product.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_and_list(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<Product>, u64), ProductError> {
        let products = self.products.read().await;
        Ok(page_of(
            &products,
            request,
            |p| p.created_at,
            |p| {
                !p.is_deleted()
                    && request.search().map_or(true, |term| {
                        term.matches_any([p.name.as_str(), p.description.as_deref().unwrap_or_default()])
                    })
            },
        ))
    }
}

#[derive(Default)]
pub struct InMemoryAuditRepository {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append(&self, entry: AuditEntry) -> Result<AuditEntry, AuditError> {
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn count_and_list(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<AuditEntry>, u64), AuditError> {
        let entries = self.entries.read().await;
        Ok(page_of(
            &entries,
            request,
            |e| e.created_at,
            |e| {
                request
                    .search()
                    .map_or(true, |term| term.matches_any([e.title.as_str(), e.action.as_str()]))
            },
        ))
    }
}
