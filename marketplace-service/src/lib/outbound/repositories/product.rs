use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::ProductUpdate;
use crate::domain::product::models::Stock;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: f64,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(r.id),
            name: ProductName::new(r.name)?,
            description: r.description,
            price: Price::new(r.price)?,
            stock: Stock::new(i64::from(r.stock))?,
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: r.deleted_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price.value())
        .bind(product.stock.value())
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at, updated_at, deleted_at
            FROM products
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn update_partial(
        &self,
        id: &ProductId,
        command: &UpdateProductCommand,
    ) -> Result<Option<ProductUpdate>, ProductError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Row lock held until commit; a concurrent update waits here.
        let previous = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at, updated_at, deleted_at
            FROM products
            WHERE id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        let Some(previous) = previous else {
            return Ok(None);
        };

        let current = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock = COALESCE($5, stock),
                updated_at = $6
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, description, price, stock, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id.0)
        .bind(command.name.as_ref().map(ProductName::as_str))
        .bind(command.description.as_deref())
        .bind(command.price.map(|price| price.value()))
        .bind(command.stock.map(|stock| stock.value()))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(Some(ProductUpdate {
            previous: Product::try_from(previous)?,
            current: Product::try_from(current)?,
        }))
    }

    async fn soft_delete(&self, id: &ProductId) -> Result<bool, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_and_list(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<Product>, u64), ProductError> {
        let pattern = request.search().map(|term| term.like_pattern());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at, updated_at, deleted_at
            FROM products
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((products, total.max(0) as u64))
    }
}
