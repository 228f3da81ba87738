use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::page_query;
use super::ApiError;
use super::ApiSuccess;
use super::PageQuery;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageMeta;
use crate::domain::product::models::Product;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ApiSuccess<ProductListData>, ApiError> {
    let request = page_query(query)?;

    state
        .product_service
        .list_products(&request)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListData {
    pub meta: PageMeta,
    pub products: Vec<ProductSummary>,
}

impl From<Page<Product>> for ProductListData {
    fn from(page: Page<Product>) -> Self {
        let page = page.map(|product| ProductSummary::from(&product));
        Self {
            meta: page.meta,
            products: page.items,
        }
    }
}

/// Listing row; the description is only returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            price: product.price.value(),
            stock: product.stock.value(),
            created_at: product.created_at,
        }
    }
}
