use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::get_product::parse_product_id;
use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::access::models::AuthenticatedUser;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Stock;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::router::AppState;

pub const PRODUCT_UPDATED: &str = "product is updated successfully";

pub async fn update_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<ApiSuccess<UpdatedProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;
    let command = json_body(payload)?.try_into_command()?;

    state
        .product_service
        .update_product(&product_id, command, &actor)
        .await
        .map_err(ApiError::from)
        .map(|product| {
            ApiSuccess::with_message(
                StatusCode::OK,
                PRODUCT_UPDATED,
                UpdatedProductData {
                    id: product.id.to_string(),
                },
            )
        })
}

/// HTTP request body for a partial product update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateProductRequest {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    stock: Option<i64>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        Ok(UpdateProductCommand {
            name: self.name.map(ProductName::new).transpose()?,
            description: self.description,
            price: self.price.map(Price::new).transpose()?,
            stock: self.stock.map(Stock::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedProductData {
    pub id: String,
}
