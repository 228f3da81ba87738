use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_product::ProductData;
use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::access::models::AuthenticatedUser;
use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::errors::StockError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Stock;
use crate::inbound::http::router::AppState;

pub const PRODUCT_CREATED: &str = "product is created successfully";

pub async fn create_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let command = json_body(payload)?.try_into_command()?;

    state
        .product_service
        .create_product(command, &actor)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::with_message(StatusCode::CREATED, PRODUCT_CREATED, product.into()))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateProductRequest {
    name: String,
    description: Option<String>,
    price: Option<f64>,
    stock: Option<i64>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        let name = ProductName::new(self.name)?;
        // A missing number fails the same way as a non-positive one.
        let price = Price::new(self.price.ok_or(PriceError::NotPositive(0.0))?)?;
        let stock = Stock::new(self.stock.ok_or(StockError::NotPositive(0))?)?;
        Ok(CreateProductCommand::new(name, self.description, price, stock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: Option<f64>, stock: Option<i64>) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: None,
            price,
            stock,
        }
    }

    #[test]
    fn test_valid_request_builds_command() {
        let command = request("  Lamp ", Some(19.5), Some(3))
            .try_into_command()
            .unwrap();
        assert_eq!(command.name.as_str(), "Lamp");
        assert_eq!(command.price.value(), 19.5);
        assert_eq!(command.stock.value(), 3);
    }

    #[test]
    fn test_missing_or_bad_fields() {
        assert!(matches!(
            request("", Some(1.0), Some(1)).try_into_command(),
            Err(ProductError::InvalidName(_))
        ));
        assert!(matches!(
            request("Lamp", None, Some(1)).try_into_command(),
            Err(ProductError::InvalidPrice(_))
        ));
        assert!(matches!(
            request("Lamp", Some(-2.0), Some(1)).try_into_command(),
            Err(ProductError::InvalidPrice(_))
        ));
        assert!(matches!(
            request("Lamp", Some(1.0), Some(0)).try_into_command(),
            Err(ProductError::InvalidStock(_))
        ));
    }
}
