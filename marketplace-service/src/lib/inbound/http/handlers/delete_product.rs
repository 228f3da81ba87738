use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::get_product::parse_product_id;
use super::ApiError;
use super::ApiSuccess;
use super::EmptyData;
use crate::domain::access::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub const PRODUCT_DELETED: &str = "product is deleted successfully";

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<EmptyData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .delete_product(&product_id, &actor)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::with_message(StatusCode::OK, PRODUCT_DELETED, EmptyData {}))
}
