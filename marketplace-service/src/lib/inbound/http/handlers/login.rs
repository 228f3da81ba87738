use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::json_body;
use super::register::AuthenticatedAccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub const LOGGED_IN: &str = "user is logged in successfully";

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticatedAccountData>, ApiError> {
    let body = json_body(payload)?;
    let command = LoginCommand::new(body.email, body.password)?;

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::with_message(StatusCode::CREATED, LOGGED_IN, account.into()))
}

/// HTTP request body for login (raw JSON)
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    email: String,
    password: String,
}
