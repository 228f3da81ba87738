use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::access::models::Role;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub const REGISTERED: &str = "user is registered successfully";

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticatedAccountData>, ApiError> {
    let command = json_body(payload)?.try_into_command()?;

    state
        .account_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::with_message(StatusCode::CREATED, REGISTERED, account.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    email: String,
    password: String,
    role: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AccountError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let role = match self.role {
            Some(role) => role.parse::<Role>()?,
            None => Role::default(),
        };
        Ok(RegisterCommand::new(email, password, role))
    }
}

/// Response data shared by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedAccountData {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl From<&AuthenticatedAccount> for AuthenticatedAccountData {
    fn from(account: &AuthenticatedAccount) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            role: account.role,
            token: account.token.clone(),
        }
    }
}
