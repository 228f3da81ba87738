use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::access::errors::AccessError;
use crate::domain::account::errors::AccountError;
use crate::domain::audit::errors::AuditError;
use crate::domain::errors::ErrorKey;
use crate::domain::pagination::PageError;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::inbound::http::locale::translate;
use crate::inbound::http::locale::Language;

pub mod create_audit_entry;
pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_audit_entries;
pub mod list_products;
pub mod login;
pub mod register;
pub mod update_product;

pub const OPERATION_SUCCEEDED: &str = "OPERATION_SUCCESSED";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    /// Success with the generic read message.
    pub fn new(status: StatusCode, data: T) -> Self {
        Self::with_message(status, OPERATION_SUCCEEDED, data)
    }

    pub fn with_message(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }

    pub fn status(&self) -> StatusCode {
        self.0
    }

    pub fn data(&self) -> &T {
        &self.1 .0.data
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: bool,
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            status: true,
            message: message.to_string(),
            data,
        }
    }
}

/// Empty `data` object for operations with nothing to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyData {}

/// Failure crossing the HTTP boundary.
///
/// Only the key travels to the client. The detail carried by
/// `InternalServerError` is logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(ErrorKey),
    Unauthorized(ErrorKey),
    Forbidden(ErrorKey),
    NotFound(ErrorKey),
    UnprocessableEntity(ErrorKey),
    InternalServerError(String),
}

/// Status and key of a rendered error, left in the response extensions so
/// outer middleware can re-render it in another language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPayload {
    pub status: StatusCode,
    pub key: ErrorKey,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn key(&self) -> ErrorKey {
        match self {
            ApiError::BadRequest(key)
            | ApiError::Unauthorized(key)
            | ApiError::Forbidden(key)
            | ApiError::NotFound(key)
            | ApiError::UnprocessableEntity(key) => *key,
            ApiError::InternalServerError(_) => ErrorKey::InternalServerError,
        }
    }

    /// Render the error envelope for `payload` in `language`.
    pub fn render(payload: ErrorPayload, language: Language) -> Response {
        let message = translate(payload.key, language).to_string();
        let body = ApiErrorBody {
            status: false,
            status_code: payload.status.as_u16(),
            message: message.clone(),
            errors: vec![ApiErrorDetail {
                key: payload.key.as_str(),
                message,
            }],
        };

        let mut response = (payload.status, Json(body)).into_response();
        response.extensions_mut().insert(payload);
        response
    }

    fn internal(detail: impl ToString) -> Self {
        ApiError::InternalServerError(detail.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InternalServerError(detail) = &self {
            tracing::error!(error = %detail, "Internal server error");
        }

        let payload = ErrorPayload {
            status: self.status(),
            key: self.key(),
        };
        Self::render(payload, Language::English)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status: bool,
    status_code: u16,
    message: String,
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorDetail {
    key: &'static str,
    message: String,
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let key = err.key();
        match err {
            AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidRole(_)
            | AccountError::AlreadyExists(_) => ApiError::UnprocessableEntity(key),
            AccountError::InvalidCredentials => ApiError::Unauthorized(key),
            AccountError::Hashing(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated | AccessError::TokenExpired => {
                ApiError::Unauthorized(err.key())
            }
            AccessError::Forbidden { .. } => ApiError::Forbidden(err.key()),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        let key = err.key();
        match err {
            ProductError::InvalidProductId(_) => ApiError::BadRequest(key),
            ProductError::InvalidName(_)
            | ProductError::InvalidPrice(_)
            | ProductError::InvalidStock(_)
            | ProductError::InvalidPage(_) => ApiError::UnprocessableEntity(key),
            ProductError::NotFound(_) => ApiError::NotFound(key),
            ProductError::Audit(_) | ProductError::DatabaseError(_) | ProductError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        let key = err.key();
        match err {
            AuditError::InvalidEntry(_) | AuditError::InvalidPage(_) => {
                ApiError::UnprocessableEntity(key)
            }
            AuditError::DatabaseError(_) | AuditError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::UnprocessableEntity(err.key())
    }
}

/// Unwrap a JSON body, reporting any extraction failure in the envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::UnprocessableEntity(ErrorKey::BodyIsInvalid)
    })
}

/// Query string shared by every list endpoint.
///
/// Values are taken as text so that a malformed number is reported with the
/// pagination keys rather than a generic query rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    page: Option<String>,
    page_size: Option<String>,
    search: Option<String>,
}

/// Unwrap a page query, reporting a malformed query string in the envelope.
pub fn page_query(query: Result<Query<PageQuery>, QueryRejection>) -> Result<PageRequest, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected query string");
        ApiError::UnprocessableEntity(ErrorKey::PageIsInvalid)
    })?;
    query.into_page_request()
}

impl PageQuery {
    pub fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let page = parse_number(self.page, ErrorKey::PageIsInvalid)?;
        let page_size = parse_number(self.page_size, ErrorKey::PageSizeIsInvalid)?;
        Ok(PageRequest::from_parts(page, page_size, self.search)?)
    }
}

fn parse_number(raw: Option<String>, key: ErrorKey) -> Result<Option<i64>, ApiError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ApiError::UnprocessableEntity(key)),
    }
}
