use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::access::models::AccessDecision;
use crate::domain::access::models::Operation;
use crate::domain::access::service::AccessControl;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ErrorPayload;
use crate::inbound::http::locale::Language;

/// Middleware state binding the access gate to one operation.
#[derive(Clone)]
pub struct AccessGate {
    pub access_control: Arc<AccessControl>,
    pub operation: Operation,
}

/// Run the access gate for the route's operation.
///
/// On success the authenticated caller, if any, is stored in the request
/// extensions as an `AuthenticatedUser`.
pub async fn require_access(
    State(gate): State<AccessGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let decision = gate.access_control.check(gate.operation, authorization)?;

    if let AccessDecision::Authenticated(user) = decision {
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

/// Re-render error envelopes in the language named by the `lang` header.
pub async fn localize_errors(request: Request, next: Next) -> Response {
    let language = Language::from_headers(request.headers());
    let response = next.run(request).await;

    if language == Language::English {
        return response;
    }

    match response.extensions().get::<ErrorPayload>().copied() {
        Some(payload) => ApiError::render(payload, language),
        None => response,
    }
}
