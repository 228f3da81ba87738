use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_audit_entry::create_audit_entry;
use super::handlers::create_product::create_product;
use super::handlers::delete_product::delete_product;
use super::handlers::get_product::get_product;
use super::handlers::list_audit_entries::list_audit_entries;
use super::handlers::list_products::list_products;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_product::update_product;
use super::middleware::localize_errors;
use super::middleware::require_access;
use super::middleware::AccessGate;
use crate::domain::access::models::Operation;
use crate::domain::access::service::AccessControl;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::audit::ports::AuditServicePort;
use crate::domain::product::ports::ProductServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub audit_service: Arc<dyn AuditServicePort>,
    pub access_control: Arc<AccessControl>,
}

/// Put `route` behind the access gate for `operation`.
///
/// Every route goes through the gate; whether it actually requires a token
/// is decided by the `AccessPolicy`.
fn guarded(
    route: MethodRouter<AppState>,
    access_control: &Arc<AccessControl>,
    operation: Operation,
) -> MethodRouter<AppState> {
    let gate = AccessGate {
        access_control: Arc::clone(access_control),
        operation,
    };
    route.route_layer(middleware::from_fn_with_state(gate, require_access))
}

pub fn create_router(state: AppState) -> Router {
    let access = &state.access_control;

    let auth_routes = Router::new()
        .route(
            "/auth/signup",
            guarded(post(register), access, Operation::Register),
        )
        .route("/auth/login", guarded(post(login), access, Operation::Login));

    let product_routes = Router::new()
        .route(
            "/products",
            guarded(get(list_products), access, Operation::ListProducts)
                .merge(guarded(post(create_product), access, Operation::CreateProduct)),
        )
        .route(
            "/products/:id",
            guarded(get(get_product), access, Operation::GetProduct)
                .merge(guarded(put(update_product), access, Operation::UpdateProduct))
                .merge(guarded(delete(delete_product), access, Operation::DeleteProduct)),
        );

    let audit_routes = Router::new().route(
        "/logs",
        guarded(get(list_audit_entries), access, Operation::ListAuditEntries)
            .merge(guarded(post(create_audit_entry), access, Operation::CreateAuditEntry)),
    );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(product_routes)
        .merge(audit_routes)
        .layer(middleware::from_fn(localize_errors))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
