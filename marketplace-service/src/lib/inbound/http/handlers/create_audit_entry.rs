use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::access::models::AuthenticatedUser;
use crate::domain::access::models::Role;
use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditEntry;
use crate::domain::audit::models::NewAuditEntry;
use crate::inbound::http::router::AppState;

pub async fn create_audit_entry(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateAuditEntryRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuditEntryData>, ApiError> {
    let body = json_body(payload)?;
    let entry = NewAuditEntry::new(body.title, body.action, body.entity, &actor)
        .map_err(AuditError::from)?;

    state
        .audit_service
        .record(entry)
        .await
        .map_err(ApiError::from)
        .map(|ref entry| ApiSuccess::new(StatusCode::CREATED, entry.into()))
}

/// HTTP request body for a manual audit entry (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateAuditEntryRequest {
    title: String,
    action: String,
    entity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntryData {
    pub id: String,
    pub title: String,
    pub action: String,
    pub entity: String,
    pub actor_id: String,
    pub actor_role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<&AuditEntry> for AuditEntryData {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            action: entry.action.clone(),
            entity: entry.entity.clone(),
            actor_id: entry.actor_id.to_string(),
            actor_role: entry.actor_role,
            created_at: entry.created_at,
        }
    }
}
