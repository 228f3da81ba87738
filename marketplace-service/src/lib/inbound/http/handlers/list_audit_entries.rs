use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::create_audit_entry::AuditEntryData;
use super::page_query;
use super::ApiError;
use super::ApiSuccess;
use super::PageQuery;
use crate::domain::audit::models::AuditEntry;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageMeta;
use crate::inbound::http::router::AppState;

pub async fn list_audit_entries(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ApiSuccess<AuditListData>, ApiError> {
    let request = page_query(query)?;

    state
        .audit_service
        .list_entries(&request)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditListData {
    pub meta: PageMeta,
    pub logs: Vec<AuditEntryData>,
}

impl From<Page<AuditEntry>> for AuditListData {
    fn from(page: Page<AuditEntry>) -> Self {
        let page = page.map(|entry| AuditEntryData::from(&entry));
        Self {
            meta: page.meta,
            logs: page.items,
        }
    }
}
