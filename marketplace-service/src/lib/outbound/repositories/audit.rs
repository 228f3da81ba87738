use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::access::models::Role;
use crate::domain::account::models::AccountId;
use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditEntry;
use crate::domain::audit::models::AuditEntryId;
use crate::domain::audit::ports::AuditRepository;
use crate::domain::pagination::PageRequest;

pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: Uuid,
    title: String,
    action: String,
    entity: String,
    actor_id: Uuid,
    actor_role: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = AuditError;

    fn try_from(r: AuditRow) -> Result<Self, Self::Error> {
        let actor_role = r
            .actor_role
            .map(|role| role.parse::<Role>())
            .transpose()
            .map_err(|e| AuditError::DatabaseError(format!("Corrupt actor role: {}", e)))?;

        Ok(AuditEntry {
            id: AuditEntryId(r.id),
            title: r.title,
            action: r.action,
            entity: r.entity,
            actor_id: AccountId(r.actor_id),
            actor_role,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append(&self, entry: AuditEntry) -> Result<AuditEntry, AuditError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, title, action, entity, actor_id, actor_role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id.0)
        .bind(&entry.title)
        .bind(&entry.action)
        .bind(&entry.entity)
        .bind(entry.actor_id.0)
        .bind(entry.actor_role.map(|role| role.as_str()))
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        Ok(entry)
    }

    async fn count_and_list(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<AuditEntry>, u64), AuditError> {
        let pattern = request.search().map(|term| term.like_pattern());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM audit_logs
            WHERE $1::text IS NULL OR title ILIKE $1 OR action ILIKE $1
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT id, title, action, entity, actor_id, actor_role, created_at
            FROM audit_logs
            WHERE $1::text IS NULL OR title ILIKE $1 OR action ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        let entries = rows
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((entries, total.max(0) as u64))
    }
}
