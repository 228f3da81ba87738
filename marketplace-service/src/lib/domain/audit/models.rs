use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::models::AuthenticatedUser;
use crate::domain::access::models::Role;
use crate::domain::account::models::AccountId;
use crate::domain::audit::errors::AuditFieldError;

/// Immutable record of a mutation: who did what, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub title: String,
    pub action: String,
    pub entity: String,
    pub actor_id: AccountId,
    pub actor_role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuditEntryId(pub Uuid);

impl AuditEntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AuditEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated entry waiting to be appended.
///
/// The id and timestamp are assigned by the audit service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    title: String,
    action: String,
    entity: String,
    actor_id: AccountId,
    actor_role: Option<Role>,
}

impl NewAuditEntry {
    /// # Errors
    /// * `MissingTitle` / `MissingAction` / `MissingEntity` - Field is blank
    pub fn new(
        title: impl Into<String>,
        action: impl Into<String>,
        entity: impl Into<String>,
        actor: &AuthenticatedUser,
    ) -> Result<Self, AuditFieldError> {
        let title = required(title.into(), AuditFieldError::MissingTitle)?;
        let action = required(action.into(), AuditFieldError::MissingAction)?;
        let entity = required(entity.into(), AuditFieldError::MissingEntity)?;

        Ok(Self {
            title,
            action,
            entity,
            actor_id: actor.account_id,
            actor_role: Some(actor.role),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn actor_id(&self) -> AccountId {
        self.actor_id
    }

    pub fn actor_role(&self) -> Option<Role> {
        self.actor_role
    }

    pub(crate) fn into_entry(self, id: AuditEntryId, created_at: DateTime<Utc>) -> AuditEntry {
        AuditEntry {
            id,
            title: self.title,
            action: self.action,
            entity: self.entity,
            actor_id: self.actor_id,
            actor_role: self.actor_role,
            created_at,
        }
    }
}

fn required(value: String, error: AuditFieldError) -> Result<String, AuditFieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_string())
    }
}
