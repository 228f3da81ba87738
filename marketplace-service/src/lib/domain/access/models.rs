use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::access::errors::RoleError;
use crate::domain::account::models::AccountId;

/// Role carried by every account and every token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Every operation reachable through an inbound adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    Login,
    CreateProduct,
    ListProducts,
    GetProduct,
    UpdateProduct,
    DeleteProduct,
    CreateAuditEntry,
    ListAuditEntries,
}

/// Roles permitted to perform an operation.
///
/// An empty set places no restriction on role; the caller only has to be
/// authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn any_authenticated() -> Self {
        Self(BTreeSet::new())
    }

    pub fn only(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    pub fn permits(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}

/// Mapping from operation to the roles required to perform it.
///
/// Operations without an entry are public and skip both gates.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    requirements: HashMap<Operation, RoleSet>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the roles required for `operation`, replacing any earlier entry.
    pub fn require(mut self, operation: Operation, roles: RoleSet) -> Self {
        self.requirements.insert(operation, roles);
        self
    }

    pub fn requirement(&self, operation: Operation) -> Option<&RoleSet> {
        self.requirements.get(&operation)
    }

    /// Product mutations and the audit trail endpoints are admin-only.
    /// Registration, login and product reads are public.
    pub fn marketplace_default() -> Self {
        let admin = || RoleSet::only([Role::Admin]);

        Self::new()
            .require(Operation::CreateProduct, admin())
            .require(Operation::UpdateProduct, admin())
            .require(Operation::DeleteProduct, admin())
            .require(Operation::CreateAuditEntry, admin())
            .require(Operation::ListAuditEntries, admin())
    }
}

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub account_id: AccountId,
    pub email: String,
    pub role: Role,
}

/// Outcome of a successful pass through the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The operation is public; no token was inspected.
    Anonymous,
    Authenticated(AuthenticatedUser),
}
