use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtError;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AccessDecision;
use crate::domain::access::models::AccessPolicy;
use crate::domain::access::models::AuthenticatedUser;
use crate::domain::access::models::Operation;
use crate::domain::access::models::RoleSet;
use crate::domain::account::models::AccountId;

const BEARER_PREFIX: &str = "Bearer ";

/// Two-stage request gate: authentication, then authorization.
///
/// The policy is an ordinary value handed in at construction, so every
/// route's requirement is visible in one place.
pub struct AccessControl {
    authenticator: Arc<Authenticator>,
    policy: AccessPolicy,
}

impl AccessControl {
    pub fn new(authenticator: Arc<Authenticator>, policy: AccessPolicy) -> Self {
        Self {
            authenticator,
            policy,
        }
    }

    /// Run both gates for `operation`.
    ///
    /// # Arguments
    /// * `operation` - Operation the request targets
    /// * `authorization` - Raw `Authorization` header value, if present
    ///
    /// # Returns
    /// `Anonymous` for public operations, otherwise the authenticated caller
    ///
    /// # Errors
    /// * `Unauthenticated` - Header missing, wrong scheme or token invalid
    /// * `TokenExpired` - Token is past its expiry
    /// * `Forbidden` - Caller's role is not permitted
    pub fn check(
        &self,
        operation: Operation,
        authorization: Option<&str>,
    ) -> Result<AccessDecision, AccessError> {
        let Some(roles) = self.policy.requirement(operation) else {
            return Ok(AccessDecision::Anonymous);
        };

        let user = self.authenticate(authorization)?;
        Self::authorize(&user, operation, roles)?;

        Ok(AccessDecision::Authenticated(user))
    }

    /// Resolve a bearer header into the caller's identity.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AccessError> {
        let token = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AccessError::Unauthenticated)?;

        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            match e {
                JwtError::TokenExpired => AccessError::TokenExpired,
                _ => AccessError::Unauthenticated,
            }
        })?;

        Self::user_from_claims(claims)
    }

    fn user_from_claims(claims: Claims) -> Result<AuthenticatedUser, AccessError> {
        // Claims come from a token we signed, so a mismatch here means the
        // issuing side and this side disagree about the schema.
        let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not an account id");
            AccessError::Unauthenticated
        })?;
        let role = claims.role.parse().map_err(|e| {
            tracing::warn!(error = %e, "Token carries an unknown role");
            AccessError::Unauthenticated
        })?;

        Ok(AuthenticatedUser {
            account_id,
            email: claims.email,
            role,
        })
    }

    fn authorize(
        user: &AuthenticatedUser,
        operation: Operation,
        roles: &RoleSet,
    ) -> Result<(), AccessError> {
        if roles.permits(user.role) {
            return Ok(());
        }

        tracing::warn!(
            account_id = %user.account_id,
            role = %user.role,
            ?operation,
            "Forbidden operation"
        );
        Err(AccessError::Forbidden {
            role: user.role,
            operation,
        })
    }
}
