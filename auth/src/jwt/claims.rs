use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Who a token speaks for: a snapshot taken at issuance time.
///
/// Role changes made after a token is minted are not reflected until the
/// holder authenticates again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
    pub role: String,
}

impl Identity {
    pub fn new(subject_id: impl ToString, email: impl ToString, role: impl ToString) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }
}

/// Wire form of the token payload.
///
/// All fields are required; a token missing any of them fails decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `identity` valid for `ttl` from now.
    ///
    /// A negative `ttl` yields claims that are already expired.
    pub fn issue(identity: &Identity, ttl: Duration) -> Self {
        Self::issue_at(identity, ttl, Utc::now())
    }

    /// Build claims for `identity` as if issued at `issued_at`.
    pub fn issue_at(identity: &Identity, ttl: Duration, issued_at: DateTime<Utc>) -> Self {
        Self {
            sub: identity.subject_id.clone(),
            email: identity.email.clone(),
            role: identity.role.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Identity carried by these claims, without the timing fields.
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }

    /// Check if the claims are past their expiry at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn identity() -> Identity {
        Identity::new("0b6f2f9e-4d0e-4c55-9d7b-6f1f2c1d9a10", "a@x.com", "user")
    }

    #[test]
    fn test_issue_at_sets_timing_fields() {
        let issued_at = Utc.with_ymd_and_hms(2025, 1, 13, 22, 0, 0).unwrap();
        let claims = Claims::issue_at(&identity(), Duration::hours(24), issued_at);

        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.identity(), identity());
    }

    #[test]
    fn test_negative_ttl_is_already_expired() {
        let claims = Claims::issue(&identity(), Duration::seconds(-1));
        assert!(claims.is_expired(Utc::now().timestamp()));
    }

    #[test]
    fn test_is_expired_boundary() {
        let issued_at = Utc.timestamp_opt(1_000, 0).unwrap();
        let claims = Claims::issue_at(&identity(), Duration::seconds(0), issued_at);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1_000));
        assert!(claims.is_expired(1_001));
    }

    #[test]
    fn test_wire_field_names() {
        let claims = Claims::issue(&identity(), Duration::hours(1));
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["sub"], "0b6f2f9e-4d0e-4c55-9d7b-6f1f2c1d9a10");
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["role"], "user");
        assert!(value["iat"].is_i64());
        assert!(value["exp"].is_i64());
    }
}
