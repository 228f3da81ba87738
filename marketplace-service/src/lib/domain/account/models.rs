use std::fmt;
use std::str::FromStr;

use auth::Identity;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::models::Role;
use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;

/// Registered account.
///
/// Holds the credential used at login and the role embedded in every token
/// minted for it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Claims snapshot for token issuance.
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, &self.email, self.role)
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser and stored exactly as given, so
/// uniqueness is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is blank
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.trim().is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plain-text password that satisfies the registration policy.
///
/// 8 to 16 characters drawn from ASCII letters, digits, `_` and a fixed set
/// of punctuation.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 16;
    const SYMBOLS: &'static str = "!@#$%^&*()+-=[]{};':\"\\|,.<>/?";

    /// Validate a password against the registration policy.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 16 characters
    /// * `InvalidCharacters` - Contains a character outside the allowed set
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length == 0 {
            return Err(PasswordPolicyError::Empty);
        }
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !password.chars().all(Self::is_allowed) {
            return Err(PasswordPolicyError::InvalidCharacters);
        }

        Ok(Self(password))
    }

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || Self::SYMBOLS.contains(c)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the plain text out of logs.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new account
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub role: Role,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, password: Password, role: Role) -> Self {
        Self {
            email,
            password,
            role,
        }
    }
}

/// Command to log in with raw credentials.
///
/// Only presence is checked here. Format problems are reported as invalid
/// credentials by the service so login reveals nothing about accounts.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    /// # Errors
    /// * `EmailError::Empty` - Email is blank
    /// * `PasswordPolicyError::Empty` - Password is empty
    pub fn new(
        email: String,
        password: String,
    ) -> Result<Self, crate::domain::account::errors::AccountError> {
        if email.trim().is_empty() {
            return Err(EmailError::Empty.into());
        }
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty.into());
        }
        Ok(Self { email, password })
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub id: AccountId,
    pub email: EmailAddress,
    pub role: Role,
    pub token: String,
}
