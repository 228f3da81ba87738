use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const DUMMY_PASSWORD: &str = "no-account-has-this-password";

/// Authentication coordinator combining password verification and token minting.
///
/// Built once at startup from configuration (secret and token lifetime) and
/// shared by handle; it holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    /// Digest checked when there is no stored hash, so a miss costs the same
    /// Argon2 work as a wrong password.
    dummy_hash: Option<String>,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of every minted token
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let password_hasher = PasswordHasher::new();
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD).ok();

        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
            dummy_hash,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a token for `identity`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login that has no stored hash to check against.
    ///
    /// Runs a full Argon2 verification of `password` against a fixed digest
    /// and always returns `InvalidCredentials`.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        match &self.dummy_hash {
            Some(hash) => {
                let _ = self.password_hasher.verify(password, hash);
            }
            None => {
                let _ = self.password_hasher.hash(password);
            }
        }
        AuthenticationError::InvalidCredentials
    }

    /// Mint a token without password verification.
    ///
    /// Used right after registration, where the caller has just chosen the
    /// password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, identity: &Identity) -> Result<String, JwtError> {
        self.jwt_handler.mint(identity, self.token_ttl)
    }

    /// Validate and decode a bearer token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidToken` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }
}
