use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and mint its first token.
    ///
    /// # Arguments
    /// * `command` - Validated email, password and role
    ///
    /// # Returns
    /// Account id, email, role and a bearer token
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Hashing` / `Token` - Credential infrastructure failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand)
        -> Result<AuthenticatedAccount, AccountError>;

    /// Verify credentials and mint a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, never distinguished
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedAccount, AccountError>;
}

/// Persistence operations for accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by exact email match.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Persist a new account.
    ///
    /// Uniqueness of the email is enforced here, atomically with the write.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;
}
