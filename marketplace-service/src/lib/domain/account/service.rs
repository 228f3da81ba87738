use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for registration and login.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token minting
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue(&self, account: Account) -> Result<AuthenticatedAccount, AccountError> {
        let token = self
            .authenticator
            .issue_token(&account.identity())
            .map_err(|e| AccountError::Token(e.to_string()))?;

        Ok(AuthenticatedAccount {
            id: account.id,
            email: account.email,
            role: account.role,
            token,
        })
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedAccount, AccountError> {
        // Fast path only; the repository enforces uniqueness on insert.
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(AccountError::AlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        let created = self.repository.insert(account).await?;
        tracing::info!(account_id = %created.id, role = %created.role, "Account registered");

        self.issue(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedAccount, AccountError> {
        let Ok(email) = EmailAddress::new(command.email) else {
            self.authenticator.reject(&command.password);
            return Err(AccountError::InvalidCredentials);
        };

        let Some(account) = self.repository.find_by_email(&email).await? else {
            tracing::warn!("Login attempt for unknown email");
            self.authenticator.reject(&command.password);
            return Err(AccountError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &account.password_hash, &account.identity())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(account_id = %account.id, "Login attempt with wrong password");
                    AccountError::InvalidCredentials
                }
                AuthenticationError::PasswordError(e) => AccountError::Hashing(e.to_string()),
                AuthenticationError::JwtError(e) => AccountError::Token(e.to_string()),
            })?;

        Ok(AuthenticatedAccount {
            id: account.id,
            email: account.email,
            role: account.role,
            token: result.access_token,
        })
    }
}
