use std::sync::Arc;

use async_trait::async_trait;
use authkit::Authenticator;
use authkit::TokenError;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Authentication flow over a user directory.
///
/// Pure orchestration: borrows records from the repository for the
/// duration of one operation and keeps no state between calls. Tokens
/// carry everything needed for re-validation, so two concurrent logins
/// for the same username each yield an independently valid token.
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
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "account registered");
        Ok(created)
    }

    async fn login(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<(Account, String), AccountError> {
        // Unknown username and wrong password collapse into the same
        // public outcome; only the log records which one it was.
        let account = match self.repository.find_by_username(username).await? {
            Some(account) => account,
            None => {
                tracing::info!(username = %username, "login rejected: unknown username");
                return Err(AccountError::InvalidCredentials);
            }
        };

        if !self.authenticator.verify_password(password, &account.password_hash) {
            tracing::info!(account_id = %account.id, "login rejected: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .authenticator
            .issue_token(&account.id.to_string())
            .map_err(|e| {
                tracing::error!(account_id = %account.id, error = %e, "token issuance failed");
                AccountError::TokenIssuance(e.to_string())
            })?;

        tracing::info!(account_id = %account.id, "login succeeded");
        Ok((account, token))
    }

    async fn authorize(&self, token: &str) -> Result<Account, AccountError> {
        let claims = self.authenticator.verify_token(token).map_err(|e| {
            match e {
                TokenError::Expired => tracing::info!("token rejected: expired"),
                ref suspicious => {
                    tracing::warn!(error = %suspicious, "token rejected as suspicious")
                }
            }
            AccountError::Unauthorized
        })?;

        let id = AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "token subject is not a valid account id");
            AccountError::Unauthorized
        })?;

        // Re-fetch the live record; a subject removed after issuance must
        // not authenticate.
        match self.repository.find_by_id(&id).await? {
            Some(account) => Ok(account),
            None => {
                tracing::warn!(account_id = %id, "token subject no longer exists");
                Err(AccountError::Unauthorized)
            }
        }
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        // A valid token is not enough for sensitive changes; the caller
        // must prove current knowledge of the secret. Applies to every
        // update, email-only ones included.
        if !self
            .authenticator
            .verify_password(&command.current_password, &account.password_hash)
        {
            tracing::info!(account_id = %id, "profile update rejected: current password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        if let Some(new_email) = command.email {
            account.email = new_email;
        }

        if let Some(new_password) = command.password {
            account.password_hash = self.authenticator.hash_password(&new_password)?;
        }

        let updated = self.repository.update(account).await?;
        tracing::info!(account_id = %updated.id, "account updated");
        Ok(updated)
    }
}
