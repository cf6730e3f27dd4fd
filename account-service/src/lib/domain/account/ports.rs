use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// # Errors
    /// * `InvalidPassword` - Password is empty or oversized
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Identifier taken
    /// * `DatabaseError` - Persistence failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue an access token.
    ///
    /// Unknown usernames and wrong passwords both surface as
    /// `InvalidCredentials`; a caller cannot tell which identifiers exist.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or password mismatch
    /// * `TokenIssuance` - Token could not be minted
    /// * `DatabaseError` - Persistence failed
    async fn login(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<(Account, String), AccountError>;

    /// Resolve a bearer token into the live account it identifies.
    ///
    /// Verifies signature and expiry, then re-fetches the account so the
    /// caller always sees current state (a deleted subject is rejected).
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, or subject gone
    /// * `DatabaseError` - Persistence failed
    async fn authorize(&self, token: &str) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Persistence failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Update the mutable fields of an account.
    ///
    /// Re-verifies the supplied current password against the stored hash
    /// before any mutation, even for email-only changes.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `InvalidCredentials` - Current password does not match
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Persistence failed
    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate (the user directory).
///
/// Each call is a single atomic operation; the directory's own
/// transactional guarantees are relied on for concurrent updates.
/// There is no delete: accounts are never physically removed.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Persistence failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Update an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Persistence failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}
