use async_trait::async_trait;

use super::domain::{Account, Credentials};
use super::errors::AuthError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find(&self, username: &str) -> Result<Option<Account>, AuthError>;

    /// Insert a new account; returns `false` (and changes nothing) if the
    /// username is already taken.
    async fn create(&self, username: &str, credentials: Credentials) -> Result<bool, AuthError>;

    async fn set_credentials(&self, username: &str, credentials: Credentials) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<HashMap<String, Option<Credentials>>>,
    }

    impl MockAccountRepository {
        /// Seed an account directly, bypassing hashing.
        pub fn with_account(self, username: &str, credentials: Option<Credentials>) -> Self {
            if let Ok(mut accounts) = self.accounts.lock() {
                accounts.insert(username.to_string(), credentials);
            }
            self
        }

        fn poisoned() -> AuthError {
            AuthError::Repository("mock repository lock poisoned".into())
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find(&self, username: &str) -> Result<Option<Account>, AuthError> {
            let accounts = self.accounts.lock().map_err(|_| Self::poisoned())?;
            Ok(accounts
                .get(username)
                .map(|c| Account { username: username.to_string(), credentials: c.clone() }))
        }

        async fn create(&self, username: &str, credentials: Credentials) -> Result<bool, AuthError> {
            let mut accounts = self.accounts.lock().map_err(|_| Self::poisoned())?;
            if accounts.contains_key(username) {
                return Ok(false);
            }
            accounts.insert(username.to_string(), Some(credentials));
            Ok(true)
        }

        async fn set_credentials(&self, username: &str, credentials: Credentials) -> Result<(), AuthError> {
            let mut accounts = self.accounts.lock().map_err(|_| Self::poisoned())?;
            match accounts.get_mut(username) {
                Some(slot) => {
                    *slot = Some(credentials);
                    Ok(())
                }
                None => Err(AuthError::Repository(format!("no account named {username}"))),
            }
        }
    }
}
