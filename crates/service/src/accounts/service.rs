use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, Credentials, PasswordAlgorithm};
use super::errors::AuthError;
use super::repository::AccountRepository;
use super::session::SessionKeys;

/// Account service configuration
#[derive(Clone)]
pub struct AccountConfig {
    pub session_secret: String,
    pub session_ttl_hours: i64,
}

/// Account business service independent of web framework
pub struct AccountService<R: AccountRepository> {
    repo: Arc<R>,
    sessions: SessionKeys,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: Arc<R>, cfg: AccountConfig) -> Self {
        let sessions = SessionKeys::new(&cfg.session_secret, cfg.session_ttl_hours);
        Self { repo, sessions }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Register a new account with an argon2-hashed password.
    ///
    /// Returns `Ok(false)` when the username is taken; the existing account is
    /// left untouched. Usernames are compared byte-exact.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountService, AccountConfig, repository::mock::MockAccountRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAccountRepository::default());
    /// let svc = AccountService::new(repo, AccountConfig { session_secret: "s".into(), session_ttl_hours: 1 });
    /// assert!(tokio_test::block_on(svc.register("alice", "pw1")).unwrap());
    /// assert!(!tokio_test::block_on(svc.register("alice", "pw2")).unwrap());
    /// ```
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn register(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        validate_username(username)?;
        if self.repo.find(username).await?.is_some() {
            debug!("username taken");
            return Ok(false);
        }

        let hash = hash_password(password)?;
        let created = self.repo.create(username, Credentials::argon2(hash)).await?;
        if created {
            info!(%username, "user_registered");
        }
        Ok(created)
    }

    /// Check a username/password pair.
    ///
    /// Legacy plaintext credentials are compared byte-exact and, on success,
    /// replaced with an argon2 hash.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let Some(account) = self.repo.find(username).await? else {
            return Ok(false);
        };
        let Some(creds) = account.credentials else {
            warn!("login attempt on account without password");
            return Ok(false);
        };

        match creds.password_algorithm {
            PasswordAlgorithm::Argon2 => match PasswordHash::new(&creds.password_hash) {
                Ok(parsed) => Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()),
                Err(e) => {
                    warn!(error = %e, "stored argon2 hash is unreadable; refusing login");
                    Ok(false)
                }
            },
            PasswordAlgorithm::Plain => {
                if creds.password_hash != password {
                    return Ok(false);
                }
                self.upgrade_plain(username, password).await;
                Ok(true)
            }
        }
    }

    /// Authenticate and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountService, AccountConfig, repository::mock::MockAccountRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAccountRepository::default());
    /// let svc = AccountService::new(repo, AccountConfig { session_secret: "s".into(), session_ttl_hours: 1 });
    /// tokio_test::block_on(svc.register("alice", "pw1")).unwrap();
    /// let session = tokio_test::block_on(svc.login("alice", "pw1")).unwrap();
    /// assert_eq!(svc.verify_session(&session.token).unwrap(), "alice");
    /// ```
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        if !self.authenticate(username, password).await? {
            return Err(AuthError::Unauthorized);
        }
        let token = self.sessions.issue(username)?;
        Ok(AuthSession { username: username.to_string(), token })
    }

    /// Username carried by a valid session token.
    pub fn verify_session(&self, token: &str) -> Result<String, AuthError> {
        self.sessions.verify(token)
    }

    async fn upgrade_plain(&self, username: &str, password: &str) {
        let upgraded = match hash_password(password) {
            Ok(hash) => self.repo.set_credentials(username, Credentials::argon2(hash)).await,
            Err(e) => Err(e),
        };
        match upgraded {
            Ok(()) => info!(%username, "credential_upgraded"),
            Err(e) => warn!(%username, error = %e, "could not upgrade plaintext credential"),
        }
    }
}

/// Usernames are byte-exact and otherwise unrestricted; only empty is refused.
pub fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::Validation("username must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}
