//! The contact book: accounts plus contacts, wired to one data directory.

use std::{path::PathBuf, sync::Arc};

use configs::StorageLayout;
use tracing::info;

use crate::accounts::{
    errors::AuthError, repo::JsonAccountRepository, repository::AccountRepository,
    service::validate_username, AccountConfig, AccountService,
};
use crate::contacts::{repo as contact_repo, repository::ContactRepository, ContactService};

pub const ACCOUNTS_FILE: &str = "accounts.json";

/// Settings needed to open a file-backed contact book.
#[derive(Clone, Debug)]
pub struct BookConfig {
    pub data_dir: PathBuf,
    pub layout: StorageLayout,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub sort_by_name: bool,
}

impl From<&configs::AppConfig> for BookConfig {
    fn from(cfg: &configs::AppConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&cfg.storage.data_dir),
            layout: cfg.storage.layout,
            session_secret: cfg.session.secret.clone(),
            session_ttl_hours: cfg.session.ttl_hours,
            sort_by_name: cfg.contacts.sort_by_name,
        }
    }
}

pub struct ContactBook<R: AccountRepository> {
    pub accounts: AccountService<R>,
    pub contacts: ContactService,
}

impl ContactBook<JsonAccountRepository> {
    /// Open the JSON-file stores under `cfg.data_dir`.
    pub fn open(cfg: &BookConfig) -> Self {
        let accounts_repo = Arc::new(JsonAccountRepository::new(cfg.data_dir.join(ACCOUNTS_FILE)));
        let contacts_repo = contact_repo::open(cfg.layout, &cfg.data_dir);
        info!(data_dir = %cfg.data_dir.display(), layout = ?cfg.layout, "contact book opened");
        Self::new(accounts_repo, contacts_repo, cfg)
    }
}

impl<R: AccountRepository> ContactBook<R> {
    pub fn new(accounts_repo: Arc<R>, contacts_repo: Arc<dyn ContactRepository>, cfg: &BookConfig) -> Self {
        let accounts = AccountService::new(
            accounts_repo,
            AccountConfig {
                session_secret: cfg.session_secret.clone(),
                session_ttl_hours: cfg.session_ttl_hours,
            },
        );
        let contacts = ContactService::new(contacts_repo, cfg.sort_by_name);
        Self { accounts, contacts }
    }

    /// Register an account and give it an empty contact list.
    /// Returns `Ok(false)` if the username is taken.
    ///
    /// The list is created first: if that fails no account is written, so an
    /// account never exists without its contact list. `init_user` leaves an
    /// existing list alone, which makes the duplicate-username path harmless.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        validate_username(username)?;
        self.contacts.init_user(username).await?;
        self.accounts.register(username, password).await
    }
}
