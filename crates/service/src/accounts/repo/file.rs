use std::path::PathBuf;

use async_trait::async_trait;

use crate::accounts::domain::{Account, Credentials};
use crate::accounts::errors::AuthError;
use crate::accounts::repository::AccountRepository;
use crate::accounts::schema::AccountsDocument;
use crate::storage::JsonDocument;

/// Accounts persisted in a single versioned JSON document.
pub struct JsonAccountRepository {
    doc: JsonDocument<AccountsDocument>,
}

impl JsonAccountRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { doc: JsonDocument::new(path) }
    }
}

#[async_trait]
impl AccountRepository for JsonAccountRepository {
    async fn find(&self, username: &str) -> Result<Option<Account>, AuthError> {
        let doc = self.doc.load().await;
        Ok(doc
            .accounts
            .get(username)
            .map(|c| Account { username: username.to_string(), credentials: c.clone() }))
    }

    async fn create(&self, username: &str, credentials: Credentials) -> Result<bool, AuthError> {
        let mut created = false;
        self.doc
            .update(|doc| -> Result<(), AuthError> {
                if !doc.accounts.contains_key(username) {
                    doc.accounts.insert(username.to_string(), Some(credentials));
                    created = true;
                }
                Ok(())
            })
            .await?;
        Ok(created)
    }

    async fn set_credentials(&self, username: &str, credentials: Credentials) -> Result<(), AuthError> {
        self.doc
            .update(|doc| match doc.accounts.get_mut(username) {
                Some(slot) => {
                    *slot = Some(credentials);
                    Ok(())
                }
                None => Err(AuthError::Repository(format!("no account named {username}"))),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::domain::PasswordAlgorithm;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("accounts_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn create_is_exclusive_and_persists() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let repo = JsonAccountRepository::new(&path);

        assert!(repo.create("alice", Credentials::plain("pw1")).await?);
        assert!(!repo.create("alice", Credentials::plain("pw2")).await?);

        let reopened = JsonAccountRepository::new(&path);
        let alice = reopened.find("alice").await?.expect("alice");
        assert_eq!(alice.credentials, Some(Credentials::plain("pw1")));
        assert!(reopened.find("Alice").await?.is_none());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn legacy_file_is_rewritten_as_current_version_on_save() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        tokio::fs::write(&path, br#"{"alice": "pw1", "bob": {"password": "pw2"}, "ghost": {}}"#).await?;
        let repo = JsonAccountRepository::new(&path);

        for name in ["alice", "bob"] {
            assert!(repo.find(name).await?.and_then(|a| a.credentials).is_some(), "{name}");
        }
        assert!(repo.find("ghost").await?.expect("ghost kept").credentials.is_none());

        repo.create("carol", Credentials::argon2("$argon2id$stub")).await?;
        let raw: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&path).await?)?;
        assert_eq!(raw["version"], 2);
        assert_eq!(raw["accounts"]["alice"]["password_algorithm"], "plain");
        assert!(raw["accounts"]["ghost"].is_null());
        assert_eq!(raw["accounts"]["carol"]["password_algorithm"], "argon2");

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn set_credentials_requires_existing_account() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let repo = JsonAccountRepository::new(&path);
        assert!(repo.set_credentials("nobody", Credentials::plain("x")).await.is_err());

        repo.create("alice", Credentials::plain("pw")).await?;
        repo.set_credentials("alice", Credentials::argon2("$argon2id$new")).await?;
        let creds = repo.find("alice").await?.and_then(|a| a.credentials).expect("creds");
        assert_eq!(creds.password_algorithm, PasswordAlgorithm::Argon2);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
