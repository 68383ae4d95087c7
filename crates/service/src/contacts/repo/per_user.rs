use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::contacts::domain::{Contact, ContactInput};
use crate::contacts::repository::{remove_at, replace_at, ContactRepository};
use crate::errors::ServiceError;
use crate::storage::JsonDocument;

const USERS_DIR: &str = "users";
const LIST_FILE: &str = "contacts.json";

/// One `users/<sha256(username) hex>/contacts.json` document per user, each
/// holding a bare list.
pub struct PerUserContactRepository {
    root: PathBuf,
    docs: DashMap<String, Arc<JsonDocument<Vec<Contact>>>>,
}

impl PerUserContactRepository {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self { root: data_dir.into().join(USERS_DIR), docs: DashMap::new() }
    }

    /// Path of the user's list. The directory name is the hex SHA-256 of the
    /// username: one 64-char path component whatever the username holds.
    pub fn list_path(&self, username: &str) -> PathBuf {
        user_dir(&self.root, username).join(LIST_FILE)
    }

    fn doc(&self, username: &str) -> Arc<JsonDocument<Vec<Contact>>> {
        self.docs
            .entry(username.to_string())
            .or_insert_with(|| Arc::new(JsonDocument::new(self.list_path(username))))
            .clone()
    }
}

fn user_dir(root: &Path, username: &str) -> PathBuf {
    root.join(hex::encode(Sha256::digest(username.as_bytes())))
}

#[async_trait]
impl ContactRepository for PerUserContactRepository {
    async fn list(&self, username: &str) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.doc(username).load().await)
    }

    async fn init_user(&self, username: &str) -> Result<(), ServiceError> {
        self.doc(username).update(|_| Ok(())).await
    }

    async fn push(&self, username: &str, contact: Contact) -> Result<usize, ServiceError> {
        self.doc(username)
            .update(|list| {
                list.push(contact);
                Ok(list.len() - 1)
            })
            .await
    }

    async fn replace(&self, username: &str, index: usize, input: ContactInput) -> Result<Contact, ServiceError> {
        self.doc(username).update(|list| replace_at(list, index, input)).await
    }

    async fn remove(&self, username: &str, index: usize) -> Result<Contact, ServiceError> {
        self.doc(username).update(|list| remove_at(list, index)).await
    }
}
