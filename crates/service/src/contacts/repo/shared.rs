use std::{collections::BTreeMap, path::PathBuf};

use async_trait::async_trait;

use crate::contacts::domain::{Contact, ContactInput};
use crate::contacts::repository::{remove_at, replace_at, ContactRepository};
use crate::errors::ServiceError;
use crate::storage::JsonDocument;

type ContactsByUser = BTreeMap<String, Vec<Contact>>;

/// Every user's contacts in one document keyed by username.
pub struct SharedContactRepository {
    doc: JsonDocument<ContactsByUser>,
}

impl SharedContactRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { doc: JsonDocument::new(path) }
    }
}

#[async_trait]
impl ContactRepository for SharedContactRepository {
    async fn list(&self, username: &str) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.doc.load().await.remove(username).unwrap_or_default())
    }

    async fn init_user(&self, username: &str) -> Result<(), ServiceError> {
        self.doc
            .update(|doc| {
                doc.entry(username.to_string()).or_default();
                Ok(())
            })
            .await
    }

    async fn push(&self, username: &str, contact: Contact) -> Result<usize, ServiceError> {
        self.doc
            .update(|doc| {
                let list = doc.entry(username.to_string()).or_default();
                list.push(contact);
                Ok(list.len() - 1)
            })
            .await
    }

    async fn replace(&self, username: &str, index: usize, input: ContactInput) -> Result<Contact, ServiceError> {
        self.doc
            .update(|doc| replace_at(doc.entry(username.to_string()).or_default(), index, input))
            .await
    }

    async fn remove(&self, username: &str, index: usize) -> Result<Contact, ServiceError> {
        self.doc
            .update(|doc| remove_at(doc.entry(username.to_string()).or_default(), index))
            .await
    }
}
