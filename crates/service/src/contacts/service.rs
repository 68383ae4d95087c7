use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Contact, ContactInput, ListedContact};
use super::query::{filter_by_name, sort_by_name};
use super::repository::{index_not_found, ContactRepository};
use crate::errors::ServiceError;

/// Listing options: name search and optional name ordering.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub query: Option<String>,
    /// `None` falls back to the service default.
    pub sort_by_name: Option<bool>,
}

/// Contact business service over any file layout.
#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
    sort_by_name: bool,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>, sort_by_name: bool) -> Self {
        Self { repo, sort_by_name }
    }

    /// The user's contacts, filtered then optionally sorted. Each entry keeps
    /// its stored position so edit/delete links stay correct.
    pub async fn list(&self, username: &str, opts: &ListOptions) -> Result<Vec<ListedContact>, ServiceError> {
        let listed = self
            .repo
            .list(username)
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, contact)| ListedContact { index, contact })
            .collect();
        let mut listed = filter_by_name(listed, opts.query.as_deref().unwrap_or_default());
        if opts.sort_by_name.unwrap_or(self.sort_by_name) {
            sort_by_name(&mut listed);
        }
        Ok(listed)
    }

    pub async fn get(&self, username: &str, index: usize) -> Result<Contact, ServiceError> {
        self.repo
            .list(username)
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| index_not_found(index))
    }

    pub async fn init_user(&self, username: &str) -> Result<(), ServiceError> {
        self.repo.init_user(username).await
    }

    #[instrument(skip(self, input), fields(username = %username))]
    pub async fn add(&self, username: &str, input: ContactInput) -> Result<ListedContact, ServiceError> {
        let contact = Contact::new(input);
        let index = self.repo.push(username, contact.clone()).await?;
        info!(index, id = %contact.id, "contact_added");
        Ok(ListedContact { index, contact })
    }

    #[instrument(skip(self, input), fields(username = %username))]
    pub async fn update(&self, username: &str, index: usize, input: ContactInput) -> Result<Contact, ServiceError> {
        let contact = self.repo.replace(username, index, input).await?;
        info!(index, id = %contact.id, "contact_updated");
        Ok(contact)
    }

    #[instrument(skip(self), fields(username = %username))]
    pub async fn delete(&self, username: &str, index: usize) -> Result<Contact, ServiceError> {
        let contact = self.repo.remove(username, index).await?;
        info!(index, id = %contact.id, "contact_deleted");
        Ok(contact)
    }
}
