use async_trait::async_trait;

use super::domain::{Contact, ContactInput};
use crate::errors::ServiceError;

/// Persistence for per-user contact lists. Implementations differ only in
/// file layout.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// The user's contacts in stored order; empty when the user has none.
    async fn list(&self, username: &str) -> Result<Vec<Contact>, ServiceError>;

    /// Make sure the user has a (possibly empty) list on disk.
    async fn init_user(&self, username: &str) -> Result<(), ServiceError>;

    /// Append and return the new position.
    async fn push(&self, username: &str, contact: Contact) -> Result<usize, ServiceError>;

    /// Overwrite the fields at `index`, keeping the stored id.
    async fn replace(&self, username: &str, index: usize, input: ContactInput) -> Result<Contact, ServiceError>;

    /// Remove the contact at `index`; later contacts shift down by one.
    async fn remove(&self, username: &str, index: usize) -> Result<Contact, ServiceError>;
}

pub(crate) fn replace_at(list: &mut [Contact], index: usize, input: ContactInput) -> Result<Contact, ServiceError> {
    let slot = list.get_mut(index).ok_or_else(|| index_not_found(index))?;
    *slot = Contact::with_id(slot.id, input);
    Ok(slot.clone())
}

pub(crate) fn remove_at(list: &mut Vec<Contact>, index: usize) -> Result<Contact, ServiceError> {
    if index >= list.len() {
        return Err(index_not_found(index));
    }
    Ok(list.remove(index))
}

pub(crate) fn index_not_found(index: usize) -> ServiceError {
    ServiceError::NotFound(format!("contact #{index} not found"))
}

/// In-memory repository for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockContactRepository {
        lists: Mutex<HashMap<String, Vec<Contact>>>,
    }

    impl MockContactRepository {
        fn with_list<R>(&self, username: &str, f: impl FnOnce(&mut Vec<Contact>) -> Result<R, ServiceError>) -> Result<R, ServiceError> {
            let mut lists = self
                .lists
                .lock()
                .map_err(|_| ServiceError::Storage("mock repository lock poisoned".into()))?;
            f(lists.entry(username.to_string()).or_default())
        }
    }

    #[async_trait]
    impl ContactRepository for MockContactRepository {
        async fn list(&self, username: &str) -> Result<Vec<Contact>, ServiceError> {
            self.with_list(username, |l| Ok(l.clone()))
        }

        async fn init_user(&self, username: &str) -> Result<(), ServiceError> {
            self.with_list(username, |_| Ok(()))
        }

        async fn push(&self, username: &str, contact: Contact) -> Result<usize, ServiceError> {
            self.with_list(username, |l| {
                l.push(contact);
                Ok(l.len() - 1)
            })
        }

        async fn replace(&self, username: &str, index: usize, input: ContactInput) -> Result<Contact, ServiceError> {
            self.with_list(username, |l| replace_at(l, index, input))
        }

        async fn remove(&self, username: &str, index: usize) -> Result<Contact, ServiceError> {
            self.with_list(username, |l| remove_at(l, index))
        }
    }
}
