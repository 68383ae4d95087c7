use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default = "Uuid::new_v4")] // records written before ids existed
    pub id: Uuid,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub category: String,
}

/// The editable fields of a contact, as submitted by the add/edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub linkedin: String,
    pub category: String,
}

impl Contact {
    /// New contact with a freshly generated id.
    pub fn new(input: ContactInput) -> Self {
        Self::with_id(Uuid::new_v4(), input)
    }

    pub fn with_id(id: Uuid, input: ContactInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            linkedin: input.linkedin,
            category: input.category,
        }
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }
}

impl From<&Contact> for ContactInput {
    fn from(c: &Contact) -> Self {
        Self {
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            address: c.address.clone(),
            linkedin: c.linkedin.clone(),
            category: c.category.clone(),
        }
    }
}

/// A contact together with its current position in the owner's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedContact {
    pub index: usize,
    pub contact: Contact,
}
