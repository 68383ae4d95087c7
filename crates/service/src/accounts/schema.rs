//! Versioned loader for the accounts document.
//!
//! Version 2 (current) on disk:
//! `{"version": 2, "accounts": {"alice": {"password_hash": "...", "password_algorithm": "argon2"}}}`
//!
//! Version 1 is the legacy unversioned map, whose values are either a bare
//! password string or a `{"password": "..."}` record. Loading normalizes both
//! into version 2; the next save writes the normalized form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::domain::{Credentials, PasswordAlgorithm};

pub const CURRENT_VERSION: u64 = 2;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct AccountsDocument {
    pub version: u64,
    pub accounts: BTreeMap<String, Option<Credentials>>,
}

impl Default for AccountsDocument {
    fn default() -> Self {
        Self { version: CURRENT_VERSION, accounts: BTreeMap::new() }
    }
}

impl TryFrom<Value> for AccountsDocument {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut root) = value else {
            return Err("accounts document must be a JSON object".into());
        };
        match versioned_accounts(&mut root) {
            Some((version, accounts)) => {
                if version > CURRENT_VERSION {
                    warn!(version, "accounts document is newer than this build understands");
                }
                Ok(Self { version: CURRENT_VERSION, accounts: normalize_entries(accounts) })
            }
            None => {
                info!(accounts = root.len(), "normalizing legacy accounts document");
                Ok(Self { version: CURRENT_VERSION, accounts: normalize_entries(root) })
            }
        }
    }
}

/// `Some` when `root` has the versioned shape: a numeric `version` and an
/// object `accounts`, and nothing else.
fn versioned_accounts(root: &mut Map<String, Value>) -> Option<(u64, Map<String, Value>)> {
    if root.len() != 2 {
        return None;
    }
    let version = root.get("version")?.as_u64()?;
    if !root.get("accounts")?.is_object() {
        return None;
    }
    match root.remove("accounts") {
        Some(Value::Object(accounts)) => Some((version, accounts)),
        _ => None,
    }
}

fn normalize_entries(entries: Map<String, Value>) -> BTreeMap<String, Option<Credentials>> {
    entries
        .into_iter()
        .map(|(username, value)| {
            let creds = normalize_credential(value);
            if creds.is_none() {
                warn!(%username, "account has no usable password; kept but locked");
            }
            (username, creds)
        })
        .collect()
}

fn normalize_credential(value: Value) -> Option<Credentials> {
    match value {
        Value::String(password) => Some(from_password_field(password)),
        Value::Object(mut record) => {
            if record.contains_key("password_hash") {
                return serde_json::from_value(Value::Object(record)).ok();
            }
            match record.remove("password") {
                Some(Value::String(password)) => Some(from_password_field(password)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Legacy password fields may already hold a hash. Only a parseable argon2
/// PHC string counts; anything else is a plaintext password.
fn from_password_field(password: String) -> Credentials {
    let is_argon2 = argon2::PasswordHash::new(&password)
        .map(|phc| phc.algorithm.as_str().starts_with("argon2"))
        .unwrap_or(false);
    if is_argon2 {
        Credentials { password_hash: password, password_algorithm: PasswordAlgorithm::Argon2 }
    } else {
        Credentials::plain(password)
    }
}
