use serde::{Deserialize, Serialize};

/// How a stored password is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    /// PHC-formatted argon2 hash.
    Argon2,
    /// Cleartext carried over from a legacy document; upgraded on next login.
    Plain,
}

/// Stored credentials (hashed, or plain for legacy accounts)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub password_hash: String,
    pub password_algorithm: PasswordAlgorithm,
}

impl Credentials {
    pub fn plain(password: impl Into<String>) -> Self {
        Self { password_hash: password.into(), password_algorithm: PasswordAlgorithm::Plain }
    }

    pub fn argon2(phc: impl Into<String>) -> Self {
        Self { password_hash: phc.into(), password_algorithm: PasswordAlgorithm::Argon2 }
    }
}

/// Domain account. `credentials` is `None` for legacy records that never had a
/// password; such accounts are kept but cannot log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub credentials: Option<Credentials>,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub username: String,
    pub token: String,
}
