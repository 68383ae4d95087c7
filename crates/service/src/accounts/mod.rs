//! Accounts module: three-layer architecture (domain, repository, service).
//!
//! Registration, password verification and session tokens live here; the
//! on-disk accounts document and its legacy forms are handled by `schema`.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod schema;
pub mod service;
pub mod session;

pub use service::{AccountConfig, AccountService};
