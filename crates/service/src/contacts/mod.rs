//! Contacts module: per-user ordered contact lists.
//!
//! Contacts are addressed by position in their owner's list; each also carries
//! a stable `id` that survives edits.

pub mod domain;
pub mod query;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Contact, ContactInput, ListedContact};
pub use service::ContactService;
