//! Service layer for the contact book.
//! - Whole-file JSON persistence (`storage`).
//! - Account registration, password checks and session tokens (`accounts`).
//! - Per-user contact lists with search and ordering (`contacts`).
//! - `book::ContactBook` ties both stores to one data directory.

pub mod errors;
pub mod storage;
pub mod accounts;
pub mod contacts;
pub mod book;

pub use book::{BookConfig, ContactBook};
