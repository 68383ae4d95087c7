//! Storage abstractions for service layer
//!
//! Whole-file JSON persistence shared by the account and contact stores.

pub mod json_document;

pub use json_document::JsonDocument;
