//! File layouts for contact lists.

pub mod per_user;
pub mod shared;

use std::{path::Path, sync::Arc};

use configs::StorageLayout;

use super::repository::ContactRepository;

pub use per_user::PerUserContactRepository;
pub use shared::SharedContactRepository;

pub const SHARED_FILE: &str = "contacts.json";

/// Open the repository for the configured layout under `data_dir`.
pub fn open(layout: StorageLayout, data_dir: &Path) -> Arc<dyn ContactRepository> {
    match layout {
        StorageLayout::Shared => Arc::new(SharedContactRepository::new(data_dir.join(SHARED_FILE))),
        StorageLayout::PerUser => Arc::new(PerUserContactRepository::new(data_dir)),
    }
}
