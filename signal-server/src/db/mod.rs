//! Database Module
//!
//! Embedded redb storage shared by every service. Entity operations are split
//! into one `impl Storage` block per concern.

mod menu;
mod orders;
mod requests;
mod settings;
mod storage;

pub use orders::Placement;
pub use storage::{Storage, StorageError, StorageResult};
