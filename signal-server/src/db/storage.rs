//! redb-based storage layer for Table Signal
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `service_requests` | `request_id` | `ServiceRequest` | Request lifecycle rows |
//! | `settings` | `company_slug` | `TableConfiguration` | Per-tenant configuration |
//! | `owners` | `principal_id` | `company_slug` | Which tenant a staff principal owns |
//! | `layouts` | `company_slug` | `TableLayout` | Floor plan geometry |
//! | `menu_categories` | `category_id` | `MenuCategory` | Catalogue |
//! | `menu_items` | `item_id` | `MenuItem` | Catalogue |
//! | `orders` | `order_id` | `Order` | Order headers |
//! | `order_items` | `(order_id, line_no)` | `OrderItem` | Order lines |
//!
//! Values are JSON-serialized. Every mutation runs in a single write
//! transaction; redb serializes writers, so read-check-write sequences inside
//! one transaction are atomic.
//!
//! Entity operations live in sibling modules as further `impl Storage` blocks.

use redb::{Database, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub(crate) const REQUESTS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("service_requests");

pub(crate) const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

/// principal id -> company slug
pub(crate) const OWNERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("owners");

pub(crate) const LAYOUTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("layouts");

pub(crate) const MENU_CATEGORIES_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("menu_categories");

pub(crate) const MENU_ITEMS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("menu_items");

pub(crate) const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// key = (order_id, line number)
pub(crate) const ORDER_ITEMS_TABLE: TableDefinition<(&str, u32), &[u8]> =
    TableDefinition::new("order_items");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Company slug already in use: {0}")]
    SlugTaken(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Shared storage handle backed by redb
#[derive(Clone)]
pub struct Storage {
    pub(crate) db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable once `commit()` returns and the file stays
    /// consistent across crashes (copy-on-write with atomic root swap).
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and throwaway instances)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables so read transactions never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(REQUESTS_TABLE)?;
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
            let _ = write_txn.open_table(OWNERS_TABLE)?;
            let _ = write_txn.open_table(LAYOUTS_TABLE)?;
            let _ = write_txn.open_table(MENU_CATEGORIES_TABLE)?;
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_ITEMS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}
