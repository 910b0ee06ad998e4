//! Orders
//!
//! - **submission**: guest cart validation against the live menu, atomic persist
//! - **service**: staff order listing and status management
//! - **money**: decimal totals

pub mod money;
mod service;
mod submission;

pub use service::OrderService;
pub use submission::{MAX_QUANTITY, OrderSubmitter};

use thiserror::Error;

use crate::db::StorageError;
use crate::settings::SettingsError;
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order has no items")]
    Empty,

    #[error("Table {0} is not configured")]
    InvalidTable(i32),

    #[error("Invalid quantity {quantity} for item {menu_item_id}")]
    InvalidQuantity { menu_item_id: String, quantity: i32 },

    #[error("Items unavailable: {0:?}")]
    ItemsUnavailable(Vec<String>),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Empty => AppError::new(ErrorCode::OrderEmpty),
            OrderError::InvalidTable(table) => {
                AppError::new(ErrorCode::InvalidTable).with_detail("table", table)
            }
            OrderError::InvalidQuantity {
                menu_item_id,
                quantity,
            } => AppError::new(ErrorCode::InvalidQuantity)
                .with_detail("menu_item_id", menu_item_id)
                .with_detail("quantity", quantity),
            OrderError::ItemsUnavailable(ids) => {
                AppError::new(ErrorCode::ItemsUnavailable).with_detail("menu_item_ids", ids)
            }
            OrderError::NotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("id", id)
            }
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::Settings(e) => e.into(),
            OrderError::Storage(e) => e.into(),
        }
    }
}
