//! Staff-side service request lifecycle
//!
//! Creation, listing, completion, deletion, history and insights for the
//! tenant owned by the authenticated principal.

mod insights;
mod service;

pub use insights::compute_insights;
pub use service::RequestService;

use thiserror::Error;

use crate::db::StorageError;
use crate::settings::SettingsError;
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Table {0} is not configured")]
    InvalidTable(i32),

    #[error("Unknown request type: {0}")]
    InvalidRequestType(String),

    #[error("Request not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::InvalidTable(table) => {
                AppError::new(ErrorCode::InvalidTable).with_detail("table", table)
            }
            RequestError::InvalidRequestType(request_type) => {
                AppError::new(ErrorCode::InvalidRequestType)
                    .with_detail("request_type", request_type)
            }
            RequestError::NotFound(id) => {
                AppError::new(ErrorCode::RequestNotFound).with_detail("id", id)
            }
            RequestError::Settings(e) => e.into(),
            RequestError::Storage(e) => e.into(),
        }
    }
}
