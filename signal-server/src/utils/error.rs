//! Unified error handling
//!
//! Re-exports the error system from `shared::error` and adds the handler
//! helpers used across the API modules.
//!
//! ```ignore
//! // Return an error
//! Err(AppError::new(ErrorCode::InvalidTable))
//!
//! // Return a success response
//! Ok(ok(data))
//! ```

use axum::Json;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::StorageError;

/// Slug conflicts are user errors; everything else is a persistence failure
/// whose detail stays in the server log.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SlugTaken(slug) => {
                AppError::new(ErrorCode::CompanySlugTaken).with_detail("company_slug", slug)
            }
            other => AppError::database(other.to_string()),
        }
    }
}

/// Create a successful response
pub fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
