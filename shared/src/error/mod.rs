//! Unified error system for Table Signal
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors (incl. rate limiting)
//! - 1xxx: Authentication errors
//! - 3xxx: Tenant / settings errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 7xxx: Table and service request errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::InvalidTable).with_detail("table", 99);
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(7001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, ErrorDetails};
