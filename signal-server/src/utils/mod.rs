//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`ApiResponse`] - unified error types (from shared::error)
//! - [`Clock`] - injectable time source
//! - logger and input validation helpers

pub mod clock;
pub mod error;
pub mod logger;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{ok, ok_with_message};
