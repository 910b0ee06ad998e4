//! Guest-facing request pipeline
//!
//! Guests reach these operations without a staff token, so every creation
//! passes through a rate limiter before any validation or storage work.

mod client_ip;
mod rate_limit;
mod service;

pub use client_ip::{ClientIp, extract_ip};
pub use rate_limit::{FixedWindowLimiter, RateKey, RateLimit};
pub use service::PublicRequestService;

use thiserror::Error;

use crate::db::StorageError;
use crate::settings::SettingsError;
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum PublicRequestError {
    #[error("Too many requests")]
    RateLimited,

    #[error("Table {0} is not configured")]
    InvalidTable(i32),

    #[error("Unknown request type: {0}")]
    InvalidRequestType(String),

    #[error("Request {0} cannot be canceled")]
    NotCancelable(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<PublicRequestError> for AppError {
    fn from(err: PublicRequestError) -> Self {
        match err {
            PublicRequestError::RateLimited => AppError::rate_limited(),
            PublicRequestError::InvalidTable(table) => {
                AppError::new(ErrorCode::InvalidTable).with_detail("table", table)
            }
            PublicRequestError::InvalidRequestType(request_type) => {
                AppError::new(ErrorCode::InvalidRequestType)
                    .with_detail("request_type", request_type)
            }
            PublicRequestError::NotCancelable(_) => AppError::new(ErrorCode::RequestNotCancelable),
            PublicRequestError::Settings(e) => e.into(),
            PublicRequestError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn status_codes() {
        let err: AppError = PublicRequestError::RateLimited.into();
        assert_eq!(err.http_status(), StatusCode::TOO_MANY_REQUESTS);

        let err: AppError = PublicRequestError::NotCancelable("x".into()).into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err: AppError = PublicRequestError::InvalidTable(99).into();
        assert_eq!(err.code, ErrorCode::InvalidTable);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }
}
