//! Unified error codes for Table Signal
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Tenant / settings errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 7xxx: Table and service request errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the guest page and the
/// staff dashboard can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Too many requests from the same client
    RateLimited = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 3xxx: Tenant ====================
    /// Company slug is malformed
    InvalidCompanySlug = 3101,
    /// Company slug is used by another tenant
    CompanySlugTaken = 3102,
    /// At least one request type must remain configured
    RequestTypesEmpty = 3103,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no lines
    OrderEmpty = 4007,
    /// One or more items in the cart are missing or unavailable
    ItemsUnavailable = 4008,
    /// Order line quantity is invalid
    InvalidQuantity = 4009,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item price is invalid
    MenuItemInvalidPrice = 6002,
    /// Menu category not found
    MenuCategoryNotFound = 6101,

    // ==================== 7xxx: Table / Request ====================
    /// Table is not configured for this tenant
    InvalidTable = 7001,
    /// Seat count is out of range
    InvalidSeatCount = 7002,
    /// Request type is not in the tenant vocabulary
    InvalidRequestType = 7401,
    /// Service request not found
    RequestNotFound = 7402,
    /// Service request can no longer be canceled
    RequestNotCancelable = 7403,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::ValueOutOfRange => "Value out of range",
            ErrorCode::RateLimited => {
                "Too many requests. Please wait a moment before trying again."
            }

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",

            // Tenant
            ErrorCode::InvalidCompanySlug => "Invalid company slug",
            ErrorCode::CompanySlugTaken => "Company slug is already in use",
            ErrorCode::RequestTypesEmpty => "At least one request type is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::ItemsUnavailable => "Some items are unavailable",
            ErrorCode::InvalidQuantity => "Quantity must be at least 1",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Invalid menu item price",
            ErrorCode::MenuCategoryNotFound => "Menu category not found",

            // Table / Request
            ErrorCode::InvalidTable => "Invalid table number",
            ErrorCode::InvalidSeatCount => "Seat count must be between 1 and 20",
            ErrorCode::InvalidRequestType => "Invalid request type",
            ErrorCode::RequestNotFound => "Request not found",
            ErrorCode::RequestNotCancelable => "Request not found or already completed",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::RateLimited),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Tenant
            3101 => Ok(ErrorCode::InvalidCompanySlug),
            3102 => Ok(ErrorCode::CompanySlugTaken),
            3103 => Ok(ErrorCode::RequestTypesEmpty),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::ItemsUnavailable),
            4009 => Ok(ErrorCode::InvalidQuantity),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),
            6101 => Ok(ErrorCode::MenuCategoryNotFound),

            // Table / Request
            7001 => Ok(ErrorCode::InvalidTable),
            7002 => Ok(ErrorCode::InvalidSeatCount),
            7401 => Ok(ErrorCode::InvalidRequestType),
            7402 => Ok(ErrorCode::RequestNotFound),
            7403 => Ok(ErrorCode::RequestNotCancelable),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::RateLimited.code(), 9);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ItemsUnavailable.code(), 4008);
        assert_eq!(ErrorCode::InvalidTable.code(), 7001);
        assert_eq!(ErrorCode::RequestNotCancelable.code(), 7403);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trips_known_codes() {
        for code in [
            ErrorCode::RateLimited,
            ErrorCode::InvalidRequestType,
            ErrorCode::CompanySlugTaken,
            ErrorCode::MenuCategoryNotFound,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_unknown_code() {
        assert_eq!(ErrorCode::try_from(6543), Err(InvalidErrorCode(6543)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidTable).unwrap();
        assert_eq!(json, "7001");
        let code: ErrorCode = serde_json::from_str("7401").unwrap();
        assert_eq!(code, ErrorCode::InvalidRequestType);
    }
}
