//! Staff authentication
//!
//! - [`JwtService`] - token validation (and issuing for tooling)
//! - [`CurrentUser`] - authenticated principal
//! - [`require_auth`] - middleware guarding every non-public API route

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
