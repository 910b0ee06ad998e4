//! Data models
//!
//! Shared between signal-server and its clients (via API).
//! All ids are opaque strings, all timestamps are unix milliseconds.

pub mod layout;
pub mod menu;
pub mod order;
pub mod service_request;
pub mod settings;

// Re-exports
pub use layout::*;
pub use menu::*;
pub use order::*;
pub use service_request::*;
pub use settings::*;
