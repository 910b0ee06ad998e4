//! Table Signal server - restaurant table-service request tracker
//!
//! Guests raise requests ("Service", "Bill", ...) and place orders from a
//! table page; staff follow them on a dashboard that polls this server.
//!
//! # Module layout
//!
//! ```text
//! signal-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT validation, middleware, extractor
//! ├── db/            # redb storage
//! ├── status.rs      # request card and table status bands
//! ├── layout/        # floor plan reconciliation and seat geometry
//! ├── settings/      # tenant table configuration
//! ├── requests/      # staff request lifecycle, history, insights
//! ├── public/        # guest pipeline and rate limiter
//! ├── menu/          # menu catalogue
//! ├── orders/        # order submission and management
//! ├── api/           # HTTP routers and handlers
//! └── utils/         # clock, logger, validation, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod layout;
pub mod menu;
pub mod orders;
pub mod public;
pub mod requests;
pub mod settings;
pub mod status;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::Storage;
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Set up logging from the configuration (JSON lines in production)
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
  _____     _     _        ____  _                   _
 |_   _|_ _| |__ | | ___  / ___|(_) __ _ _ __   __ _| |
   | |/ _` | '_ \| |/ _ \ \___ \| |/ _` | '_ \ / _` | |
   | | (_| | |_) | |  __/  ___) | | (_| | | | | (_| | |
   |_|\__,_|_.__/|_|\___| |____/|_|\__, |_| |_|\__,_|_|
                                   |___/
    "#
    );
}
