//! Floor plan layout
//!
//! - [`reconcile`] keeps the persisted plan in sync with the configuration
//! - [`seats`] computes seat marker geometry
//! - [`LayoutService`] loads, reconciles and saves tenant layouts

pub mod reconcile;
pub mod seats;
mod service;

pub use reconcile::{Reconciled, auto_place, reconcile};
pub use seats::{seat_positions, with_seats};
pub use service::LayoutService;

use shared::models::{TablePosition, TableShape};

pub const DEFAULT_LAYOUT_NAME: &str = "Main Dining Room";

/// Floor plan used when a tenant has none yet
pub fn default_positions() -> Vec<TablePosition> {
    use TableShape::{Rectangle, Round, Square};

    [
        (1, 50.0, 50.0, 80.0, 80.0, Square, 4),
        (2, 180.0, 50.0, 80.0, 80.0, Square, 4),
        (3, 310.0, 50.0, 80.0, 80.0, Square, 4),
        (4, 440.0, 50.0, 80.0, 80.0, Square, 4),
        (5, 50.0, 180.0, 120.0, 80.0, Rectangle, 6),
        (6, 220.0, 180.0, 120.0, 80.0, Rectangle, 6),
        (7, 390.0, 180.0, 100.0, 100.0, Round, 5),
        (8, 50.0, 310.0, 80.0, 80.0, Square, 4),
        (9, 180.0, 310.0, 80.0, 80.0, Square, 4),
        (10, 310.0, 310.0, 150.0, 80.0, Rectangle, 8),
    ]
    .into_iter()
    .map(|(table_number, x, y, width, height, shape, seats)| TablePosition {
        table_number,
        x,
        y,
        width,
        height,
        shape,
        seats,
    })
    .collect()
}
