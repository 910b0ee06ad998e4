//! Seat marker geometry
//!
//! Coordinates are relative to the table's top-left corner and give each
//! seat marker's own top-left corner.

use shared::models::{PositionedTable, SeatPosition, TablePosition, TableShape};
use std::f64::consts::PI;

pub const SEAT_SIZE: f64 = 12.0;
pub const SEAT_GAP: f64 = 4.0;
/// Edge length needed per seat on a square/rectangle side
pub const SEAT_PITCH: f64 = 25.0;

/// Attach seat markers to every table of a plan
pub fn with_seats(positions: Vec<TablePosition>) -> Vec<PositionedTable> {
    positions
        .into_iter()
        .map(|position| PositionedTable {
            seat_positions: seat_positions(&position),
            position,
        })
        .collect()
}

/// Seat markers for a table
pub fn seat_positions(table: &TablePosition) -> Vec<SeatPosition> {
    let count = table.seats.max(0) as usize;
    match table.shape {
        TableShape::Round => round_seats(table, count),
        TableShape::Square | TableShape::Rectangle => edge_seats(table, count),
    }
}

/// Evenly around a circle, first seat at 12 o'clock, clockwise
fn round_seats(table: &TablePosition, count: usize) -> Vec<SeatPosition> {
    let center_x = table.width / 2.0;
    let center_y = table.height / 2.0;
    let radius = table.width.max(table.height) / 2.0 + SEAT_SIZE / 2.0 + SEAT_GAP;

    (0..count)
        .map(|i| {
            let angle = (i as f64 * 2.0 * PI) / count as f64 - PI / 2.0;
            SeatPosition {
                x: center_x + radius * angle.cos() - SEAT_SIZE / 2.0,
                y: center_y + radius * angle.sin() - SEAT_SIZE / 2.0,
            }
        })
        .collect()
}

/// Fill top, bottom, left, right in that order
fn edge_seats(table: &TablePosition, count: usize) -> Vec<SeatPosition> {
    let horizontal_cap = (table.width / SEAT_PITCH).floor().max(0.0) as usize;
    let vertical_cap = (table.height / SEAT_PITCH).floor().max(0.0) as usize;

    let top = count.div_ceil(2).min(horizontal_cap);
    let bottom = (count - top).min(horizontal_cap);
    let left = (count - top - bottom).div_ceil(2).min(vertical_cap);
    let right = count - top - bottom - left;

    let mut seats = Vec::with_capacity(count);
    let outside = -SEAT_SIZE - SEAT_GAP;

    let spacing = table.width / (top + 1) as f64;
    seats.extend((0..top).map(|i| SeatPosition {
        x: spacing * (i + 1) as f64 - SEAT_SIZE / 2.0,
        y: outside,
    }));

    let spacing = table.width / (bottom + 1) as f64;
    seats.extend((0..bottom).map(|i| SeatPosition {
        x: spacing * (i + 1) as f64 - SEAT_SIZE / 2.0,
        y: table.height + SEAT_GAP,
    }));

    let spacing = table.height / (left + 1) as f64;
    seats.extend((0..left).map(|i| SeatPosition {
        x: outside,
        y: spacing * (i + 1) as f64 - SEAT_SIZE / 2.0,
    }));

    let spacing = table.height / (right + 1) as f64;
    seats.extend((0..right).map(|i| SeatPosition {
        x: table.width + SEAT_GAP,
        y: spacing * (i + 1) as f64 - SEAT_SIZE / 2.0,
    }));

    seats
}
