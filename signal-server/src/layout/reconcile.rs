//! Layout reconciliation
//!
//! Brings a persisted floor plan in line with the tenant's table
//! configuration while keeping user-chosen geometry.

use shared::models::{TablePosition, TableShape};
use std::collections::{BTreeMap, HashSet};

/// Grid used to auto-place new tables
pub const GRID_ORIGIN: f64 = 50.0;
pub const GRID_STEP: f64 = 130.0;
pub const GRID_COLUMNS: usize = 4;

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// One entry per configured table, sorted by table number
    pub positions: Vec<TablePosition>,
    /// Tables were added or removed, or seat counts changed
    pub changed: bool,
}

/// Default geometry for a newly configured table in grid slot `slot`
pub fn auto_place(table_number: i32, seats: i32, slot: usize) -> TablePosition {
    let row = slot / GRID_COLUMNS;
    let col = slot % GRID_COLUMNS;
    let shape = if seats > 6 {
        TableShape::Rectangle
    } else if seats > 4 {
        TableShape::Round
    } else {
        TableShape::Square
    };

    TablePosition {
        table_number,
        x: GRID_ORIGIN + col as f64 * GRID_STEP,
        y: GRID_ORIGIN + row as f64 * GRID_STEP,
        width: if seats > 6 { 120.0 } else { 80.0 },
        height: 80.0,
        shape,
        seats,
    }
}

/// Reconcile `persisted` against the configured `tables` and `table_seats`.
///
/// - surviving entries keep x/y/width/height/shape; `seats` comes from the
///   map when it has an entry
/// - entries for unconfigured tables (and duplicates) are dropped
/// - new tables get grid slot `surviving + index among additions`
pub fn reconcile(
    persisted: &[TablePosition],
    tables: &[i32],
    table_seats: &BTreeMap<i32, i32>,
) -> Reconciled {
    let configured: HashSet<i32> = tables.iter().copied().collect();

    let mut seen = HashSet::new();
    let mut positions: Vec<TablePosition> = persisted
        .iter()
        .filter(|p| configured.contains(&p.table_number) && seen.insert(p.table_number))
        .map(|p| TablePosition {
            seats: table_seats.get(&p.table_number).copied().unwrap_or(p.seats),
            ..p.clone()
        })
        .collect();

    let kept = positions.len();
    let mut added_numbers = HashSet::new();
    let additions: Vec<i32> = tables
        .iter()
        .copied()
        .filter(|n| !seen.contains(n) && added_numbers.insert(*n))
        .collect();

    for (index, table_number) in additions.iter().enumerate() {
        let seats = table_seats.get(table_number).copied().unwrap_or(shared::models::DEFAULT_SEATS);
        positions.push(auto_place(*table_number, seats, kept + index));
    }

    positions.sort_by_key(|p| p.table_number);

    let mut previous: Vec<&TablePosition> = persisted.iter().collect();
    previous.sort_by_key(|p| p.table_number);
    let changed = previous.len() != positions.len()
        || previous.iter().zip(&positions).any(|(a, b)| *a != b);

    Reconciled { positions, changed }
}
