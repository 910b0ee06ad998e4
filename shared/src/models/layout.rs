//! Floor Plan Layout Model

use serde::{Deserialize, Serialize};

/// Table outline drawn on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Square,
    Rectangle,
    Round,
}

/// Geometry of one table on the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePosition {
    pub table_number: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: TableShape,
    pub seats: i32,
}

/// Persisted floor plan for one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub name: String,
    pub company_slug: String,
    pub positions: Vec<TablePosition>,
    pub updated_at: i64,
}

/// Explicit save of edited geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSave {
    pub name: Option<String>,
    pub positions: Vec<TablePosition>,
}

/// Top-left corner of a seat marker, relative to its table's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatPosition {
    pub x: f64,
    pub y: f64,
}

/// A table position with its seat markers resolved, as rendered by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionedTable {
    #[serde(flatten)]
    pub position: TablePosition,
    pub seat_positions: Vec<SeatPosition>,
}
