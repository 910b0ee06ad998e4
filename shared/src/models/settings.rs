//! Table Configuration (settings) Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slug of the configuration created when nothing else is known
pub const DEFAULT_COMPANY_SLUG: &str = "restaurant";
pub const DEFAULT_WARNING_THRESHOLD: i32 = 2;
pub const DEFAULT_CRITICAL_THRESHOLD: i32 = 5;
pub const DEFAULT_SEATS: i32 = 4;
pub const MIN_SEATS: i32 = 1;
pub const MAX_SEATS: i32 = 20;

/// Per-tenant table configuration
///
/// Tables are ordered and unique, `request_types` is never empty. Thresholds
/// are in minutes; `warning_threshold < critical_threshold` is expected but
/// not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfiguration {
    pub company_slug: String,
    pub tables: Vec<i32>,
    #[serde(default)]
    pub table_seats: BTreeMap<i32, i32>,
    pub request_types: Vec<String>,
    pub sound_enabled: bool,
    pub notification_volume: f64,
    pub warning_threshold: i32,
    pub critical_threshold: i32,
    /// Principal owning this configuration (`None` for the shared default)
    #[serde(default)]
    pub owner_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TableConfiguration {
    /// Default configuration: tables 1..10, Service/Bill, 2/5 minute thresholds
    pub fn default_for(company_slug: impl Into<String>, now: i64) -> Self {
        let table_seats = [(1, 4), (2, 4), (3, 4), (4, 4), (5, 6), (6, 6), (7, 5), (8, 4), (9, 4), (10, 8)]
            .into_iter()
            .collect();
        Self {
            company_slug: company_slug.into(),
            tables: (1..=10).collect(),
            table_seats,
            request_types: vec!["Service".to_string(), "Bill".to_string()],
            sound_enabled: true,
            notification_volume: 0.5,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            owner_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_table(&self, table_number: i32) -> bool {
        self.tables.contains(&table_number)
    }

    pub fn has_request_type(&self, request_type: &str) -> bool {
        self.request_types.iter().any(|t| t == request_type)
    }
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub company_slug: Option<String>,
    pub tables: Option<Vec<i32>>,
    pub table_seats: Option<BTreeMap<i32, i32>>,
    pub request_types: Option<Vec<String>>,
    pub sound_enabled: Option<bool>,
    pub notification_volume: Option<f64>,
    pub warning_threshold: Option<i32>,
    pub critical_threshold: Option<i32>,
}

/// Data the guest table page needs to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicTableInfo {
    pub company_slug: String,
    pub table_number: i32,
    pub request_types: Vec<String>,
}
