//! Tenant table configuration
//!
//! Settings are created lazily per staff principal, resolved by company slug
//! for guest traffic and updated with partial-save semantics.

mod service;

pub use service::SettingsService;

use shared::models::{MAX_SEATS, MIN_SEATS};
use thiserror::Error;

use crate::db::StorageError;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SLUG_LEN};
use crate::utils::{AppError, ErrorCode};

/// Settings validation and persistence errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid company slug: {0:?}")]
    InvalidSlug(String),

    #[error("Company slug already in use: {0}")]
    SlugTaken(String),

    #[error("Invalid table number: {0}")]
    InvalidTable(i32),

    #[error("Duplicate table number: {0}")]
    DuplicateTable(i32),

    #[error("Table {table} has invalid seat count {seats}")]
    InvalidSeatCount { table: i32, seats: i32 },

    #[error("At least one request type is required")]
    RequestTypesEmpty,

    #[error("Request type too long: {0}")]
    RequestTypeTooLong(String),

    #[error("Notification volume must be a number")]
    InvalidVolume,

    #[error("Threshold must not be negative: {0}")]
    InvalidThreshold(i32),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for SettingsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SlugTaken(slug) => SettingsError::SlugTaken(slug),
            other => SettingsError::Storage(other),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidSlug(slug) => {
                AppError::new(ErrorCode::InvalidCompanySlug).with_detail("company_slug", slug)
            }
            SettingsError::SlugTaken(slug) => {
                AppError::new(ErrorCode::CompanySlugTaken).with_detail("company_slug", slug)
            }
            SettingsError::InvalidTable(table) => {
                AppError::new(ErrorCode::InvalidTable).with_detail("table", table)
            }
            SettingsError::DuplicateTable(table) => AppError::with_message(
                ErrorCode::InvalidTable,
                format!("Duplicate table number: {table}"),
            )
            .with_detail("table", table),
            SettingsError::InvalidSeatCount { table, seats } => {
                AppError::new(ErrorCode::InvalidSeatCount)
                    .with_detail("table", table)
                    .with_detail("seats", seats)
            }
            SettingsError::RequestTypesEmpty => AppError::new(ErrorCode::RequestTypesEmpty),
            SettingsError::RequestTypeTooLong(_) => AppError::validation(format!(
                "Request type is too long (max {MAX_NAME_LEN})"
            )),
            SettingsError::InvalidVolume => AppError::new(ErrorCode::ValueOutOfRange)
                .with_detail("field", "notification_volume"),
            SettingsError::InvalidThreshold(value) => AppError::new(ErrorCode::ValueOutOfRange)
                .with_detail("threshold", value),
            SettingsError::Storage(e) => e.into(),
        }
    }
}

/// Lowercase the slug and replace every char outside `[a-z0-9-]` with `-`
pub fn normalize_slug(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_SLUG_LEN {
        return Err(SettingsError::InvalidSlug(raw.to_string()));
    }
    Ok(trimmed
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '-',
        })
        .collect())
}

/// Positive and unique, order preserved
pub fn validate_tables(tables: &[i32]) -> Result<(), SettingsError> {
    let mut seen = std::collections::HashSet::new();
    for &table in tables {
        if table <= 0 {
            return Err(SettingsError::InvalidTable(table));
        }
        if !seen.insert(table) {
            return Err(SettingsError::DuplicateTable(table));
        }
    }
    Ok(())
}

pub fn validate_seats(table: i32, seats: i32) -> Result<(), SettingsError> {
    if table <= 0 {
        return Err(SettingsError::InvalidTable(table));
    }
    if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
        return Err(SettingsError::InvalidSeatCount { table, seats });
    }
    Ok(())
}

/// Trim, drop blanks and duplicates; the result is never empty
pub fn normalize_request_types(types: &[String]) -> Result<Vec<String>, SettingsError> {
    let mut normalized: Vec<String> = Vec::with_capacity(types.len());
    for raw in types {
        let label = raw.trim();
        if label.is_empty() || normalized.iter().any(|t| t == label) {
            continue;
        }
        if label.len() > MAX_NAME_LEN {
            return Err(SettingsError::RequestTypeTooLong(label.to_string()));
        }
        normalized.push(label.to_string());
    }
    if normalized.is_empty() {
        return Err(SettingsError::RequestTypesEmpty);
    }
    Ok(normalized)
}
