//! Status engine
//!
//! Pure functions turning request timestamps into display status. Two
//! independent band systems exist:
//!
//! - request cards: seconds-based bands (`< 10` fresh, `10..=15` warning,
//!   `> 15` critical); completed requests are neutral
//! - table aggregate: minute thresholds from the tenant configuration,
//!   evaluated on the oldest active request of the table

use serde::{Deserialize, Serialize};
use shared::models::{ServiceRequest, TableConfiguration};

/// Card bands in seconds
pub const CARD_WARNING_SECS: i64 = 10;
pub const CARD_CRITICAL_AFTER_SECS: i64 = 15;

/// Display status of a single request card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Fresh,
    Warning,
    Critical,
    /// Completed request
    Neutral,
}

/// Aggregate status of a table on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Active,
    Warning,
    Critical,
}

/// Status and the elapsed seconds to display on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub status: CardStatus,
    pub elapsed_secs: i64,
}

/// One table of the floor status board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStatusView {
    pub table_number: i32,
    pub status: TableStatus,
    pub active_requests: usize,
    pub max_elapsed_secs: Option<i64>,
}

/// Card status of a request at `now_millis`.
///
/// Completed requests show their stored elapsed snapshot, never a live value.
pub fn card_status(request: &ServiceRequest, now_millis: i64) -> CardView {
    if !request.is_active() {
        return CardView {
            status: CardStatus::Neutral,
            elapsed_secs: request.elapsed_time.unwrap_or(0),
        };
    }

    let elapsed_secs = request.elapsed_secs_at(now_millis);
    let status = if elapsed_secs < CARD_WARNING_SECS {
        CardStatus::Fresh
    } else if elapsed_secs <= CARD_CRITICAL_AFTER_SECS {
        CardStatus::Warning
    } else {
        CardStatus::Critical
    };
    CardView {
        status,
        elapsed_secs,
    }
}

/// Aggregate status from the oldest active request's elapsed seconds.
///
/// The critical check runs first, so misordered thresholds
/// (`warning >= critical`) still yield a defined result.
pub fn table_status_for_elapsed(
    max_elapsed_secs: Option<i64>,
    warning_minutes: i32,
    critical_minutes: i32,
) -> TableStatus {
    let Some(elapsed) = max_elapsed_secs else {
        return TableStatus::Available;
    };

    if elapsed >= i64::from(critical_minutes) * 60 {
        TableStatus::Critical
    } else if elapsed >= i64::from(warning_minutes) * 60 {
        TableStatus::Warning
    } else {
        TableStatus::Active
    }
}

/// Aggregate status of `table_number`; only active requests count
pub fn table_status(
    table_number: i32,
    requests: &[ServiceRequest],
    now_millis: i64,
    warning_minutes: i32,
    critical_minutes: i32,
) -> TableStatus {
    let max_elapsed = max_active_elapsed(table_number, requests, now_millis);
    table_status_for_elapsed(max_elapsed, warning_minutes, critical_minutes)
}

fn max_active_elapsed(table_number: i32, requests: &[ServiceRequest], now_millis: i64) -> Option<i64> {
    requests
        .iter()
        .filter(|r| r.table_number == table_number && r.is_active())
        .map(|r| r.elapsed_secs_at(now_millis))
        .max()
}

/// Status of every configured table, in configuration order
pub fn floor_status(
    config: &TableConfiguration,
    requests: &[ServiceRequest],
    now_millis: i64,
) -> Vec<TableStatusView> {
    config
        .tables
        .iter()
        .map(|&table_number| {
            let active_requests = requests
                .iter()
                .filter(|r| r.table_number == table_number && r.is_active())
                .count();
            let max_elapsed_secs = max_active_elapsed(table_number, requests, now_millis);
            TableStatusView {
                table_number,
                status: table_status_for_elapsed(
                    max_elapsed_secs,
                    config.warning_threshold,
                    config.critical_threshold,
                ),
                active_requests,
                max_elapsed_secs,
            }
        })
        .collect()
}

/// `m:ss` rendering of elapsed seconds (negative input renders as `0:00`)
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_at(table: i32, created_at: i64) -> ServiceRequest {
        ServiceRequest::new_active(
            shared::util::new_id(),
            "restaurant",
            table,
            "Service",
            created_at,
            None,
        )
    }

    #[test]
    fn card_bands() {
        let req = request_at(1, 0);
        assert_eq!(card_status(&req, 9_999).status, CardStatus::Fresh);
        assert_eq!(card_status(&req, 10_000).status, CardStatus::Warning);
        assert_eq!(card_status(&req, 15_999).status, CardStatus::Warning);
        assert_eq!(card_status(&req, 16_000).status, CardStatus::Critical);
    }

    #[test]
    fn completed_card_shows_snapshot() {
        let mut req = request_at(1, 0);
        req.complete(42_000);
        let view = card_status(&req, 9_000_000);
        assert_eq!(view.status, CardStatus::Neutral);
        assert_eq!(view.elapsed_secs, 42);
    }

    #[test]
    fn table_bands_with_default_thresholds() {
        // warning = 2 minutes, critical = 5 minutes
        assert_eq!(table_status_for_elapsed(None, 2, 5), TableStatus::Available);
        assert_eq!(table_status_for_elapsed(Some(119), 2, 5), TableStatus::Active);
        assert_eq!(table_status_for_elapsed(Some(120), 2, 5), TableStatus::Warning);
        assert_eq!(table_status_for_elapsed(Some(299), 2, 5), TableStatus::Warning);
        assert_eq!(table_status_for_elapsed(Some(300), 2, 5), TableStatus::Critical);
    }

    #[test]
    fn misordered_thresholds_check_critical_first() {
        // warning 5 >= critical 2
        assert_eq!(table_status_for_elapsed(Some(60), 5, 2), TableStatus::Active);
        assert_eq!(table_status_for_elapsed(Some(120), 5, 2), TableStatus::Critical);
        assert_eq!(table_status_for_elapsed(Some(400), 5, 2), TableStatus::Critical);
        // equal thresholds
        assert_eq!(table_status_for_elapsed(Some(180), 3, 3), TableStatus::Critical);
    }

    #[test]
    fn table_status_uses_oldest_active_request() {
        let now = 1_000_000;
        let mut done = request_at(4, now - 900_000);
        done.complete(now - 800_000);
        let requests = vec![
            request_at(4, now - 30_000),
            request_at(4, now - 150_000),
            done,
            request_at(5, now - 400_000),
        ];

        assert_eq!(table_status(4, &requests, now, 2, 5), TableStatus::Warning);
        assert_eq!(table_status(5, &requests, now, 2, 5), TableStatus::Critical);
        assert_eq!(table_status(6, &requests, now, 2, 5), TableStatus::Available);
    }

    #[test]
    fn floor_status_covers_every_configured_table() {
        let config = TableConfiguration::default_for("restaurant", 0);
        let now = 600_000;
        let requests = vec![request_at(3, now - 10_000), request_at(3, now - 20_000)];

        let board = floor_status(&config, &requests, now);
        assert_eq!(board.len(), 10);
        let t3 = board.iter().find(|t| t.table_number == 3).unwrap();
        assert_eq!(t3.status, TableStatus::Active);
        assert_eq!(t3.active_requests, 2);
        assert_eq!(t3.max_elapsed_secs, Some(20));
        assert!(board
            .iter()
            .filter(|t| t.table_number != 3)
            .all(|t| t.status == TableStatus::Available));
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(-3), "0:00");
    }
}
