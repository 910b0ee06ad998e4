//! Service Request Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a service request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Active,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// A guest or staff request raised at a table
///
/// `completed_at` and `elapsed_time` are set together, exactly once, when the
/// request moves to [`RequestStatus::Completed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    /// Tenant scoping key
    pub company_slug: String,
    pub table_number: i32,
    pub request_type: String,
    pub status: RequestStatus,
    pub created_at: i64,
    pub completed_at: Option<i64>,
    /// Seconds between creation and completion
    pub elapsed_time: Option<i64>,
    /// Staff principal that created the request; `None` for guest requests
    pub user_id: Option<String>,
}

impl ServiceRequest {
    /// Build a fresh active request
    pub fn new_active(
        id: String,
        company_slug: impl Into<String>,
        table_number: i32,
        request_type: impl Into<String>,
        created_at: i64,
        user_id: Option<String>,
    ) -> Self {
        Self {
            id,
            company_slug: company_slug.into(),
            table_number,
            request_type: request_type.into(),
            status: RequestStatus::Active,
            created_at,
            completed_at: None,
            elapsed_time: None,
            user_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RequestStatus::Active
    }

    /// Whole seconds elapsed since creation at `now_millis`, never negative
    pub fn elapsed_secs_at(&self, now_millis: i64) -> i64 {
        (now_millis - self.created_at).max(0) / 1000
    }

    /// Transition to completed, capturing the elapsed snapshot.
    ///
    /// Returns `false` (and leaves the request untouched) when it is already
    /// completed.
    pub fn complete(&mut self, now_millis: i64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.elapsed_time = Some(self.elapsed_secs_at(now_millis));
        self.completed_at = Some(now_millis);
        self.status = RequestStatus::Completed;
        true
    }
}

/// Staff create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestCreate {
    pub table_number: i32,
    pub request_type: String,
}

/// Guest create payload
///
/// `company_slug` is taken from the path on tenant routes and falls back to
/// the server default on single-tenant routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicRequestCreate {
    pub table_number: i32,
    pub request_type: String,
}

/// Result of a successful guest creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicRequestCreated {
    pub request_id: String,
}

/// Created-at range filter for completed request listings (inclusive bounds)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RequestRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl RequestRange {
    pub fn contains(&self, ts: i64) -> bool {
        self.from.is_none_or(|from| ts >= from) && self.to.is_none_or(|to| ts <= to)
    }
}

/// Response-time statistics over completed requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestInsights {
    pub total_requests: usize,
    /// Average elapsed seconds over every completed request in range
    pub average_response_secs: Option<f64>,
    /// Average elapsed seconds for "Service" requests
    pub service_average_secs: Option<f64>,
    /// Average elapsed seconds for "Bill" requests
    pub bill_average_secs: Option<f64>,
    pub average_by_type: BTreeMap<String, f64>,
    pub count_by_type: BTreeMap<String, usize>,
    pub count_by_table: BTreeMap<i32, usize>,
}
