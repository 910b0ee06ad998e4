use std::collections::BTreeMap;

use shared::models::{RequestInsights, ServiceRequest};

/// Aggregate completed requests into response-time insights.
///
/// Active requests are ignored; averages are `None` when nothing matched.
pub fn compute_insights(requests: &[ServiceRequest]) -> RequestInsights {
    let mut sums: BTreeMap<String, (i64, usize)> = BTreeMap::new();
    let mut count_by_table: BTreeMap<i32, usize> = BTreeMap::new();
    let mut total_elapsed = 0i64;
    let mut total = 0usize;

    for request in requests.iter().filter(|r| !r.is_active()) {
        let elapsed = request.elapsed_time.unwrap_or(0);
        let entry = sums.entry(request.request_type.clone()).or_default();
        entry.0 += elapsed;
        entry.1 += 1;
        *count_by_table.entry(request.table_number).or_default() += 1;
        total_elapsed += elapsed;
        total += 1;
    }

    let average_by_type: BTreeMap<String, f64> = sums
        .iter()
        .map(|(kind, (sum, count))| (kind.clone(), *sum as f64 / *count as f64))
        .collect();
    let count_by_type = sums
        .iter()
        .map(|(kind, (_, count))| (kind.clone(), *count))
        .collect();

    RequestInsights {
        total_requests: total,
        average_response_secs: (total > 0).then(|| total_elapsed as f64 / total as f64),
        service_average_secs: average_by_type.get("Service").copied(),
        bill_average_secs: average_by_type.get("Bill").copied(),
        average_by_type,
        count_by_type,
        count_by_table,
    }
}
