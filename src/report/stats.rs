use crate::analyzer::RunSummary;
use crate::parser::types::ErrorType;
use crate::utils::time::seconds_between;
use serde::Serialize;

/// Descriptive statistics derived from a finished `RunSummary`.
///
/// `None` means the underlying series had no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub peak_memory_mb: Option<u64>,
    pub avg_memory_mb: Option<u64>,
    pub avg_cpu_percent: Option<f64>,
    pub peak_temp_celsius: Option<u32>,
    pub avg_ping_ms: Option<f64>,
    pub net_failures: u64,
    pub total_errors: u64,
    pub error_breakdown: Vec<(ErrorType, u64)>,
    pub warnings: u64,
    pub total_actions: u64,
    pub snapshot_count: usize,
    pub duration_secs: Option<i64>,
}

impl SummaryStats {
    pub fn from_summary(summary: &RunSummary, timeout_sentinel_ms: f64) -> Self {
        let mem: Vec<u64> = summary.mem_records.iter().map(|s| s.value).collect();
        let peak_memory_mb = mem.iter().copied().max();
        let avg_memory_mb = if mem.is_empty() {
            None
        } else {
            // Mean of u64 values always fits back into u64
            let total: u128 = mem.iter().map(|&v| v as u128).sum();
            Some((total / mem.len() as u128) as u64)
        };

        let avg_cpu_percent = mean(summary.cpu_records.iter().map(|s| s.value))
            .map(|v| (v * 10.0).round() / 10.0);

        let peak_temp_celsius = summary.temp_records.iter().map(|s| s.value).max();

        let avg_ping_ms = mean(
            summary
                .net_records
                .iter()
                .map(|s| s.value)
                .filter(|v| *v != timeout_sentinel_ms),
        );

        let error_breakdown = ErrorType::ALL
            .iter()
            .filter_map(|kind| match summary.error_count(*kind) {
                0 => None,
                n => Some((*kind, n)),
            })
            .collect();

        let end = summary.end_time.as_ref().or(summary.last_time.as_ref());
        let duration_secs = match (&summary.start_time, end) {
            (Some(start), Some(end)) => seconds_between(start, end),
            _ => None,
        };

        Self {
            peak_memory_mb,
            avg_memory_mb,
            avg_cpu_percent,
            peak_temp_celsius,
            avg_ping_ms,
            net_failures: summary.net_failure_count,
            total_errors: summary.total_errors(),
            error_breakdown,
            warnings: summary.warning_count,
            total_actions: summary.total_actions,
            snapshot_count: summary.snapshot_names.len(),
            duration_secs,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
