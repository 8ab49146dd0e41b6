use crate::parser::types::{Classified, ContentKind, ErrorType, LogLine, Ping};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default value of `target_package` until a header or start marker names one
pub const UNKNOWN_TARGET: &str = "Unknown";

/// One point of a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub time: String,
    pub value: T,
}

impl<T> Sample<T> {
    pub fn new(time: &str, value: T) -> Self {
        Self {
            time: time.to_string(),
            value,
        }
    }
}

/// One critical error occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub time: String,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub message: String,
}

/// Accumulated result of parsing one run log.
///
/// Counters only go up and series are append-only, in encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Latest timestamp seen anywhere in the log
    #[serde(default)]
    pub last_time: Option<String>,
    pub target_package: String,
    pub total_actions: u64,
    pub mem_records: Vec<Sample<u64>>,
    pub cpu_records: Vec<Sample<f64>>,
    pub temp_records: Vec<Sample<u32>>,
    pub net_records: Vec<Sample<f64>>,
    pub net_failure_count: u64,
    pub error_counts: BTreeMap<ErrorType, u64>,
    pub warning_count: u64,
    pub snapshot_names: Vec<String>,
    pub error_timeline: Vec<ErrorEvent>,
    #[serde(default)]
    pub anr_count: u64,
    #[serde(default)]
    pub process_restarts: u64,
    #[serde(default)]
    pub assert_passed: u64,
    #[serde(default)]
    pub assert_failed: u64,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub dropped_lines: u64,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            start_time: None,
            end_time: None,
            last_time: None,
            target_package: UNKNOWN_TARGET.to_string(),
            total_actions: 0,
            mem_records: Vec::new(),
            cpu_records: Vec::new(),
            temp_records: Vec::new(),
            net_records: Vec::new(),
            net_failure_count: 0,
            error_counts: BTreeMap::new(),
            warning_count: 0,
            snapshot_names: Vec::new(),
            error_timeline: Vec::new(),
            anr_count: 0,
            process_restarts: 0,
            assert_passed: 0,
            assert_failed: 0,
            stop_reason: None,
            dropped_lines: 0,
        }
    }

    /// Note a timestamp carried by an accepted line
    pub fn observe_time(&mut self, time: &str) {
        if self.start_time.is_none() {
            self.start_time = Some(time.to_string());
        }
        self.last_time = Some(time.to_string());
    }

    pub fn error_count(&self, kind: ErrorType) -> u64 {
        self.error_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_errors(&self) -> u64 {
        self.error_counts.values().sum()
    }

    /// Fold one classified line into the summary.
    ///
    /// `time` is the line's effective timestamp, its own or the inherited one.
    /// Start time backfill for header lines happens in `observe_time`.
    pub fn record(
        &mut self,
        line: &LogLine,
        time: &str,
        classified: Classified,
        timeout_sentinel_ms: f64,
    ) {
        if let Some(target) = classified.target_header {
            // First header wins; a start marker may still override it
            if self.target_package == UNKNOWN_TARGET {
                self.target_package = target;
            }
        }

        match classified.kind {
            ContentKind::Status(reading) => {
                self.mem_records.push(Sample::new(time, reading.mem_mb));
                if let Some(cpu) = reading.cpu_percent {
                    self.cpu_records.push(Sample::new(time, cpu));
                }
                if let Some(temp) = reading.temp_celsius {
                    self.temp_records.push(Sample::new(time, temp));
                }
            }
            ContentKind::Network(Ping::Failed) => {
                self.net_failure_count += 1;
                self.net_records.push(Sample::new(time, timeout_sentinel_ms));
            }
            ContentKind::Network(Ping::Latency(ms)) => {
                self.net_records.push(Sample::new(time, ms));
            }
            ContentKind::Action => self.total_actions += 1,
            ContentKind::Critical(error_type) => {
                *self.error_counts.entry(error_type).or_insert(0) += 1;
                self.error_timeline.push(ErrorEvent {
                    time: time.to_string(),
                    error_type,
                    message: line.content.clone(),
                });
            }
            ContentKind::Warning => self.warning_count += 1,
            ContentKind::Snapshot(tag) => self.snapshot_names.push(tag),
            ContentKind::TestStart { target } => {
                self.target_package = target;
                self.start_time = Some(time.to_string());
            }
            ContentKind::TestEnd => self.end_time = Some(time.to_string()),
            ContentKind::Anr => self.anr_count += 1,
            ContentKind::ProcessDied => self.process_restarts += 1,
            ContentKind::AssertPass => self.assert_passed += 1,
            ContentKind::AssertFail => self.assert_failed += 1,
            ContentKind::StopReason(reason) => self.stop_reason = Some(reason),
            ContentKind::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{classify_content, classify_line};

    fn feed(summary: &mut RunSummary, raw: &str) {
        let line = classify_line(raw).unwrap();
        let time = line.own_time().unwrap_or("Unknown").to_string();
        let classified = classify_content(&line.content);
        summary.record(&line, &time, classified, 1000.0);
    }

    #[test]
    fn test_first_header_wins_but_start_marker_overrides() {
        let mut summary = RunSummary::new();
        feed(&mut summary, "Target: com.first.app");
        feed(&mut summary, "Target: com.second.app");
        assert_eq!(summary.target_package, "com.first.app");

        feed(&mut summary, "[2025-12-24 10:00:00] === test start: com.real.app ===");
        assert_eq!(summary.target_package, "com.real.app");
        assert_eq!(summary.start_time.as_deref(), Some("2025-12-24 10:00:00"));
    }

    #[test]
    fn test_failed_ping_appends_sentinel() {
        let mut summary = RunSummary::new();
        feed(&mut summary, "[2025-12-24 10:00:00] [NETWORK] Ping:TIMEOUT");
        assert_eq!(summary.net_failure_count, 1);
        assert_eq!(summary.net_records, vec![Sample::new("2025-12-24 10:00:00", 1000.0)]);
    }

    #[test]
    fn test_critical_goes_to_timeline() {
        let mut summary = RunSummary::new();
        feed(&mut summary, "[2025-12-24 10:00:00] [CRITICAL_KERNEL] audit denied");
        assert_eq!(summary.error_count(ErrorType::Kernel), 1);
        assert_eq!(summary.error_count(ErrorType::Oom), 0);
        assert_eq!(
            summary.error_timeline,
            vec![ErrorEvent {
                time: "2025-12-24 10:00:00".into(),
                error_type: ErrorType::Kernel,
                message: "[CRITICAL_KERNEL] audit denied".into(),
            }]
        );
    }

    #[test]
    fn test_summary_json_uses_camel_case() {
        let mut summary = RunSummary::new();
        feed(&mut summary, "[2025-12-24 10:00:00] [CRITICAL_OOM] lmk");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["targetPackage"], "Unknown");
        assert_eq!(json["errorCounts"]["OOM"], 1);
        assert_eq!(json["errorTimeline"][0]["type"], "OOM");
    }
}
