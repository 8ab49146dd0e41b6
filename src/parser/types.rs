use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a line has no timestamp and none was seen before it.
pub const UNKNOWN_TIME: &str = "Unknown";

/// Where a line's timestamp came from
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSource {
    /// `[YYYY-MM-DD HH:MM:SS] content`, the normal shape
    Prefix(String),
    /// No prefix, but a timestamp appears somewhere inside the line
    Embedded(String),
    /// No timestamp at all; the caller inherits the last one seen
    Missing,
}

/// One trimmed, non-blank log line split into timestamp and content
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub time: TimeSource,
    pub content: String,
}

impl LogLine {
    /// Timestamp carried by the line itself, if any
    pub fn own_time(&self) -> Option<&str> {
        match &self.time {
            TimeSource::Prefix(t) | TimeSource::Embedded(t) => Some(t.as_str()),
            TimeSource::Missing => None,
        }
    }

    pub fn has_prefix(&self) -> bool {
        matches!(self.time, TimeSource::Prefix(_))
    }
}

/// Closed set of critical error categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    Oom,
    Media,
    Audio,
    Kernel,
    SystemError,
}

impl ErrorType {
    pub const ALL: [ErrorType; 5] = [
        ErrorType::Oom,
        ErrorType::Media,
        ErrorType::Audio,
        ErrorType::Kernel,
        ErrorType::SystemError,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ErrorType::Oom => "OOM",
            ErrorType::Media => "MEDIA",
            ErrorType::Audio => "AUDIO",
            ErrorType::Kernel => "KERNEL",
            ErrorType::SystemError => "SYSTEM_ERROR",
        }
    }

    /// Case-sensitive substring scan, first match wins.
    pub fn classify(content: &str) -> Self {
        [
            ("OOM", ErrorType::Oom),
            ("MEDIA", ErrorType::Media),
            ("AUDIO", ErrorType::Audio),
            ("KERNEL", ErrorType::Kernel),
        ]
        .iter()
        .find(|(needle, _)| content.contains(needle))
        .map(|(_, kind)| *kind)
        .unwrap_or(ErrorType::SystemError)
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Values pulled from a `[STATUS]` line. Memory is mandatory, the rest are not.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReading {
    pub mem_mb: u64,
    pub cpu_percent: Option<f64>,
    pub temp_celsius: Option<u32>,
}

/// Outcome of one ping sample
#[derive(Debug, Clone, PartialEq)]
pub enum Ping {
    Latency(f64),
    Failed,
}

/// What a line's content turned out to be. Exactly one per line.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Status(StatusReading),
    Network(Ping),
    Action,
    Critical(ErrorType),
    Warning,
    Snapshot(String),
    TestStart { target: String },
    TestEnd,
    Anr,
    ProcessDied,
    AssertPass,
    AssertFail,
    StopReason(String),
    /// Marker recognised but nothing usable extracted, or no marker at all
    Ignored,
}

/// Result of running the extractor over one line's content
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// Package named by a `Target:` header; evaluated independently of `kind`
    pub target_header: Option<String>,
    pub kind: ContentKind,
}

impl Classified {
    /// True when the line carries nothing the aggregator would use
    pub fn is_empty(&self) -> bool {
        self.target_header.is_none() && self.kind == ContentKind::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_precedence() {
        assert_eq!(
            ErrorType::classify("[CRITICAL_OOM] MEDIA provider leak"),
            ErrorType::Oom
        );
        assert_eq!(ErrorType::classify("[CRITICAL_AUDIO]"), ErrorType::Audio);
        assert_eq!(
            ErrorType::classify("[CRITICAL_UNKNOWN] something"),
            ErrorType::SystemError
        );
        // case-sensitive
        assert_eq!(
            ErrorType::classify("[CRITICAL_X] oom killer"),
            ErrorType::SystemError
        );
    }

    #[test]
    fn test_error_type_serializes_as_label() {
        let json = serde_json::to_string(&ErrorType::SystemError).unwrap();
        assert_eq!(json, "\"SYSTEM_ERROR\"");
        for kind in ErrorType::ALL {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.label())
            );
        }
    }
}
