//! Line classifier: splits a raw log line into timestamp and content.

use super::types::{LogLine, TimeSource};
use regex::Regex;
use std::sync::OnceLock;

fn prefixed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\]\s+(.+)$").unwrap()
    })
}

fn embedded_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap())
}

/// Classify one raw line. Returns `None` for blank input.
///
/// `[YYYY-MM-DD HH:MM:SS] content` yields the prefix timestamp and the
/// remaining content. Anything else keeps the whole line as content; if a
/// timestamp is embedded somewhere in it (older `[NETWORK] <ts> | Ping:` and
/// `!!! [<ts>] [CRITICAL_..]` shapes) that one is used.
pub fn classify_line(raw: &str) -> Option<LogLine> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = prefixed_re().captures(line) {
        return Some(LogLine {
            time: TimeSource::Prefix(caps[1].to_string()),
            content: caps[2].to_string(),
        });
    }

    let time = match embedded_re().find(line) {
        Some(m) => TimeSource::Embedded(m.as_str().to_string()),
        None => TimeSource::Missing,
    };

    Some(LogLine {
        time,
        content: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_line() {
        let line = classify_line("  [2025-12-24 10:00:00] [STATUS] Mem:120MB  ").unwrap();
        assert_eq!(line.time, TimeSource::Prefix("2025-12-24 10:00:00".into()));
        assert_eq!(line.content, "[STATUS] Mem:120MB");
        assert!(line.has_prefix());
    }

    #[test]
    fn test_blank_line() {
        assert!(classify_line("").is_none());
        assert!(classify_line("   \t").is_none());
    }

    #[test]
    fn test_header_without_timestamp() {
        let line = classify_line("Target: com.example.app").unwrap();
        assert_eq!(line.time, TimeSource::Missing);
        assert_eq!(line.content, "Target: com.example.app");
        assert_eq!(line.own_time(), None);
    }

    #[test]
    fn test_embedded_timestamp() {
        let line = classify_line("[NETWORK] 2025-12-24 10:01:00 | Ping:12.5").unwrap();
        assert_eq!(line.time, TimeSource::Embedded("2025-12-24 10:01:00".into()));
        assert_eq!(line.content, "[NETWORK] 2025-12-24 10:01:00 | Ping:12.5");
        assert!(!line.has_prefix());
    }

    #[test]
    fn test_malformed_prefix_falls_back() {
        // Date without time is not a prefix timestamp
        let line = classify_line("[2025-12-24] hello").unwrap();
        assert_eq!(line.time, TimeSource::Missing);
    }
}
