//! Field extractor: decides which record kind a line's content is and pulls
//! the typed fields out of it.
//!
//! Markers are tried in a fixed priority order and the first one present
//! decides the kind, even if its fields then fail to parse. The `Target:`
//! header is the exception: it is checked on every line, independently of
//! the kind.
//!
//! Two generations of the monitoring script are in the wild. `[STATUS]` may
//! or may not carry `CPU:`/`Temp:` and `[NETWORK]` may or may not carry a
//! timestamp and a `|` separator. Both are handled by optional sub-groups in
//! one pattern.

use super::types::{Classified, ContentKind, ErrorType, Ping, StatusReading};
use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    header_target: Regex,
    status: Regex,
    network: Regex,
    action: Regex,
    test_start: Regex,
    test_end: Regex,
    stop_reason: Regex,
    non_numeric: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        header_target: Regex::new(r"(?:Target:|目标)\s+([a-zA-Z0-9._]+)").unwrap(),
        status: Regex::new(
            r"\[STATUS\]\s+Mem:(?P<mem>\d+)MB(?:.*?CPU:(?P<cpu>[\d.]+)%)?(?:.*?Temp:(?P<temp>\d+)C)?",
        )
        .unwrap(),
        network: Regex::new(
            r"\[NETWORK\]\s*(?:\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\s*)?(?:\|\s*)?Ping:(?P<val>.+)",
        )
        .unwrap(),
        action: Regex::new(r"\[.+?\]\[#\d+\]\s+(.+)").unwrap(),
        test_start: Regex::new(
            r"(?i)===\s*(?:test\s+start|压测开始)\s*[:：]\s*(?:target\s+|目标\s*)?([a-z0-9._]+)\s*===",
        )
        .unwrap(),
        test_end: Regex::new(
            r"(?i)^===\s*(?:(?:test\s+)?end|压测结束|duration\s+reached.*?|达到设定时长.*?)\s*===$",
        )
        .unwrap(),
        stop_reason: Regex::new(r"^(?:Reason|原因)\s*[:：]\s*(.+)$").unwrap(),
        non_numeric: Regex::new(r"[^0-9.]").unwrap(),
    })
}

/// Run the extractor over one line's content.
pub fn classify_content(content: &str) -> Classified {
    Classified {
        target_header: target_header(content),
        kind: classify_kind(content),
    }
}

fn target_header(content: &str) -> Option<String> {
    if !content.contains("Target:") && !content.contains("目标") {
        return None;
    }
    patterns()
        .header_target
        .captures(content)
        .map(|caps| caps[1].to_string())
}

fn classify_kind(content: &str) -> ContentKind {
    let p = patterns();

    if content.contains("[STATUS]") {
        return parse_status(content).map_or(ContentKind::Ignored, ContentKind::Status);
    }

    if content.contains("[NETWORK]") {
        return parse_ping(content).map_or(ContentKind::Ignored, ContentKind::Network);
    }

    if content.contains("[#") {
        return if p.action.is_match(content) {
            ContentKind::Action
        } else {
            ContentKind::Ignored
        };
    }

    if content.contains("CRITICAL_") {
        return ContentKind::Critical(ErrorType::classify(content));
    }

    if content.contains("[WARN]") {
        return ContentKind::Warning;
    }

    if content.contains("[SNAPSHOT]") {
        return match content.split_whitespace().last() {
            Some(tag) if tag != "[SNAPSHOT]" => ContentKind::Snapshot(tag.to_string()),
            _ => ContentKind::Ignored,
        };
    }

    if let Some(caps) = p.test_start.captures(content) {
        return ContentKind::TestStart {
            target: caps[1].to_string(),
        };
    }

    if p.test_end.is_match(content) {
        return ContentKind::TestEnd;
    }

    if content.contains("[ANR_DETECTED]") {
        return ContentKind::Anr;
    }
    if content.contains("[DIED]") {
        return ContentKind::ProcessDied;
    }
    if content.contains("[ASSERT_PASS]") {
        return ContentKind::AssertPass;
    }
    if content.contains("[ASSERT_FAIL]") {
        return ContentKind::AssertFail;
    }

    if let Some(caps) = p.stop_reason.captures(content) {
        return ContentKind::StopReason(caps[1].trim().to_string());
    }

    ContentKind::Ignored
}

fn parse_status(content: &str) -> Option<StatusReading> {
    let caps = patterns().status.captures(content)?;
    let mem_mb = caps["mem"].parse().ok()?;

    let cpu_percent = caps.name("cpu").and_then(|m| match m.as_str().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::debug!("Skipping malformed CPU value '{}'", m.as_str());
            None
        }
    });
    let temp_celsius = caps.name("temp").and_then(|m| match m.as_str().parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::debug!("Skipping malformed temperature '{}'", m.as_str());
            None
        }
    });

    Some(StatusReading {
        mem_mb,
        cpu_percent,
        temp_celsius,
    })
}

fn parse_ping(content: &str) -> Option<Ping> {
    let p = patterns();
    let caps = p.network.captures(content)?;
    let value = caps["val"].trim();

    if value.contains("TIMEOUT") || value.contains("FAIL") {
        return Some(Ping::Failed);
    }

    let digits = p.non_numeric.replace_all(value, "");
    match digits.parse::<f64>() {
        Ok(ms) => Some(Ping::Latency(ms)),
        Err(_) => {
            log::debug!("Skipping unparsable ping value '{}'", value);
            None
        }
    }
}
