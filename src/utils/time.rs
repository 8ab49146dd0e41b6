use chrono::NaiveDateTime;

/// Timestamp layout written by the monitoring script
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_log_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, LOG_TIME_FORMAT).ok()
}

/// Seconds between two log timestamps, `None` if either is unparsable or
/// the end precedes the start (device clock jumps happen).
pub fn seconds_between(start: &str, end: &str) -> Option<i64> {
    let secs = (parse_log_time(end)? - parse_log_time(start)?).num_seconds();
    (secs >= 0).then_some(secs)
}

pub fn format_duration(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_between() {
        assert_eq!(
            seconds_between("2025-12-24 10:00:00", "2025-12-24 11:01:05"),
            Some(3665)
        );
        assert_eq!(seconds_between("2025-12-24 10:00:00", "Unknown"), None);
        assert_eq!(
            seconds_between("2025-12-24 10:00:00", "2025-12-24 09:00:00"),
            None
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3665), "1h 1m 5s");
    }
}
