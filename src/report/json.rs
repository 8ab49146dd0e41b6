use crate::analyzer::RunSummary;
use crate::error::{AnalyzeError, Result};
use std::path::Path;

/// Save the summary as pretty JSON
pub fn write_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).map_err(|e| AnalyzeError::write_output(path, e))?;
    println!("JSON summary saved to: {}", path.display());
    Ok(())
}

/// Load a summary previously saved with `write_json`
pub fn read_json(path: &Path) -> Result<RunSummary> {
    let content =
        std::fs::read_to_string(path).map_err(|source| AnalyzeError::ReadSummary {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ErrorEvent, Sample};
    use crate::parser::types::ErrorType;

    #[test]
    fn test_saved_summary_loads_back() {
        let mut summary = RunSummary::new();
        summary.target_package = "com.example.app".into();
        summary.start_time = Some("2025-12-24 10:00:00".into());
        summary.mem_records = vec![Sample::new("2025-12-24 10:00:00", 128)];
        summary.net_records = vec![Sample::new("2025-12-24 10:00:00", 1000.0)];
        summary.net_failure_count = 1;
        summary.error_counts.insert(ErrorType::SystemError, 2);
        summary.error_timeline.push(ErrorEvent {
            time: "2025-12-24 10:00:00".into(),
            error_type: ErrorType::SystemError,
            message: "[CRITICAL_UNKNOWN] ???".into(),
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_json(&summary, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"SYSTEM_ERROR\": 2"));
        assert_eq!(read_json(&path).unwrap(), summary);
    }

    #[test]
    fn test_read_json_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(read_json(&path), Err(AnalyzeError::Json(_))));
    }
}
