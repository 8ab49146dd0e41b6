pub mod state;

use crate::error::{AnalyzeError, Result};
use crate::parser::{classify_content, classify_line, types::UNKNOWN_TIME};
use crate::utils::config::Config;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use state::*;

/// Parse a run log from disk.
///
/// A missing file is the only failure; nothing is summarised in that case.
/// The file handle lives only for the duration of the scan.
pub fn parse_log(path: &Path, config: &Config) -> Result<RunSummary> {
    if !path.is_file() {
        return Err(AnalyzeError::LogNotFound {
            path: path.to_path_buf(),
        });
    }

    log::info!("Analyzing log: {}", path.display());
    let file = File::open(path).map_err(|e| AnalyzeError::read_log(path, e))?;
    let summary =
        parse_reader(BufReader::new(file), config).map_err(|e| AnalyzeError::read_log(path, e))?;

    log::info!(
        "Parsed {}: {} memory samples, {} pings, {} errors, {} dropped lines",
        path.display(),
        summary.mem_records.len(),
        summary.net_records.len(),
        summary.total_errors(),
        summary.dropped_lines
    );
    Ok(summary)
}

/// Single pass over any buffered reader.
///
/// Lines are decoded leniently; invalid UTF-8 is replaced, never fatal.
pub fn parse_reader<R: BufRead>(mut reader: R, config: &Config) -> std::io::Result<RunSummary> {
    let mut summary = RunSummary::new();
    let mut last_seen: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let raw = String::from_utf8_lossy(&buf);
        let Some(line) = classify_line(&raw) else {
            continue;
        };

        let classified = classify_content(&line.content);
        if !line.has_prefix() && classified.is_empty() {
            log::debug!("Dropping unrecognised line: {}", line.content);
            summary.dropped_lines += 1;
            continue;
        }

        if let Some(own) = line.own_time() {
            summary.observe_time(own);
            last_seen = Some(own.to_string());
        }
        let time = last_seen.as_deref().unwrap_or(UNKNOWN_TIME).to_string();

        summary.record(&line, &time, classified, config.timeout_sentinel_ms);
    }

    Ok(summary)
}
