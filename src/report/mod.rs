pub mod html;
pub mod json;
pub mod series;
pub mod stats;
pub mod text;

use crate::analyzer::RunSummary;
use crate::error::{AnalyzeError, Result};
use crate::utils::config::Config;
use std::path::Path;

pub use stats::SummaryStats;

/// Render a summary in the given format.
///
/// Without an output path, text goes to stdout and the file formats fall
/// back to their defaults (HTML to `config.html_output`).
pub fn render(
    summary: &RunSummary,
    format: &str,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    match format {
        "text" => {
            let stats = SummaryStats::from_summary(summary, config.timeout_sentinel_ms);
            let rendered = text::render_text(summary, &stats);
            match output {
                Some(path) => {
                    std::fs::write(path, rendered)
                        .map_err(|e| AnalyzeError::write_output(path, e))?;
                    println!("Text summary saved to: {}", path.display());
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }
        "html" => {
            let path = output.unwrap_or(config.html_output.as_path());
            html::write_html(summary, config, path)
        }
        "json" => match output {
            Some(path) => json::write_json(summary, path),
            None => {
                println!("{}", serde_json::to_string_pretty(summary)?);
                Ok(())
            }
        },
        "csv" => match output {
            Some(path) => series::write_csv(summary, path),
            None => series::write_series(summary, std::io::stdout()),
        },
        _ => Err(AnalyzeError::UnknownFormat(format.to_string())),
    }
}

/// Re-render a summary saved earlier as JSON
pub fn generate_report(
    summary_path: &Path,
    format: &str,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let summary = json::read_json(summary_path)?;
    render(&summary, format, output, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format() {
        let err = render(&RunSummary::new(), "pdf", None, &Config::default()).unwrap_err();
        assert!(matches!(err, AnalyzeError::UnknownFormat(f) if f == "pdf"));
    }

    #[test]
    fn test_generate_report_from_saved_json() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("summary.json");
        let html_path = dir.path().join("out.html");

        let mut summary = RunSummary::new();
        summary.target_package = "com.saved.app".into();
        json::write_json(&summary, &json_path).unwrap();

        generate_report(&json_path, "html", Some(&html_path), &Config::default()).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("com.saved.app"));
    }
}
