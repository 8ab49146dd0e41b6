use crate::error::{AnalyzeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Analyzer configuration.
///
/// Built once at startup and passed down by reference; nothing reads
/// process-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many of the latest critical errors the HTML report lists
    pub recent_errors: usize,

    /// Latency recorded for a failed ping (ms), also drawn as the timeout line
    pub timeout_sentinel_ms: f64,

    /// Latency above which the ping chart turns red (ms)
    pub ping_warn_ms: f64,

    /// Where `analyze` writes the HTML report
    pub html_output: PathBuf,

    /// Searched in order when no log path is given
    pub default_log_paths: Vec<PathBuf>,

    pub report_title: String,

    pub chart_script_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_errors: 10,
            timeout_sentinel_ms: 1000.0,
            ping_warn_ms: 200.0,
            html_output: PathBuf::from("stress_report.html"),
            default_log_paths: vec![
                PathBuf::from("dist_stress").join("event.log"),
                PathBuf::from("event.log"),
            ],
            report_title: "Dognoise Stress Report".to_string(),
            chart_script_url: "https://cdn.jsdelivr.net/npm/echarts@5.4.3/dist/echarts.min.js"
                .to_string(),
        }
    }
}

impl Config {
    /// Load from a YAML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalyzeError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| AnalyzeError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// First entry of `default_log_paths` that exists on disk
    pub fn find_default_log(&self) -> Option<PathBuf> {
        self.default_log_paths.iter().find(|p| p.is_file()).cloned()
    }
}
