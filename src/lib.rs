pub mod analyzer;
pub mod error;
pub mod parser;
pub mod report;
pub mod utils;

// Re-export common items
pub use analyzer::{parse_log, RunSummary};
pub use error::AnalyzeError;
pub use report::generate_report;
