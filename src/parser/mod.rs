pub mod content;
pub mod line;
pub mod types;

pub use content::classify_content;
pub use line::classify_line;
pub use types::{Classified, ContentKind, ErrorType, LogLine, Ping, StatusReading, TimeSource};
