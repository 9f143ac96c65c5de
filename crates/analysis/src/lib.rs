pub mod report;
pub mod summary;
pub mod timestamps;

pub use summary::{summarize, CommitSpan, CommitterCount, SummaryResult, UNKNOWN_AUTHOR};
pub use timestamps::parse_timestamp;
