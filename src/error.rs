use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("layout profiling failed: {0}")]
    Profiling(String),

    #[error("fragment {fragment} on page {page} cannot be tagged: {reason}")]
    Tagging {
        page: usize,
        fragment: usize,
        reason: String,
    },

    #[error("cannot extract session metadata from {filename}: {reason}")]
    MetadataExtraction { filename: String, reason: String },

    #[error("no line yields a session date in any accepted format ({formats})")]
    DateParse { formats: String },

    #[error("segmentation exceeded {limit:?} after {lines} lines")]
    SegmentationTimeout { limit: Duration, lines: usize },
}
