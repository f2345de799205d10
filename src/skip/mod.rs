//! Skip-list persistence and the skipped-video report

mod report;
mod store;

pub use report::SkipReport;
pub use store::SkipList;

use thiserror::Error;

/// Errors that can occur while writing skip files
#[derive(Debug, Error)]
pub enum SkipStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
