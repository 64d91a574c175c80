use thiserror::Error;
use tracing::{debug, error};

/// Errors that can occur while orchestrating an explore request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExploreError {
    #[error("Expression has no result column name: {0}")]
    MissingResultName(String),

    #[error("Duplicate group by result name: {0}")]
    DuplicateResultName(String),

    #[error("Group by column '{0}' missing from discovered row")]
    MissingGroupColumn(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Backend query failed: {0}")]
    Backend(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl ExploreError {
    /// True for failures caused by the request shape rather than by a collaborator.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            ExploreError::MissingResultName(_)
                | ExploreError::DuplicateResultName(_)
                | ExploreError::MissingGroupColumn(_)
                | ExploreError::InvalidFilter(_)
        )
    }

    pub fn log_error(&self) {
        match self {
            ExploreError::MissingResultName(e) => {
                error!("Expression has no result column name: {}", e);
                debug!("Missing result name details: {:?}", e);
            }
            ExploreError::DuplicateResultName(e) => {
                error!("Duplicate group by result name: {}", e);
            }
            ExploreError::MissingGroupColumn(e) => {
                error!("Group by column missing from discovered row: {}", e);
            }
            ExploreError::InvalidFilter(e) => {
                error!("Invalid filter: {}", e);
                debug!("Invalid filter details: {}", e);
            }
            ExploreError::Backend(e) => {
                error!("Backend query failed: {}", e);
                debug!("Backend failure details: {}", e);
            }
            ExploreError::Cancelled => {
                debug!("Request cancelled by caller");
            }
            ExploreError::DeadlineExceeded => {
                error!("Request deadline exceeded");
            }
        }
    }
}
