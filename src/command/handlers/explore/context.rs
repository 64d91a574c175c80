use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::engine::errors::ExploreError;
use crate::shared::config::model::ExploreConfig;

/// Store that holds the attributes a request targets, as decided by upstream routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeSource {
    #[default]
    Primary,
    Secondary,
}

/// Request-scoped execution context threaded through every delegated call.
#[derive(Debug, Clone)]
pub struct ExploreRequestContext {
    pub request_id: String,
    pub attribute_source: AttributeSource,
    pub metadata: HashMap<String, String>,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ExploreRequestContext {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            attribute_source: AttributeSource::default(),
            metadata: HashMap::new(),
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn from_config(request_id: &str, config: &ExploreConfig) -> Self {
        let ctx = Self::new(request_id);
        match config.request_timeout() {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_attribute_source(mut self, source: AttributeSource) -> Self {
        self.attribute_source = source;
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Context for a sub-phase: same deadline and metadata, cancelled whenever this one is.
    pub fn child(&self) -> Self {
        Self {
            request_id: self.request_id.clone(),
            attribute_source: self.attribute_source,
            metadata: self.metadata.clone(),
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    /// Runs a delegated call, abandoning it when the request is cancelled or its deadline passes.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T, ExploreError>
    where
        F: Future<Output = Result<T, ExploreError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(ExploreError::Cancelled);
        }

        let cancellable = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(ExploreError::Cancelled),
                result = fut => result,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, cancellable)
                .await
                .map_err(|_| ExploreError::DeadlineExceeded)?,
            None => cancellable.await,
        }
    }
}
