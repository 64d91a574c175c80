use async_trait::async_trait;
use indexmap::IndexSet;

use super::context::ExploreRequestContext;
use crate::command::types::{ExploreRequest, ExploreResponse, Row};
use crate::engine::errors::ExploreError;

/// Executes an explore request and returns its rows.
///
/// Backend executors (single-phase, time-bucketed) and the orchestrators built on top of them
/// all share this entry point.
#[async_trait]
pub trait ExploreRequestHandler: Send + Sync {
    async fn handle(
        &self,
        ctx: &ExploreRequestContext,
        request: &ExploreRequest,
    ) -> Result<ExploreResponse, ExploreError>;
}

/// Computes the synthetic "rest of groups" rows.
///
/// `original` is the unmodified inbound request; `response` holds the groups already selected.
/// The returned rows are appended by the caller.
#[async_trait]
pub trait RestGroupHandler: Send + Sync {
    async fn rows_for_rest_group(
        &self,
        ctx: &ExploreRequestContext,
        original: &ExploreRequest,
        response: &ExploreResponse,
    ) -> Result<Vec<Row>, ExploreError>;
}

/// Resolves entity ids that are live within the request's time range, from the primary store.
#[async_trait]
pub trait LiveEntityResolver: Send + Sync {
    async fn live_entity_ids(
        &self,
        ctx: &ExploreRequestContext,
        request: &ExploreRequest,
    ) -> Result<IndexSet<String>, ExploreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityIdScope {
    Unscoped,
    Ids(IndexSet<String>),
}

/// Fetches attribute rows from the secondary (entity) store.
#[async_trait]
pub trait EntityStoreFetcher: Send + Sync {
    async fn fetch_rows(
        &self,
        ctx: &ExploreRequestContext,
        request: &ExploreRequest,
        scope: &EntityIdScope,
    ) -> Result<Vec<Row>, ExploreError>;
}
