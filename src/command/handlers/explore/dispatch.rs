use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::context::{AttributeSource, ExploreRequestContext};
use super::entity::EntityRequestHandler;
use super::time_aggregations_group_by::TimeAggregationsWithGroupByHandler;
use super::traits::{
    EntityStoreFetcher, ExploreRequestHandler, LiveEntityResolver, RestGroupHandler,
};
use crate::command::types::{ExploreRequest, ExploreResponse};
use crate::engine::errors::ExploreError;
use crate::shared::config::model::ExploreConfig;

/// Execution path chosen for a request from its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreStrategy {
    SinglePhase,
    TimeAggregations,
    TimeAggregationsWithGroupBy,
    EntityFederation,
}

impl ExploreStrategy {
    pub fn for_request(request: &ExploreRequest, source: AttributeSource) -> Self {
        match (
            source,
            request.has_time_aggregations(),
            request.has_group_by(),
        ) {
            (AttributeSource::Secondary, false, _) => ExploreStrategy::EntityFederation,
            (_, true, true) => ExploreStrategy::TimeAggregationsWithGroupBy,
            (_, true, false) => ExploreStrategy::TimeAggregations,
            (_, false, _) => ExploreStrategy::SinglePhase,
        }
    }
}

/// Collaborators backing an [`ExploreService`].
#[derive(Clone)]
pub struct ExploreCollaborators {
    pub single_phase: Arc<dyn ExploreRequestHandler>,
    pub time_aggregations: Arc<dyn ExploreRequestHandler>,
    pub rest_group: Arc<dyn RestGroupHandler>,
    pub live_entities: Arc<dyn LiveEntityResolver>,
    pub entity_store: Arc<dyn EntityStoreFetcher>,
}

/// Routes each explore request to the handler for its strategy.
pub struct ExploreService {
    config: ExploreConfig,
    single_phase: Arc<dyn ExploreRequestHandler>,
    time_aggregations: Arc<dyn ExploreRequestHandler>,
    time_aggregations_group_by: TimeAggregationsWithGroupByHandler,
    entity: EntityRequestHandler,
}

impl ExploreService {
    pub fn new(collaborators: ExploreCollaborators, config: ExploreConfig) -> Self {
        let time_aggregations_group_by = TimeAggregationsWithGroupByHandler::new(
            Arc::clone(&collaborators.single_phase),
            Arc::clone(&collaborators.time_aggregations),
            Arc::clone(&collaborators.rest_group),
        );
        let entity = EntityRequestHandler::new(
            collaborators.live_entities,
            collaborators.entity_store,
            collaborators.rest_group,
        );
        Self {
            config,
            single_phase: collaborators.single_phase,
            time_aggregations: collaborators.time_aggregations,
            time_aggregations_group_by,
            entity,
        }
    }

    /// Fresh request context carrying the configured deadline.
    pub fn new_context(&self, request_id: &str) -> ExploreRequestContext {
        ExploreRequestContext::from_config(request_id, &self.config)
    }

    fn handler_for(&self, strategy: ExploreStrategy) -> &dyn ExploreRequestHandler {
        match strategy {
            ExploreStrategy::SinglePhase => self.single_phase.as_ref(),
            ExploreStrategy::TimeAggregations => self.time_aggregations.as_ref(),
            ExploreStrategy::TimeAggregationsWithGroupBy => &self.time_aggregations_group_by,
            ExploreStrategy::EntityFederation => &self.entity,
        }
    }
}

#[async_trait]
impl ExploreRequestHandler for ExploreService {
    async fn handle(
        &self,
        ctx: &ExploreRequestContext,
        request: &ExploreRequest,
    ) -> Result<ExploreResponse, ExploreError> {
        if let Some(filter) = &request.filter {
            filter.validate()?;
        }

        let strategy = ExploreStrategy::for_request(request, ctx.attribute_source);
        debug!(
            target: "explore_gateway::dispatch",
            request_id = %ctx.request_id,
            ?strategy,
            "Dispatching explore request"
        );

        let result = ctx
            .guard(self.handler_for(strategy).handle(ctx, request))
            .await;

        if let Err(error) = &result {
            warn!(
                target: "explore_gateway::dispatch",
                request_id = %ctx.request_id,
                ?strategy,
                error = %error,
                invariant_violation = error.is_invariant_violation(),
                "Explore request failed"
            );
            error.log_error();
        }
        result
    }
}
