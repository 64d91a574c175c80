use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::context::ExploreRequestContext;
use super::traits::{
    EntityIdScope, EntityStoreFetcher, ExploreRequestHandler, LiveEntityResolver,
    RestGroupHandler,
};
use crate::command::handlers::pagination::sort_and_paginate;
use crate::command::types::{ExploreRequest, ExploreResponse};
use crate::engine::errors::ExploreError;

/// Serves explore requests whose selections, group bys and filters live in the entity store.
///
/// The entity store has no notion of liveness, so unless non-live entities are requested the
/// ids live within the time range are first resolved from the primary store and the entity
/// query is scoped to them. With a group by, ordering and pagination are redone locally since
/// the entity store's own cannot be trusted across the federation.
pub struct EntityRequestHandler {
    live_entities: Arc<dyn LiveEntityResolver>,
    entity_store: Arc<dyn EntityStoreFetcher>,
    rest_group: Arc<dyn RestGroupHandler>,
}

impl EntityRequestHandler {
    pub fn new(
        live_entities: Arc<dyn LiveEntityResolver>,
        entity_store: Arc<dyn EntityStoreFetcher>,
        rest_group: Arc<dyn RestGroupHandler>,
    ) -> Self {
        Self {
            live_entities,
            entity_store,
            rest_group,
        }
    }
}

#[async_trait]
impl ExploreRequestHandler for EntityRequestHandler {
    async fn handle(
        &self,
        ctx: &ExploreRequestContext,
        request: &ExploreRequest,
    ) -> Result<ExploreResponse, ExploreError> {
        let live_only = request.on_live_entities_only();
        info!(
            target: "explore_gateway::entity",
            request_id = %ctx.request_id,
            live_only,
            has_group_by = request.has_group_by(),
            "Starting entity request"
        );

        let scope = if live_only {
            let ids = ctx
                .guard(self.live_entities.live_entity_ids(ctx, request))
                .await?;
            if ids.is_empty() {
                debug!(
                    target: "explore_gateway::entity",
                    request_id = %ctx.request_id,
                    "No live entities in time range, skipping entity store"
                );
                return Ok(ExploreResponse::empty());
            }
            debug!(
                target: "explore_gateway::entity",
                request_id = %ctx.request_id,
                entity_count = ids.len(),
                "Resolved live entity ids"
            );
            EntityIdScope::Ids(ids)
        } else {
            EntityIdScope::Unscoped
        };

        let rows = ctx
            .guard(self.entity_store.fetch_rows(ctx, request, &scope))
            .await?;

        if !request.has_group_by() {
            return Ok(ExploreResponse::from_rows(rows));
        }

        let fetched = rows.len();
        let mut response = ExploreResponse::from_rows(sort_and_paginate(
            rows,
            &request.order_by,
            request.row_limit_before_rest(),
            request.offset,
        )?);
        debug!(
            target: "explore_gateway::entity",
            request_id = %ctx.request_id,
            fetched,
            kept = response.len(),
            "Sorted and paginated grouped rows"
        );

        if request.include_rest_group {
            let rest_rows = ctx
                .guard(self.rest_group.rows_for_rest_group(ctx, request, &response))
                .await?;
            response.extend_rows(rest_rows);
        }

        Ok(response)
    }
}
