use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::context::ExploreRequestContext;
use super::in_clause::InClauseFilterBuilder;
use super::traits::{ExploreRequestHandler, RestGroupHandler};
use crate::command::builder::ExploreRequestBuilder;
use crate::command::types::{ExploreRequest, ExploreResponse};
use crate::engine::errors::ExploreError;

/// Answers time-aggregation requests that also group, in three dependent phases:
///
/// 1. Group discovery: the time aggregations are evaluated over the whole range through the
///    single-phase handler to find which groups make the cut.
/// 2. Detail: the original request, restricted to the discovered groups, runs through the
///    time-aggregation handler.
/// 3. Rest group: when requested, one extra row aggregates every group outside that set.
pub struct TimeAggregationsWithGroupByHandler {
    single_phase: Arc<dyn ExploreRequestHandler>,
    time_aggregations: Arc<dyn ExploreRequestHandler>,
    rest_group: Arc<dyn RestGroupHandler>,
}

impl TimeAggregationsWithGroupByHandler {
    pub fn new(
        single_phase: Arc<dyn ExploreRequestHandler>,
        time_aggregations: Arc<dyn ExploreRequestHandler>,
        rest_group: Arc<dyn RestGroupHandler>,
    ) -> Self {
        Self {
            single_phase,
            time_aggregations,
            rest_group,
        }
    }

    /// Discovery request: time aggregations become plain selections, and offset and
    /// rest group are cleared since both only apply to the final groups.
    pub fn build_group_by_request(original: &ExploreRequest) -> ExploreRequest {
        original
            .time_aggregations
            .iter()
            .fold(
                ExploreRequestBuilder::from_request(original)
                    .clear_time_aggregations()
                    .clear_offset()
                    .include_rest_group(false),
                |builder, ta| builder.add_selection(ta.aggregation.clone()),
            )
            .build()
    }

    /// Detail request: the original request scoped to the discovered groups, rest group off.
    pub fn build_time_aggregations_request(
        original: &ExploreRequest,
        group_by_response: &ExploreResponse,
    ) -> Result<ExploreRequest, ExploreError> {
        let in_clause =
            InClauseFilterBuilder::new(&original.group_by).build(&group_by_response.rows)?;

        let request = ExploreRequestBuilder::from_request(original)
            .include_rest_group(false)
            .conjoin_filter(in_clause)
            .build();
        Ok(request)
    }
}

#[async_trait]
impl ExploreRequestHandler for TimeAggregationsWithGroupByHandler {
    async fn handle(
        &self,
        ctx: &ExploreRequestContext,
        request: &ExploreRequest,
    ) -> Result<ExploreResponse, ExploreError> {
        request.validate_group_by()?;

        info!(
            target: "explore_gateway::time_aggregations_group_by",
            request_id = %ctx.request_id,
            group_by = request.group_by.len(),
            time_aggregations = request.time_aggregations.len(),
            "Starting time aggregations with group by"
        );

        // Step 1: discover the groups
        let group_by_request = Self::build_group_by_request(request);
        let group_by_ctx = ctx.child();
        let group_by_response = group_by_ctx
            .guard(self.single_phase.handle(&group_by_ctx, &group_by_request))
            .await?;

        if group_by_response.is_empty() {
            debug!(
                target: "explore_gateway::time_aggregations_group_by",
                request_id = %ctx.request_id,
                "No groups discovered, skipping time aggregations"
            );
            return Ok(ExploreResponse::empty());
        }

        debug!(
            target: "explore_gateway::time_aggregations_group_by",
            request_id = %ctx.request_id,
            group_count = group_by_response.len(),
            "Discovered groups"
        );

        // Step 2: time series for the discovered groups
        let time_aggregations_request =
            Self::build_time_aggregations_request(request, &group_by_response)?;
        let time_aggregations_ctx = ctx.child();
        let mut response = time_aggregations_ctx
            .guard(
                self.time_aggregations
                    .handle(&time_aggregations_ctx, &time_aggregations_request),
            )
            .await?;

        // Step 3: rest group against the original request
        if request.include_rest_group {
            let rest_rows = ctx
                .guard(self.rest_group.rows_for_rest_group(ctx, request, &response))
                .await?;
            debug!(
                target: "explore_gateway::time_aggregations_group_by",
                request_id = %ctx.request_id,
                rest_rows = rest_rows.len(),
                "Appending rest group rows"
            );
            response.extend_rows(rest_rows);
        }

        info!(
            target: "explore_gateway::time_aggregations_group_by",
            request_id = %ctx.request_id,
            row_count = response.len(),
            "Time aggregations with group by complete"
        );

        Ok(response)
    }
}
