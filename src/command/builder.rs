use super::types::{
    ContextOption, EntityOption, ExploreRequest, Expression, Filter, OrderByExpression,
    TimeAggregation,
};

/// Copy-with-overrides construction of explore requests.
///
/// Derived phase requests start from `from_request`, which clones the base request, so the
/// original stays untouched for later phases.
#[derive(Debug, Clone, Default)]
pub struct ExploreRequestBuilder {
    inner: ExploreRequest,
}

impl ExploreRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_request(request: &ExploreRequest) -> Self {
        Self {
            inner: request.clone(),
        }
    }

    pub fn context(mut self, context: &str) -> Self {
        self.inner.context = context.to_string();
        self
    }

    pub fn time_range(mut self, start_time_millis: i64, end_time_millis: i64) -> Self {
        self.inner.start_time_millis = start_time_millis;
        self.inner.end_time_millis = end_time_millis;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.inner.filter = Some(filter);
        self
    }

    /// Adds `filter` to the current filter as a conjunct.
    pub fn conjoin_filter(mut self, filter: Filter) -> Self {
        self.inner.filter = Some(match self.inner.filter.take() {
            Some(existing) => existing.conjoin(filter),
            None => filter,
        });
        self
    }

    pub fn add_selection(mut self, expression: Expression) -> Self {
        self.inner.selections.push(expression);
        self
    }

    pub fn add_time_aggregation(mut self, time_aggregation: TimeAggregation) -> Self {
        self.inner.time_aggregations.push(time_aggregation);
        self
    }

    pub fn clear_time_aggregations(mut self) -> Self {
        self.inner.time_aggregations.clear();
        self
    }

    pub fn add_group_by(mut self, expression: Expression) -> Self {
        self.inner.group_by.push(expression);
        self
    }

    pub fn add_order_by(mut self, order_by: OrderByExpression) -> Self {
        self.inner.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.inner.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.inner.offset = offset;
        self
    }

    pub fn clear_offset(self) -> Self {
        self.offset(0)
    }

    pub fn include_rest_group(mut self, include: bool) -> Self {
        self.inner.include_rest_group = include;
        self
    }

    pub fn include_non_live_entities(mut self, include: bool) -> Self {
        self.inner.context_option = Some(ContextOption {
            entity_option: Some(EntityOption {
                include_non_live_entities: include,
            }),
        });
        self
    }

    pub fn build(self) -> ExploreRequest {
        self.inner
    }
}
