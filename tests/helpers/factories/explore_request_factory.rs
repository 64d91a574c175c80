use crate::command::builder::ExploreRequestBuilder;
use crate::command::types::{
    ExploreRequest, Expression, Filter, FunctionType, OrderByExpression, Period,
    TimeAggregation, TimeUnit,
};

pub struct ExploreRequestFactory {
    builder: ExploreRequestBuilder,
}

impl ExploreRequestFactory {
    pub fn new() -> Self {
        Self {
            builder: ExploreRequestBuilder::new()
                .context("SERVICE")
                .time_range(1_700_000_000_000, 1_700_003_600_000)
                .limit(10),
        }
    }

    /// `AVG(latency) AS latency_avg` per minute, grouped by `column`, ordered by the average.
    pub fn time_series_by(column: &str) -> Self {
        Self::new()
            .with_group_by(column)
            .with_time_aggregation(
                Expression::function(FunctionType::Avg, "latency").with_alias("latency_avg"),
                60,
            )
            .with_order_by(OrderByExpression::desc(
                Expression::function(FunctionType::Avg, "latency").with_alias("latency_avg"),
            ))
    }

    /// `COUNT(id) AS count` grouped by `column`.
    pub fn grouped_by(column: &str) -> Self {
        Self::new()
            .with_group_by(column)
            .with_selection(Expression::function(FunctionType::Count, "id").with_alias("count"))
    }

    pub fn with_group_by(mut self, column: &str) -> Self {
        self.builder = self.builder.add_group_by(Expression::column(column));
        self
    }

    pub fn with_group_by_expression(mut self, expression: Expression) -> Self {
        self.builder = self.builder.add_group_by(expression);
        self
    }

    pub fn with_selection(mut self, expression: Expression) -> Self {
        self.builder = self.builder.add_selection(expression);
        self
    }

    pub fn with_time_aggregation(mut self, aggregation: Expression, seconds: u32) -> Self {
        self.builder = self.builder.add_time_aggregation(TimeAggregation {
            period: Period {
                unit: TimeUnit::Seconds,
                value: seconds,
            },
            aggregation,
        });
        self
    }

    pub fn with_order_by(mut self, order_by: OrderByExpression) -> Self {
        self.builder = self.builder.add_order_by(order_by);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.builder = self.builder.filter(filter);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.builder = self.builder.limit(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.builder = self.builder.offset(offset);
        self
    }

    pub fn with_rest_group(mut self, include: bool) -> Self {
        self.builder = self.builder.include_rest_group(include);
        self
    }

    pub fn with_non_live_entities(mut self, include: bool) -> Self {
        self.builder = self.builder.include_non_live_entities(include);
        self
    }

    pub fn create(self) -> ExploreRequest {
        self.builder.build()
    }
}
