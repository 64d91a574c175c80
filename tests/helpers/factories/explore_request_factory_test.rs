use crate::command::types::{Expression, FunctionType, SortOrder};
use crate::test_helpers::factories::ExploreRequestFactory;

#[test]
fn test_time_series_factory_shapes_request() {
    let request = ExploreRequestFactory::time_series_by("service").create();

    assert_eq!(request.context, "SERVICE");
    assert_eq!(request.group_by, vec![Expression::column("service")]);
    assert_eq!(request.time_aggregations.len(), 1);
    assert_eq!(
        request.time_aggregations[0].aggregation,
        Expression::function(FunctionType::Avg, "latency").with_alias("latency_avg")
    );
    assert_eq!(request.order_by[0].order, SortOrder::Desc);
    assert_eq!(request.limit, 10);
    assert!(!request.include_rest_group);
}

#[test]
fn test_grouped_factory_with_pagination() {
    let request = ExploreRequestFactory::grouped_by("name")
        .with_limit(2)
        .with_offset(1)
        .with_rest_group(true)
        .create();

    assert_eq!(request.selections.len(), 1);
    assert_eq!(request.limit, 2);
    assert_eq!(request.offset, 1);
    assert!(request.include_rest_group);
    assert!(request.time_aggregations.is_empty());
}
