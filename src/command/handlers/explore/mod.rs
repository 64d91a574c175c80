pub mod context;
pub mod dispatch;
pub mod entity;
pub mod in_clause;
pub mod time_aggregations_group_by;
pub mod traits;

pub use context::{AttributeSource, ExploreRequestContext};
pub use dispatch::{ExploreCollaborators, ExploreService, ExploreStrategy};
pub use entity::EntityRequestHandler;
pub use in_clause::InClauseFilterBuilder;
pub use time_aggregations_group_by::TimeAggregationsWithGroupByHandler;
pub use traits::{
    EntityIdScope, EntityStoreFetcher, ExploreRequestHandler, LiveEntityResolver,
    RestGroupHandler,
};
