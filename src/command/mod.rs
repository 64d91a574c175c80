pub mod builder;
pub mod handlers;
pub mod types;

pub use builder::ExploreRequestBuilder;
pub use types::{ExploreRequest, ExploreResponse, Row};
