pub mod explore_request_factory;
pub mod filter_factory;
pub mod row_factory;

pub use explore_request_factory::ExploreRequestFactory;
pub use filter_factory::FilterFactory;
pub use row_factory::RowFactory;

#[cfg(test)]
mod explore_request_factory_test;
#[cfg(test)]
mod row_factory_test;
