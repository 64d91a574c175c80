pub mod explore;
pub mod pagination;
pub mod row_comparator;
