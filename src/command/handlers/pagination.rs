use super::row_comparator::RowComparator;
use crate::command::types::{OrderByExpression, Row};
use crate::engine::errors::ExploreError;

/// Applies offset then limit.
///
/// For `n` rows the result is the slice starting at `offset` with length
/// `min(limit, n - offset)`; an offset at or past the end yields no rows.
pub fn apply_pagination(rows: Vec<Row>, offset: u32, limit: u32) -> Vec<Row> {
    let offset = offset as usize;
    if offset >= rows.len() {
        return Vec::new();
    }
    rows.into_iter().skip(offset).take(limit as usize).collect()
}

/// Sorts rows by the order-by keys, then paginates the sorted list.
pub fn sort_and_paginate(
    mut rows: Vec<Row>,
    order_by: &[OrderByExpression],
    limit: u32,
    offset: u32,
) -> Result<Vec<Row>, ExploreError> {
    let comparator = RowComparator::new(order_by)?;
    comparator.sort(&mut rows);
    Ok(apply_pagination(rows, offset, limit))
}
