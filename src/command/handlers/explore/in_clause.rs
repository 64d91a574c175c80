use indexmap::IndexSet;

use crate::command::types::{Expression, Filter, Row};
use crate::engine::errors::ExploreError;
use crate::engine::types::Value;

/// Builds the filter that scopes a detail query to the groups found during discovery.
///
/// One `IN` child is emitted per group-by expression, all under a single AND. Each column is
/// restricted independently, so with several group-by columns the filter admits any
/// combination of the discovered values, not only the tuples that co-occurred.
pub struct InClauseFilterBuilder<'a> {
    group_by: &'a [Expression],
}

impl<'a> InClauseFilterBuilder<'a> {
    pub fn new(group_by: &'a [Expression]) -> Self {
        Self { group_by }
    }

    pub fn build(&self, rows: &[Row]) -> Result<Filter, ExploreError> {
        let children = self
            .group_by
            .iter()
            .map(|expr| {
                let column = expr
                    .result_name()
                    .ok_or_else(|| ExploreError::MissingResultName(expr.canonical()))?;
                let values = Self::group_values(&column, rows)?;
                Ok(Filter::in_clause(expr.clone(), Value::string_array(values)))
            })
            .collect::<Result<Vec<_>, ExploreError>>()?;

        Ok(Filter::and(children))
    }

    /// Distinct string values of `column` across `rows`, in first-seen order.
    pub fn group_values(column: &str, rows: &[Row]) -> Result<IndexSet<String>, ExploreError> {
        rows.iter()
            .map(|row| {
                let value = row
                    .get(column)
                    .ok_or_else(|| ExploreError::MissingGroupColumn(column.to_string()))?;
                Ok(value
                    .to_string_value()
                    .unwrap_or_else(|| value.to_json().to_string()))
            })
            .collect()
    }
}
