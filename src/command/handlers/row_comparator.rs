use crate::command::types::{OrderByExpression, Row, SortOrder};
use crate::engine::errors::ExploreError;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
struct SortKey {
    column: String,
    descending: bool,
}

/// Compares result rows by a list of order-by keys.
///
/// Keys are applied in list order; a tie on one key falls through to the next. Each key
/// resolves to the result column of its order-by expression.
#[derive(Debug, Clone, PartialEq)]
pub struct RowComparator {
    keys: Vec<SortKey>,
}

impl RowComparator {
    pub fn new(order_by: &[OrderByExpression]) -> Result<Self, ExploreError> {
        let keys = order_by
            .iter()
            .map(|ob| {
                let column = ob
                    .expression
                    .result_name()
                    .ok_or_else(|| ExploreError::MissingResultName(ob.expression.canonical()))?;
                Ok(SortKey {
                    column,
                    descending: ob.order == SortOrder::Desc,
                })
            })
            .collect::<Result<Vec<_>, ExploreError>>()?;
        Ok(Self { keys })
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        for key in &self.keys {
            let ord = Self::compare_column(a, b, &key.column);
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Compares one column of two rows. A row holding the column sorts after one without it.
    fn compare_column(a: &Row, b: &Row, column: &str) -> Ordering {
        match (a.get(column), b.get(column)) {
            (Some(va), Some(vb)) => va.compare(vb),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }

    /// Sorts rows in place. Rows equal on every key keep their input order.
    pub fn sort(&self, rows: &mut [Row]) {
        if self.keys.is_empty() {
            return;
        }
        rows.sort_by(|a, b| self.compare(a, b));
    }
}
