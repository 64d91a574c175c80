use crate::command::types::Row;
use crate::engine::types::Value;

pub struct RowFactory {
    row: Row,
}

impl RowFactory {
    pub fn new() -> Self {
        Self { row: Row::new() }
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.row = self.row.with_column(column, value);
        self
    }

    /// One row per group value with a single column.
    pub fn groups(column: &str, values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| Self::new().with(column, *v).create())
            .collect()
    }

    /// Rows with a `name` group column and a `count` metric.
    pub fn counted(counts: &[i64]) -> Vec<Row> {
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Self::new()
                    .with("name", format!("entity-{}", i))
                    .with("count", *c)
                    .create()
            })
            .collect()
    }

    pub fn create(self) -> Row {
        self.row
    }
}
