use crate::command::types::{Expression, Filter, Operator};
use crate::engine::types::Value;

pub struct FilterFactory;

impl FilterFactory {
    pub fn eq(column: &str, value: impl Into<Value>) -> Filter {
        Filter::compare(
            Expression::column(column),
            Operator::Eq,
            Expression::literal(value),
        )
    }

    pub fn in_strings(column: &str, values: &[&str]) -> Filter {
        Filter::in_clause(
            Expression::column(column),
            Value::StringArray(values.iter().map(|v| v.to_string()).collect()),
        )
    }

    pub fn and(children: Vec<Filter>) -> Filter {
        Filter::and(children)
    }

    pub fn or(children: Vec<Filter>) -> Filter {
        Filter::or(children)
    }
}
