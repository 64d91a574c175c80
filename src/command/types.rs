use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::engine::errors::ExploreError;
use crate::engine::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionType {
    Count,
    DistinctCount,
    Sum,
    Avg,
    AvgRate,
    Min,
    Max,
}

impl FunctionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionType::Count => "COUNT",
            FunctionType::DistinctCount => "DISTINCTCOUNT",
            FunctionType::Sum => "SUM",
            FunctionType::Avg => "AVG",
            FunctionType::AvgRate => "AVGRATE",
            FunctionType::Min => "MIN",
            FunctionType::Max => "MAX",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    ColumnIdentifier {
        column_name: String,
        alias: Option<String>,
    },
    Function {
        function: FunctionType,
        arguments: Vec<Expression>,
        alias: Option<String>,
    },
    Literal(Value),
}

impl Expression {
    pub fn column(name: &str) -> Self {
        Expression::ColumnIdentifier {
            column_name: name.to_string(),
            alias: None,
        }
    }

    pub fn function(function: FunctionType, column: &str) -> Self {
        Expression::Function {
            function,
            arguments: vec![Expression::column(column)],
            alias: None,
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Replaces the alias; literals carry no alias and are returned unchanged.
    pub fn with_alias(mut self, name: &str) -> Self {
        match &mut self {
            Expression::ColumnIdentifier { alias, .. } | Expression::Function { alias, .. } => {
                *alias = Some(name.to_string());
            }
            Expression::Literal(_) => {}
        }
        self
    }

    /// Name of the column this expression produces in a result row.
    ///
    /// Columns and functions use their alias when one is set. Without one, a column keeps its
    /// own name and a function uses its canonical `FUNCTION(arg,..)` form. Literals produce no
    /// column.
    pub fn result_name(&self) -> Option<String> {
        match self {
            Expression::ColumnIdentifier { column_name, alias } => Some(
                alias
                    .as_ref()
                    .filter(|a| !a.is_empty())
                    .unwrap_or(column_name)
                    .clone(),
            ),
            Expression::Function { alias, .. } => match alias.as_ref().filter(|a| !a.is_empty()) {
                Some(alias) => Some(alias.clone()),
                None => Some(self.canonical()),
            },
            Expression::Literal(_) => None,
        }
    }

    /// Human readable form used in error messages and canonical function names.
    pub fn canonical(&self) -> String {
        match self {
            Expression::ColumnIdentifier { column_name, .. } => column_name.clone(),
            Expression::Function {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(Expression::canonical).collect();
                format!("{}({})", function.as_str(), args.join(","))
            }
            Expression::Literal(value) => value
                .to_string_value()
                .unwrap_or_else(|| value.to_json().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    #[default]
    And,
    Or,
    Not,
    Eq,
    Neq,
    In,
    NotIn,
    Gt,
    Lt,
    Ge,
    Le,
    Like,
    ContainsKey,
}

impl Operator {
    pub fn is_combinator(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }
}

/// Filter tree node. Leaf comparisons use `lhs`/`rhs`, combinators use `child_filters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub operator: Operator,
    pub lhs: Option<Expression>,
    pub rhs: Option<Expression>,
    #[serde(default)]
    pub child_filters: Vec<Filter>,
}

impl Filter {
    pub fn and(child_filters: Vec<Filter>) -> Self {
        Self {
            operator: Operator::And,
            lhs: None,
            rhs: None,
            child_filters,
        }
    }

    pub fn or(child_filters: Vec<Filter>) -> Self {
        Self {
            operator: Operator::Or,
            ..Self::and(child_filters)
        }
    }

    pub fn compare(lhs: Expression, operator: Operator, rhs: Expression) -> Self {
        Self {
            operator,
            lhs: Some(lhs),
            rhs: Some(rhs),
            child_filters: Vec::new(),
        }
    }

    pub fn in_clause(lhs: Expression, values: Value) -> Self {
        Self::compare(lhs, Operator::In, Expression::Literal(values))
    }

    /// A filter with no operands and no children restricts nothing.
    pub fn is_trivial(&self) -> bool {
        self.lhs.is_none() && self.rhs.is_none() && self.child_filters.is_empty()
    }

    /// Conjoins `other` onto this filter without losing the existing restriction.
    ///
    /// A trivial filter is replaced, an AND combinator gains `other` as a new child, and any
    /// other node is wrapped together with `other` under a fresh AND.
    pub fn conjoin(mut self, other: Filter) -> Filter {
        if self.is_trivial() {
            return other;
        }
        if self.operator == Operator::And && self.lhs.is_none() && self.rhs.is_none() {
            self.child_filters.push(other);
            return self;
        }
        Filter::and(vec![self, other])
    }

    pub fn validate(&self) -> Result<(), ExploreError> {
        match self.operator {
            Operator::In | Operator::NotIn => {
                if self.lhs.is_none() {
                    return Err(ExploreError::InvalidFilter(format!(
                        "{:?} filter has no left-hand side",
                        self.operator
                    )));
                }
                match &self.rhs {
                    Some(Expression::Literal(value)) if value.is_array() => {}
                    _ => {
                        return Err(ExploreError::InvalidFilter(format!(
                            "{:?} filter requires a literal array right-hand side",
                            self.operator
                        )));
                    }
                }
            }
            _ => {}
        }
        self.child_filters.iter().try_for_each(Filter::validate)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByExpression {
    pub expression: Expression,
    pub order: SortOrder,
}

impl OrderByExpression {
    pub fn asc(expression: Expression) -> Self {
        Self {
            expression,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(expression: Expression) -> Self {
        Self {
            expression,
            order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub unit: TimeUnit,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAggregation {
    pub period: Period,
    pub aggregation: Expression,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityOption {
    pub include_non_live_entities: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextOption {
    pub entity_option: Option<EntityOption>,
}

/// A grouped time-series analytics request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreRequest {
    pub context: String,
    pub start_time_millis: i64,
    pub end_time_millis: i64,
    pub filter: Option<Filter>,
    pub selections: Vec<Expression>,
    pub time_aggregations: Vec<TimeAggregation>,
    pub group_by: Vec<Expression>,
    pub order_by: Vec<OrderByExpression>,
    pub limit: u32,
    pub offset: u32,
    pub include_rest_group: bool,
    pub context_option: Option<ContextOption>,
}

impl ExploreRequest {
    pub fn has_group_by(&self) -> bool {
        !self.group_by.is_empty()
    }

    pub fn has_time_aggregations(&self) -> bool {
        !self.time_aggregations.is_empty()
    }

    pub fn has_filter(&self) -> bool {
        self.filter.as_ref().is_some_and(|f| !f.is_trivial())
    }

    /// Number of group rows returned before any rest-group row is appended.
    pub fn row_limit_before_rest(&self) -> u32 {
        self.limit
    }

    pub fn entity_option(&self) -> Option<&EntityOption> {
        self.context_option
            .as_ref()
            .and_then(|o| o.entity_option.as_ref())
    }

    /// Live-only unless the caller explicitly asked for non-live entities.
    pub fn on_live_entities_only(&self) -> bool {
        self.entity_option()
            .is_none_or(|o| !o.include_non_live_entities)
    }

    /// Result column names of the group-by expressions, in declaration order.
    pub fn group_by_result_names(&self) -> Result<Vec<String>, ExploreError> {
        let mut seen = HashSet::new();
        self.group_by
            .iter()
            .map(|expr| {
                let name = expr
                    .result_name()
                    .ok_or_else(|| ExploreError::MissingResultName(expr.canonical()))?;
                if !seen.insert(name.clone()) {
                    return Err(ExploreError::DuplicateResultName(name));
                }
                Ok(name)
            })
            .collect()
    }

    pub fn validate_group_by(&self) -> Result<(), ExploreError> {
        self.group_by_result_names().map(|_| ())
    }
}

/// One result row keyed by column name, in column insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.columns.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    pub fn insert(&mut self, name: String, value: Value) -> Option<Value> {
        self.columns.insert(name, value)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExploreResponse {
    pub rows: Vec<Row>,
}

impl ExploreResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn extend_rows(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }
}
