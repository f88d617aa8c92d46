use std::cmp::Ordering;
use std::sync::Arc;

use super::accessor::{self, Accessor};
use super::types::FilterOperator;
use crate::errors::QueryError;
use crate::record::{FieldKind, FieldValue, Record, Schema};

/// Uncompiled filter expression: leaves carry raw (path, operator, value)
/// triples, inner nodes compose them. Built by [`FilterBuilder`], validated
/// against a schema by [`FilterExpr::compile`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Leaf { path: String, operator: FilterOperator, value: FieldValue },
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
}

impl FilterExpr {
    /// Compile this tree against a schema, applying the per-operator type
    /// rules at every leaf.
    ///
    /// # Errors
    /// `FieldResolution`, `UnsupportedOperator`, or `ValueConversion` from
    /// any leaf; nothing is evaluated until compilation has fully succeeded.
    pub fn compile(&self, schema: &Schema) -> Result<Predicate, QueryError> {
        Ok(Predicate { root: compile_node(schema, self)? })
    }
}

/// Fluent builder composing clauses in strict call order: each call combines
/// the new clause with the accumulated tree, left to right, no precedence.
/// Consumes and returns itself, so partially built trees cannot alias.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    expr: Option<FilterExpr>,
}

impl FilterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(
        self,
        path: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.push(leaf(path, operator, value), FilterExpr::And)
    }

    #[must_use]
    pub fn or(
        self,
        path: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.push(leaf(path, operator, value), FilterExpr::Or)
    }

    /// AND-combine a parenthesized group populated by `build`.
    ///
    /// # Errors
    /// `EmptyPredicateGroup` if the group produced no clauses.
    pub fn and_group(self, build: impl FnOnce(Self) -> Self) -> Result<Self, QueryError> {
        let group = build(Self::new()).expr.ok_or(QueryError::EmptyPredicateGroup)?;
        Ok(self.push(group, FilterExpr::And))
    }

    /// OR-combine a parenthesized group populated by `build`.
    ///
    /// # Errors
    /// `EmptyPredicateGroup` if the group produced no clauses.
    pub fn or_group(self, build: impl FnOnce(Self) -> Self) -> Result<Self, QueryError> {
        let group = build(Self::new()).expr.ok_or(QueryError::EmptyPredicateGroup)?;
        Ok(self.push(group, FilterExpr::Or))
    }

    /// The accumulated expression tree, if any clause was added.
    #[must_use]
    pub fn expr(&self) -> Option<&FilterExpr> {
        self.expr.as_ref()
    }

    /// Compile the accumulated tree. A builder that never received a clause
    /// yields `None`: the identity filter ("match everything"), not a
    /// predicate that matches nothing.
    ///
    /// # Errors
    /// See [`FilterExpr::compile`].
    pub fn build(self, schema: &Schema) -> Result<Option<Predicate>, QueryError> {
        self.expr.map(|expr| expr.compile(schema)).transpose()
    }

    fn push(
        mut self,
        new: FilterExpr,
        combine: fn(Box<FilterExpr>, Box<FilterExpr>) -> FilterExpr,
    ) -> Self {
        self.expr = Some(match self.expr {
            None => new,
            Some(current) => combine(Box::new(current), Box::new(new)),
        });
        self
    }
}

fn leaf(
    path: impl Into<String>,
    operator: FilterOperator,
    value: impl Into<FieldValue>,
) -> FilterExpr {
    FilterExpr::Leaf { path: path.into(), operator, value: value.into() }
}

/// Compile a single (path, operator, value) triple for a record type.
///
/// # Errors
/// See [`FilterExpr::compile`].
pub fn compile_for<T: Record>(
    path: &str,
    operator: FilterOperator,
    value: impl Into<FieldValue>,
) -> Result<Predicate, QueryError> {
    leaf(path, operator, value).compile(&T::schema())
}

/// A compiled boolean test over one record. Pure function of the record:
/// holds no mutable state, safe to share across threads and calls.
#[derive(Debug)]
pub struct Predicate {
    root: Node,
}

impl Predicate {
    #[must_use]
    pub fn matches(&self, record: &dyn Record) -> bool {
        eval(&self.root, record)
    }
}

#[derive(Debug)]
enum Node {
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Not(Box<Node>),
    Cmp { accessor: Arc<Accessor>, op: CmpOp, value: FieldValue },
    Text { accessor: Arc<Accessor>, mode: TextMode, needle: String },
    Empty { accessor: Arc<Accessor> },
}

#[derive(Debug, Clone, Copy)]
enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, Copy)]
enum TextMode {
    Contains,
    StartsWith,
    EndsWith,
    // needle stored pre-lowered
    ContainsIgnoreCase,
}

fn compile_node(schema: &Schema, expr: &FilterExpr) -> Result<Node, QueryError> {
    match expr {
        FilterExpr::And(left, right) => Ok(Node::And(
            Box::new(compile_node(schema, left)?),
            Box::new(compile_node(schema, right)?),
        )),
        FilterExpr::Or(left, right) => Ok(Node::Or(
            Box::new(compile_node(schema, left)?),
            Box::new(compile_node(schema, right)?),
        )),
        FilterExpr::Leaf { path, operator, value } => compile_leaf(schema, path, *operator, value),
    }
}

fn compile_leaf(
    schema: &Schema,
    path: &str,
    operator: FilterOperator,
    value: &FieldValue,
) -> Result<Node, QueryError> {
    use FilterOperator as Op;
    let accessor = accessor::resolve(schema, path)?;
    let kind = accessor.kind();
    match operator {
        Op::Equals => Ok(equality(accessor, kind, value)?),
        Op::NotEqual => Ok(Node::Not(Box::new(equality(accessor, kind, value)?))),
        Op::GreaterThan | Op::GreaterThanOrEqual | Op::LessThan | Op::LessThanOrEqual => {
            if !kind.is_ordered() {
                return Err(QueryError::UnsupportedOperator { operator, kind });
            }
            let op = match operator {
                Op::GreaterThan => CmpOp::Gt,
                Op::GreaterThanOrEqual => CmpOp::Gte,
                Op::LessThan => CmpOp::Lt,
                _ => CmpOp::Lte,
            };
            Ok(Node::Cmp { accessor, op, value: convert(value, kind)? })
        }
        Op::Contains | Op::StartsWith | Op::EndsWith | Op::ContainsIgnoreCase | Op::NotContains => {
            if kind != FieldKind::Text {
                return Err(QueryError::UnsupportedOperator { operator, kind });
            }
            let needle = value.to_text().ok_or_else(|| QueryError::ValueConversion {
                value: value.to_string(),
                kind: FieldKind::Text,
            })?;
            let node = match operator {
                Op::StartsWith => Node::Text { accessor, mode: TextMode::StartsWith, needle },
                Op::EndsWith => Node::Text { accessor, mode: TextMode::EndsWith, needle },
                Op::ContainsIgnoreCase => Node::Text {
                    accessor,
                    mode: TextMode::ContainsIgnoreCase,
                    needle: needle.to_lowercase(),
                },
                _ => Node::Text { accessor, mode: TextMode::Contains, needle },
            };
            Ok(match operator {
                Op::NotContains => Node::Not(Box::new(node)),
                _ => node,
            })
        }
        Op::IsEmpty => {
            if kind != FieldKind::Text {
                return Err(QueryError::UnsupportedOperator { operator, kind });
            }
            Ok(Node::Empty { accessor })
        }
        Op::IsNotEmpty => {
            if kind != FieldKind::Text {
                return Err(QueryError::UnsupportedOperator { operator, kind });
            }
            Ok(Node::Not(Box::new(Node::Empty { accessor })))
        }
    }
}

fn equality(
    accessor: Arc<Accessor>,
    kind: FieldKind,
    value: &FieldValue,
) -> Result<Node, QueryError> {
    // A null comparison value compiles to a null test; anything else must
    // convert to the field's kind.
    let value = if value.is_null() { FieldValue::Null } else { convert(value, kind)? };
    Ok(Node::Cmp { accessor, op: CmpOp::Eq, value })
}

fn convert(value: &FieldValue, kind: FieldKind) -> Result<FieldValue, QueryError> {
    value
        .coerce(kind)
        .ok_or_else(|| QueryError::ValueConversion { value: value.to_string(), kind })
}

fn eval(node: &Node, record: &dyn Record) -> bool {
    match node {
        Node::And(left, right) => eval(left, record) && eval(right, record),
        Node::Or(left, right) => eval(left, record) || eval(right, record),
        Node::Not(inner) => !eval(inner, record),
        Node::Cmp { accessor, op, value } => {
            let actual = accessor.extract(record);
            match op {
                CmpOp::Eq => actual.compare(value) == Ordering::Equal,
                // a null never satisfies an ordered comparison
                _ if actual.is_null() => false,
                CmpOp::Gt => actual.compare(value) == Ordering::Greater,
                CmpOp::Gte => actual.compare(value) != Ordering::Less,
                CmpOp::Lt => actual.compare(value) == Ordering::Less,
                CmpOp::Lte => actual.compare(value) != Ordering::Greater,
            }
        }
        Node::Text { accessor, mode, needle } => match accessor.extract(record) {
            FieldValue::Text(haystack) => match mode {
                TextMode::Contains => haystack.contains(needle.as_str()),
                TextMode::StartsWith => haystack.starts_with(needle.as_str()),
                TextMode::EndsWith => haystack.ends_with(needle.as_str()),
                TextMode::ContainsIgnoreCase => haystack.to_lowercase().contains(needle.as_str()),
            },
            _ => false,
        },
        Node::Empty { accessor } => match accessor.extract(record) {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        },
    }
}
