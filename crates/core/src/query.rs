// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend-neutral predicate trees and the query builder that collects
//! their parameters and joins.
//!
//! A compiled rule is a [`Query`]: the target table, the association joins
//! it needs, a [`Predicate`] tree referring to named parameters, and the
//! bound parameter values. [`Query::to_sql`] renders it for SQLite with
//! positional placeholders, expanding list parameters for `IN`/`NOT IN`.

use std::fmt;

use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::strategy::Association;
use crate::value::Value;

/// Alias of the target table in every compiled query.
pub const TARGET_ALIAS: &str = "t";

/// A qualified column reference, `alias.field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub alias: String,
    pub field: String,
}

impl Column {
    pub fn new(alias: impl Into<String>, field: impl Into<String>) -> Self {
        Column {
            alias: alias.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.alias, self.field)
    }
}

/// A node of the compiled predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Conjunction. Zero terms is always true.
    And(Vec<Predicate>),
    /// Disjunction. Zero terms is always false.
    Or(Vec<Predicate>),
    /// `column <op> :param`, where `op` takes a value.
    Compare {
        column: Column,
        op: Operator,
        param: String,
    },
    /// `column IS [NOT] NULL`.
    IsNull { column: Column, negated: bool },
}

impl Predicate {
    /// Combine terms with the connector's aggregator.
    pub fn all(terms: Vec<Predicate>) -> Self {
        Predicate::And(terms)
    }

    pub fn any(terms: Vec<Predicate>) -> Self {
        Predicate::Or(terms)
    }

    pub fn always_true() -> Self {
        Predicate::And(Vec::new())
    }

    pub fn always_false() -> Self {
        Predicate::Or(Vec::new())
    }

    /// Number of leaf comparisons in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::And(terms) | Predicate::Or(terms) => {
                terms.iter().map(Predicate::leaf_count).sum()
            }
            Predicate::Compare { .. } | Predicate::IsNull { .. } => 1,
        }
    }

    fn render(&self, query: &Query, out: &mut String, bound: &mut Vec<Value>) -> Result<()> {
        match self {
            Predicate::And(terms) => render_terms(terms, " AND ", "1", query, out, bound),
            Predicate::Or(terms) => render_terms(terms, " OR ", "0", query, out, bound),
            Predicate::IsNull { column, negated } => {
                let op = if *negated { "IS NOT NULL" } else { "IS NULL" };
                out.push_str(&format!("{column} {op}"));
                Ok(())
            }
            Predicate::Compare { column, op, param } => {
                let value = query.param(param).ok_or_else(|| {
                    Error::CorruptedData(format!("unbound parameter :{param}"))
                })?;
                match (op.takes_list(), value) {
                    (true, Value::List(items)) if items.is_empty() => {
                        // x IN () matches nothing, x NOT IN () matches everything
                        out.push_str(if *op == Operator::In { "0" } else { "1" });
                    }
                    (true, Value::List(items)) => {
                        let mut placeholders = Vec::with_capacity(items.len());
                        for item in items {
                            bound.push(item.clone());
                            placeholders.push(format!("?{}", bound.len()));
                        }
                        out.push_str(&format!(
                            "{column} {} ({})",
                            op.sql(),
                            placeholders.join(", ")
                        ));
                    }
                    (false, Value::List(_)) | (true, _) => {
                        return Err(Error::ConditionResolution(format!(
                            "parameter :{param} does not fit operator '{op}'"
                        )));
                    }
                    (false, scalar) => {
                        bound.push(scalar.clone());
                        out.push_str(&format!("{column} {} ?{}", op.sql(), bound.len()));
                    }
                }
                Ok(())
            }
        }
    }
}

fn render_terms(
    terms: &[Predicate],
    separator: &str,
    empty: &str,
    query: &Query,
    out: &mut String,
    bound: &mut Vec<Value>,
) -> Result<()> {
    match terms {
        [] => out.push_str(empty),
        [single] => single.render(query, out, bound)?,
        _ => {
            out.push('(');
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    out.push_str(separator);
                }
                term.render(query, out, bound)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (terms, separator, empty) = match self {
            Predicate::And(terms) => (terms, " AND ", "TRUE"),
            Predicate::Or(terms) => (terms, " OR ", "FALSE"),
            Predicate::IsNull { column, negated: false } => return write!(f, "{column} IS NULL"),
            Predicate::IsNull { column, negated: true } => {
                return write!(f, "{column} IS NOT NULL")
            }
            Predicate::Compare { column, op, param } if op.takes_list() => {
                return write!(f, "{column} {} (:{param})", op.sql())
            }
            Predicate::Compare { column, op, param } => {
                return write!(f, "{column} {} :{param}", op.sql())
            }
        };
        match terms.as_slice() {
            [] => write!(f, "{empty}"),
            [single] => write!(f, "{single}"),
            _ => {
                write!(f, "(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{separator}")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// An association joined into the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: String,
    pub alias: String,
    /// Joined-table column matched against `source`.
    pub key: String,
    /// Target column holding the association id.
    pub source: Column,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LEFT JOIN {} AS {} ON {}.{} = {}",
            self.table, self.alias, self.alias, self.key, self.source
        )
    }
}

/// A named parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

/// Per-evaluation builder. Owns the parameter counter and join list, so
/// concurrent evaluations never share one.
#[derive(Debug)]
pub struct QueryBuilder {
    table: String,
    joins: Vec<Join>,
    params: Vec<Parameter>,
}

impl QueryBuilder {
    pub fn select_from(table: impl Into<String>) -> Self {
        QueryBuilder {
            table: table.into(),
            joins: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Column of the target table.
    pub fn column(&self, field: &str) -> Column {
        Column::new(TARGET_ALIAS, field)
    }

    /// Bind a value and return its parameter name, unique within the query.
    pub fn bind(&mut self, field: &str, value: Value) -> String {
        let name = format!("{}_{}", field, self.params.len() + 1);
        self.params.push(Parameter {
            name: name.clone(),
            value,
        });
        name
    }

    /// Left-join an association through the target `field`, returning the
    /// join alias. Joining the same association twice reuses the first join.
    /// Rows without the association stay in the result, so the join never
    /// filters on behalf of sibling terms.
    pub fn left_join(&mut self, field: &str, association: &Association) -> String {
        let source = self.column(field);
        if let Some(existing) = self
            .joins
            .iter()
            .find(|j| {
                j.source == source && j.table == association.table && j.key == association.key
            })
        {
            return existing.alias.clone();
        }
        let alias = format!("j{}", self.joins.len() + 1);
        self.joins.push(Join {
            table: association.table.clone(),
            alias: alias.clone(),
            key: association.key.clone(),
            source,
        });
        alias
    }

    pub fn into_query(self, predicate: Predicate) -> Query {
        Query {
            table: self.table,
            joins: self.joins,
            predicate,
            params: self.params,
        }
    }
}

/// A compiled rule, ready to render and execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub joins: Vec<Join>,
    pub predicate: Predicate,
    pub params: Vec<Parameter>,
}

/// SQL text with positional parameters in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Query {
    /// Value bound under `name`.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Render as a SQLite `SELECT` of the target rows.
    pub fn to_sql(&self) -> Result<SqlStatement> {
        let mut sql = format!("SELECT {TARGET_ALIAS}.* FROM {} AS {TARGET_ALIAS}", self.table);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }
        let mut bound = Vec::new();
        let mut clause = String::new();
        self.predicate.render(self, &mut clause, &mut bound)?;
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
        sql.push_str(&format!(" ORDER BY {TARGET_ALIAS}.rowid"));
        Ok(SqlStatement { sql, params: bound })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {TARGET_ALIAS}.* FROM {} AS {TARGET_ALIAS}", self.table)?;
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        write!(f, " WHERE {}", self.predicate)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
