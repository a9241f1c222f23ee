//! Comparison operators for column clauses.
//!
//! Fields are opaque strings, so every operator works on text: ordering
//! operators compare lexically (byte-wise), never numerically.

use std::cmp::Ordering;

/// Comparison operator for a [`ColumnClause`](crate::ColumnClause).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal (exact match).
    Eq,
    /// Not equal.
    Ne,

    /// Field starts with prefix.
    StartsWith,
    /// Field ends with suffix.
    EndsWith,
    /// Field contains substring.
    Contains,
    /// Field matches a regular expression.
    Regex,

    /// Lexically greater than.
    Gt,
    /// Lexically greater than or equal.
    Gte,
    /// Lexically less than.
    Lt,
    /// Lexically less than or equal.
    Lte,

    /// Field is one of a set of values.
    In,
}

impl Op {
    /// Returns `true` for operators that compare against a single string.
    pub fn is_text_op(self) -> bool {
        matches!(
            self,
            Op::Eq
                | Op::Ne
                | Op::StartsWith
                | Op::EndsWith
                | Op::Contains
                | Op::Gt
                | Op::Gte
                | Op::Lt
                | Op::Lte
        )
    }

    /// Returns `true` for the lexical ordering operators.
    pub fn is_ordering_op(self) -> bool {
        matches!(self, Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Evaluates an ordering operator given the field-vs-value ordering.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the symbolic name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::StartsWith => "starts_with",
            Op::EndsWith => "ends_with",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
