//! Column clauses: declarative predicates over one field of a record.
//!
//! A [`ColumnClause`] names a column by position, an [`Op`] and a
//! [`ClauseValue`]. It is a convenience for the common case; arbitrary
//! closures remain available through [`Statement::and_where`].
//!
//! [`Statement::and_where`]: crate::Statement::and_where

use regex::Regex;

use crate::op::Op;
use crate::record::Record;

/// A single column predicate.
///
/// # Example
///
/// ```
/// use standout_statement::{ColumnClause, Op};
///
/// let clause = ColumnClause::new(2, Op::EndsWith, "@example.com");
/// let row = vec!["john".to_string(), "doe".to_string(), "john.doe@example.com".to_string()];
/// assert!(clause.matches(&row));
/// ```
#[derive(Debug, Clone)]
pub struct ColumnClause {
    /// Zero-based column position.
    pub column: usize,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: ClauseValue,
}

impl ColumnClause {
    /// Creates a new clause.
    pub fn new(column: usize, op: Op, value: impl Into<ClauseValue>) -> Self {
        ColumnClause {
            column,
            op,
            value: value.into(),
        }
    }

    /// Evaluates this clause against a record.
    ///
    /// A record too short to hold the column never matches, whatever the
    /// operator. An operator paired with the wrong kind of value (for
    /// example `In` with a single string) never matches either.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(field) = record.get(self.column) else {
            return false;
        };

        match (&self.value, self.op) {
            (ClauseValue::Text(pattern), op) if op.is_text_op() => match_text(field, op, pattern),
            (ClauseValue::Regex(regex), Op::Regex) => regex.is_match(field),
            (ClauseValue::Set(set), Op::In) => set.iter().any(|candidate| candidate == field),
            _ => false,
        }
    }
}

fn match_text(field: &str, op: Op, pattern: &str) -> bool {
    match op {
        Op::StartsWith => field.starts_with(pattern),
        Op::EndsWith => field.ends_with(pattern),
        Op::Contains => field.contains(pattern),
        Op::Eq => field == pattern,
        Op::Ne => field != pattern,
        op if op.is_ordering_op() => op.eval_ordering(field.cmp(pattern)),
        _ => false,
    }
}

/// Owned comparison value stored in a clause.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    /// Plain text.
    Text(String),
    /// Set of candidates (for `In`).
    Set(Vec<String>),
    /// Compiled regular expression.
    Regex(Regex),
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::Text(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::Text(s.to_string())
    }
}

impl From<Regex> for ClauseValue {
    fn from(r: Regex) -> Self {
        ClauseValue::Regex(r)
    }
}

impl From<Vec<String>> for ClauseValue {
    fn from(v: Vec<String>) -> Self {
        ClauseValue::Set(v)
    }
}

impl From<Vec<&str>> for ClauseValue {
    fn from(v: Vec<&str>) -> Self {
        ClauseValue::Set(v.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ClauseValue {
    fn from(v: [&str; N]) -> Self {
        ClauseValue::Set(v.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Record {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn text_eq() {
        let clause = ColumnClause::new(0, Op::Eq, "john");
        assert!(clause.matches(&row(&["john", "doe"])));
        assert!(!clause.matches(&row(&["jane", "doe"])));
        assert!(!clause.matches(&row(&["John", "doe"]))); // case sensitive
    }

    #[test]
    fn text_ne() {
        let clause = ColumnClause::new(1, Op::Ne, "doe");
        assert!(!clause.matches(&row(&["john", "doe"])));
        assert!(clause.matches(&row(&["john", "smith"])));
    }

    #[test]
    fn text_affixes() {
        let starts = ColumnClause::new(0, Op::StartsWith, "jo");
        assert!(starts.matches(&row(&["john"])));
        assert!(!starts.matches(&row(&["ajo"])));

        let ends = ColumnClause::new(0, Op::EndsWith, "hn");
        assert!(ends.matches(&row(&["john"])));
        assert!(!ends.matches(&row(&["hnj"])));

        let contains = ColumnClause::new(0, Op::Contains, "oh");
        assert!(contains.matches(&row(&["john"])));
        assert!(!contains.matches(&row(&["jane"])));
    }

    #[test]
    fn lexical_ordering() {
        let gt = ColumnClause::new(0, Op::Gt, "jane");
        assert!(gt.matches(&row(&["john"])));
        assert!(!gt.matches(&row(&["jane"])));

        let lte = ColumnClause::new(0, Op::Lte, "jane");
        assert!(lte.matches(&row(&["jane"])));
        assert!(lte.matches(&row(&["adam"])));
        assert!(!lte.matches(&row(&["john"])));

        let gte = ColumnClause::new(0, Op::Gte, "jane");
        assert!(gte.matches(&row(&["jane"])));
        assert!(!gte.matches(&row(&["adam"])));

        // Lexical, not numeric
        let lt = ColumnClause::new(0, Op::Lt, "9");
        assert!(lt.matches(&row(&["10"])));
    }

    #[test]
    fn regex_match() {
        let clause = ColumnClause::new(2, Op::Regex, Regex::new(r"^\w+\.doe@").unwrap());
        assert!(clause.matches(&row(&["john", "doe", "john.doe@example.com"])));
        assert!(!clause.matches(&row(&["john", "doe", "jdoe@example.com"])));
    }

    #[test]
    fn set_membership() {
        let clause = ColumnClause::new(0, Op::In, ["john", "jane"]);
        assert!(clause.matches(&row(&["jane"])));
        assert!(!clause.matches(&row(&["adam"])));
    }

    #[test]
    fn missing_column_never_matches() {
        let eq = ColumnClause::new(5, Op::Eq, "x");
        assert!(!eq.matches(&row(&["x"])));

        let ne = ColumnClause::new(5, Op::Ne, "x");
        assert!(!ne.matches(&row(&["x"])));
    }

    #[test]
    fn mismatched_value_kind_never_matches() {
        let clause = ColumnClause::new(0, Op::In, "john");
        assert!(!clause.matches(&row(&["john"])));

        let clause = ColumnClause::new(0, Op::Regex, "john");
        assert!(!clause.matches(&row(&["john"])));
    }
}
