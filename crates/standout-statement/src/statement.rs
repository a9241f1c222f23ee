//! Statement builder and processor.
//!
//! A [`Statement`] accumulates predicates, comparators and a window through
//! chained `&mut self` calls, then runs against any [`RecordSource`] with
//! [`Statement::process`]. Processing never mutates the statement, so one
//! statement can be executed many times against different sources.

use std::cmp::Ordering;

use regex::Regex;

use crate::clause::{ClauseValue, ColumnClause};
#[cfg(feature = "csv")]
use crate::document::CsvDocument;
use crate::error::Result;
use crate::op::Op;
use crate::ordering::{Comparators, Dir, OrderBy};
use crate::predicate::Predicates;
use crate::record::{Header, Record, RecordSource};
use crate::result::TabularResult;
use crate::window::{BoundsPolicy, Window};

/// A filter, order and window statement over tabular records.
///
/// Execution runs in a fixed order:
/// ```text
/// source → filter (AND of predicates) → stable sort (if ordered) → offset/limit
/// ```
///
/// Every configuration method returns the same statement, so calls chain.
/// Window setters validate their argument and leave the statement untouched
/// when they fail.
///
/// # Example
///
/// ```
/// use standout_statement::{Record, Statement};
///
/// let rows: Vec<Record> = vec![
///     vec!["john".into(), "doe".into(), "john.doe@example.com".into()],
///     vec!["jane".into(), "doe".into(), "jane.doe@example.com".into()],
/// ];
///
/// let mut stmt = Statement::new();
/// stmt.and_where(|row: &Record| row[1] == "doe")
///     .order_by(|a: &Record, b: &Record| a[0].cmp(&b[0]))
///     .offset(0)?
///     .limit(1)?;
///
/// let result = stmt.process(&rows);
/// assert_eq!(result.count(), 1);
/// assert_eq!(result.first().unwrap()[0], "jane");
/// # Ok::<(), standout_statement::StatementError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Statement {
    predicates: Predicates,
    comparators: Comparators,
    window: Window,
    policy: BoundsPolicy,
}

impl Statement {
    /// Creates an empty statement.
    ///
    /// An empty statement returns every record in source order.
    pub fn new() -> Self {
        Statement::default()
    }

    /// Creates a statement seeded with one predicate.
    pub fn create<F>(predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        let mut statement = Statement::new();
        statement.and_where(predicate);
        statement
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Adds a predicate.
    ///
    /// Predicates combine with AND and run in registration order.
    pub fn and_where<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.predicates.add(predicate);
        self
    }

    /// Adds a predicate on a single column.
    pub fn and_where_column(
        &mut self,
        column: usize,
        op: Op,
        value: impl Into<ClauseValue>,
    ) -> &mut Self {
        let clause = ColumnClause::new(column, op, value);
        self.and_where(move |record: &Record| clause.matches(record))
    }

    /// Adds a regex predicate on a single column.
    ///
    /// Returns an error if the pattern is invalid; the statement is unchanged.
    pub fn and_where_regex(&mut self, column: usize, pattern: &str) -> Result<&mut Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.and_where_column(column, Op::Regex, regex))
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds a comparator to the ordering chain.
    ///
    /// Earlier comparators take priority; later ones only break ties.
    pub fn order_by<F>(&mut self, comparator: F) -> &mut Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.add(comparator);
        self
    }

    /// Adds a lexical ordering on a single column.
    pub fn order_by_column(&mut self, column: usize, dir: Dir) -> &mut Self {
        self.comparators.push(OrderBy::new(column, dir).into_comparator());
        self
    }

    /// Adds an ascending column ordering.
    pub fn order_asc(&mut self, column: usize) -> &mut Self {
        self.order_by_column(column, Dir::Asc)
    }

    /// Adds a descending column ordering.
    pub fn order_desc(&mut self, column: usize) -> &mut Self {
        self.order_by_column(column, Dir::Desc)
    }

    // ========================================================================
    // Window
    // ========================================================================

    /// Sets the number of records to skip.
    ///
    /// Fails with [`StatementError::InvalidOffset`] when `n < 0`.
    ///
    /// [`StatementError::InvalidOffset`]: crate::StatementError::InvalidOffset
    pub fn offset(&mut self, n: i64) -> Result<&mut Self> {
        self.window = self.window.with_offset(n)?;
        Ok(self)
    }

    /// Sets the maximum number of records to return.
    ///
    /// `-1` removes the limit. Fails with [`StatementError::InvalidLimit`]
    /// when `n < -1`.
    ///
    /// [`StatementError::InvalidLimit`]: crate::StatementError::InvalidLimit
    pub fn limit(&mut self, n: i64) -> Result<&mut Self> {
        self.window = self.window.with_limit(n)?;
        Ok(self)
    }

    /// Replaces the whole window.
    pub fn window(&mut self, window: Window) -> &mut Self {
        self.window = window;
        self
    }

    /// Sets how zero-length windows past the first record are reported.
    pub fn bounds_policy(&mut self, policy: BoundsPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the predicate registry.
    pub fn predicates(&self) -> &Predicates {
        &self.predicates
    }

    /// Returns the comparator chain.
    pub fn comparators(&self) -> &Comparators {
        &self.comparators
    }

    /// Returns the offset.
    pub fn get_offset(&self) -> usize {
        self.window.offset()
    }

    /// Returns the limit, `None` if unbounded.
    pub fn get_limit(&self) -> Option<usize> {
        self.window.limit()
    }

    /// Returns the window.
    pub fn get_window(&self) -> Window {
        self.window
    }

    /// Returns the bounds policy.
    pub fn get_bounds_policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// Returns `true` if this statement passes every record through unchanged.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() && self.comparators.is_empty() && self.window.is_unbounded()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs the statement against a source.
    ///
    /// Nothing is read from the source until the result is iterated or
    /// counted.
    pub fn process<'s>(&self, source: &'s dyn RecordSource) -> TabularResult<'s> {
        self.process_header(source, Header::default())
    }

    /// Runs the statement against a source, attaching column labels to the
    /// result.
    pub fn process_with_header<'s, I, S>(
        &self,
        source: &'s dyn RecordSource,
        header: I,
    ) -> TabularResult<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.process_header(source, Header::new(header))
    }

    /// Runs the statement against a parsed document, carrying over its
    /// header row (empty when the document was read without one).
    #[cfg(feature = "csv")]
    pub fn process_document<'s>(&self, document: &'s CsvDocument) -> TabularResult<'s> {
        self.process_header(document, document.header().clone())
    }

    fn process_header<'s>(
        &self,
        source: &'s dyn RecordSource,
        header: Header,
    ) -> TabularResult<'s> {
        tracing::debug!(
            predicates = self.predicates.len(),
            comparators = self.comparators.len(),
            offset = self.window.offset(),
            limit = ?self.window.limit(),
            policy = ?self.policy,
            "processing statement"
        );

        TabularResult::new(
            source,
            self.predicates.clone(),
            self.comparators.clone(),
            self.window,
            self.policy,
            header,
        )
    }
}
