//! Lazy, re-iterable statement results.

use std::fmt;

use once_cell::unsync::OnceCell;

use crate::error::Result;
use crate::ordering::Comparators;
use crate::predicate::Predicates;
use crate::record::{Header, Record, RecordSource};
use crate::window::{BoundsPolicy, Window};

/// Output of [`Statement::process`](crate::Statement::process).
///
/// Holds a snapshot of the statement configuration and a borrow of the
/// source. No record is read until the result is iterated or counted.
///
/// Without ordering, iteration streams straight from the source through the
/// filter and the window. With ordering, the filtered records are buffered
/// and stable-sorted once, on first use, and the window runs over the buffer.
///
/// Every iteration yields the same records as long as the source does.
pub struct TabularResult<'s> {
    source: &'s dyn RecordSource,
    predicates: Predicates,
    comparators: Comparators,
    window: Window,
    policy: BoundsPolicy,
    header: Header,
    sorted: OnceCell<Vec<Record>>,
    len: OnceCell<usize>,
}

impl<'s> TabularResult<'s> {
    pub(crate) fn new(
        source: &'s dyn RecordSource,
        predicates: Predicates,
        comparators: Comparators,
        window: Window,
        policy: BoundsPolicy,
        header: Header,
    ) -> Self {
        TabularResult {
            source,
            predicates,
            comparators,
            window,
            policy,
            header,
            sorted: OnceCell::new(),
            len: OnceCell::new(),
        }
    }

    /// Iterates the records in the window.
    ///
    /// This is the view used by `for record in &result`, by the fetch
    /// helpers and by re-processing the result as a source.
    ///
    /// # Panics
    ///
    /// Panics with the `OutOfRange` message when the bounds policy rejects
    /// the window (see [`try_iter`](Self::try_iter)). A result produced under
    /// the default [`BoundsPolicy::Lenient`] never panics here.
    pub fn iter(&self) -> Records<'_> {
        match self.try_iter() {
            Ok(records) => records,
            Err(err) => panic!("{err}"),
        }
    }

    /// Iterates the records in the window, enforcing the bounds policy.
    ///
    /// Under [`BoundsPolicy::Strict`], `limit == 0` with `offset > 0` fails
    /// with [`StatementError::OutOfRange`](crate::StatementError::OutOfRange).
    pub fn try_iter(&self) -> Result<Records<'_>> {
        self.window.check(self.policy)?;

        if self.comparators.is_empty() {
            tracing::trace!("streaming filtered records");
            let predicates = &self.predicates;
            let filtered = self
                .source
                .records()
                .filter(move |record| predicates.evaluate(record));
            return Ok(Records::new(self.window.apply(filtered)));
        }

        let sorted = self.sorted.get_or_init(|| self.sort_filtered());
        Ok(Records::new(self.window.apply(sorted.iter().cloned())))
    }

    fn sort_filtered(&self) -> Vec<Record> {
        let mut buffer: Vec<Record> = self
            .source
            .records()
            .filter(|record| self.predicates.evaluate(record))
            .collect();
        self.comparators.sort(&mut buffer);
        tracing::trace!(records = buffer.len(), "buffered and sorted filtered records");
        buffer
    }

    /// Number of records in the window, enforcing the bounds policy.
    ///
    /// Computed on first success, then cached. A rejected window is never
    /// cached as a count.
    pub fn try_count(&self) -> Result<usize> {
        self.window.check(self.policy)?;

        let len = self.len.get_or_init(|| {
            if self.comparators.is_empty() {
                self.iter().count()
            } else {
                let sorted = self.sorted.get_or_init(|| self.sort_filtered());
                self.window.len_within(sorted.len())
            }
        });
        Ok(*len)
    }

    /// Number of records in the window.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`iter`](Self::iter); use
    /// [`try_count`](Self::try_count) to get the error instead.
    pub fn count(&self) -> usize {
        match self.try_count() {
            Ok(len) => len,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns `true` if the window holds no records.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`count`](Self::count).
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the first record in the window.
    pub fn first(&self) -> Option<Record> {
        self.iter().next()
    }

    /// Returns the record at position `n` within the window.
    pub fn fetch_one(&self, n: usize) -> Option<Record> {
        self.iter().nth(n)
    }

    /// Iterates one column of every record in the window.
    ///
    /// Records too short to hold the column are skipped.
    pub fn fetch_column(&self, column: usize) -> impl Iterator<Item = String> + '_ {
        self.iter().filter_map(move |record| record.into_iter().nth(column))
    }

    /// Iterates the column carrying `label` in the header.
    ///
    /// Returns `None` if the header has no such label.
    pub fn fetch_column_by_label(&self, label: &str) -> Option<impl Iterator<Item = String> + '_> {
        let column = self.header.position(label)?;
        Some(self.fetch_column(column))
    }

    /// Collects the window into a vector.
    pub fn to_vec(&self) -> Vec<Record> {
        self.iter().collect()
    }

    /// Returns the header supplied to `process`, possibly empty.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the column position of `label` in the header.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.header.position(label)
    }

    /// Looks up the field of `record` under `label`.
    pub fn get<'r>(&self, record: &'r Record, label: &str) -> Option<&'r str> {
        let column = self.header.position(label)?;
        record.get(column).map(String::as_str)
    }

    /// Returns the window this result applies.
    pub fn window(&self) -> Window {
        self.window
    }
}

impl RecordSource for TabularResult<'_> {
    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        Box::new(self.iter())
    }
}

impl<'r> IntoIterator for &'r TabularResult<'_> {
    type Item = Record;
    type IntoIter = Records<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for TabularResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabularResult")
            .field("predicates", &self.predicates)
            .field("comparators", &self.comparators)
            .field("window", &self.window)
            .field("policy", &self.policy)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Iterator over the records of a [`TabularResult`].
pub struct Records<'r> {
    inner: Box<dyn Iterator<Item = Record> + 'r>,
}

impl<'r> Records<'r> {
    fn new(inner: Box<dyn Iterator<Item = Record> + 'r>) -> Self {
        Records { inner }
    }
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for Records<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{Statement, StatementError};

    fn row(fields: &[&str]) -> Record {
        fields.iter().map(|f| f.to_string()).collect()
    }

    /// Source that counts how many passes were started.
    struct CountingSource {
        rows: Vec<Record>,
        passes: Cell<usize>,
    }

    impl RecordSource for CountingSource {
        fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
            self.passes.set(self.passes.get() + 1);
            Box::new(self.rows.iter().cloned())
        }
    }

    fn counting() -> CountingSource {
        CountingSource {
            rows: vec![row(&["c"]), row(&["a"]), row(&["b"])],
            passes: Cell::new(0),
        }
    }

    #[test]
    fn process_reads_nothing_until_iteration() {
        let source = counting();
        let result = Statement::new().process(&source);
        assert_eq!(source.passes.get(), 0);

        assert_eq!(result.count(), 3);
        assert_eq!(source.passes.get(), 1);
    }

    #[test]
    fn count_is_cached() {
        let source = counting();
        let result = Statement::new().process(&source);
        result.count();
        result.count();
        assert_eq!(source.passes.get(), 1);
    }

    #[test]
    fn sorted_buffer_built_once() {
        let source = counting();
        let mut stmt = Statement::new();
        stmt.order_asc(0);
        let result = stmt.process(&source);

        let first = result.to_vec();
        let second = result.to_vec();
        assert_eq!(first, vec![row(&["a"]), row(&["b"]), row(&["c"])]);
        assert_eq!(first, second);
        assert_eq!(result.count(), 3);
        assert_eq!(source.passes.get(), 1);
    }

    #[test]
    fn streaming_reiterates_the_source() {
        let source = counting();
        let result = Statement::new().process(&source);
        assert_eq!(result.to_vec(), result.to_vec());
        assert_eq!(source.passes.get(), 2);
    }

    #[test]
    fn streaming_stops_at_limit() {
        let source = counting();
        let seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let calls = std::sync::Arc::clone(&seen);

        let mut stmt = Statement::new();
        stmt.and_where(move |_: &Record| {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            true
        })
        .limit(1)
        .unwrap();

        assert_eq!(stmt.process(&source).to_vec(), vec![row(&["c"])]);
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    fn strict_zero_length(source: &CountingSource) -> TabularResult<'_> {
        let mut stmt = Statement::new();
        stmt.offset(1)
            .unwrap()
            .limit(0)
            .unwrap()
            .bounds_policy(BoundsPolicy::Strict);
        stmt.process(source)
    }

    #[test]
    fn strict_bounds_fail_at_iteration() {
        let source = counting();
        let result = strict_zero_length(&source);

        assert!(matches!(
            result.try_iter(),
            Err(StatementError::OutOfRange { offset: 1 })
        ));
        assert!(matches!(
            result.try_count(),
            Err(StatementError::OutOfRange { offset: 1 })
        ));
        // The error is reported again on every attempt, never cached away.
        assert!(result.try_count().is_err());
        assert_eq!(source.passes.get(), 0);
    }

    #[test]
    #[should_panic(expected = "cannot seek to offset 1")]
    fn strict_bounds_panic_in_for_loop() {
        let source = counting();
        let result = strict_zero_length(&source);
        for _ in &result {}
    }

    #[test]
    #[should_panic(expected = "cannot seek to offset 1")]
    fn strict_bounds_panic_in_count() {
        let source = counting();
        strict_zero_length(&source).count();
    }

    #[test]
    #[should_panic(expected = "cannot seek to offset 1")]
    fn strict_bounds_surface_through_reprocessing() {
        let source = counting();
        let strict = strict_zero_length(&source);

        let again = Statement::new().process(&strict);
        again.to_vec();
    }

    #[test]
    fn try_count_matches_count() {
        let source = counting();
        let mut stmt = Statement::new();
        stmt.offset(1).unwrap().order_asc(0);

        let result = stmt.process(&source);
        assert_eq!(result.try_count().unwrap(), 2);
        assert_eq!(result.count(), 2);
    }

    #[test]
    fn lenient_zero_length_window_is_empty() {
        let source = counting();
        let mut stmt = Statement::new();
        stmt.offset(1).unwrap().limit(0).unwrap();

        let result = stmt.process(&source);
        assert_eq!(result.try_iter().unwrap().count(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn header_lookup() {
        let rows = vec![row(&["john", "doe"]), row(&["jane"])];
        let result = Statement::new().process_with_header(&rows, ["first", "last"]);

        assert_eq!(result.column_index("last"), Some(1));
        assert_eq!(result.column_index("email"), None);

        let john = result.first().unwrap();
        assert_eq!(result.get(&john, "last"), Some("doe"));
        assert_eq!(result.get(&john, "email"), None);

        let lasts: Vec<String> = result.fetch_column_by_label("last").unwrap().collect();
        assert_eq!(lasts, vec!["doe"]);
        assert!(result.fetch_column_by_label("email").is_none());
    }

    #[test]
    fn fetch_helpers() {
        let rows = vec![row(&["a", "1"]), row(&["b", "2"]), row(&["c", "3"])];
        let result = Statement::new().process(&rows);

        assert_eq!(result.fetch_one(1), Some(row(&["b", "2"])));
        assert_eq!(result.fetch_one(9), None);
        assert_eq!(result.fetch_column(1).collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert!(result.header().is_empty());
    }

    #[test]
    fn result_is_a_source() {
        let rows = vec![row(&["a"]), row(&["b"]), row(&["c"])];
        let mut first = Statement::new();
        first.offset(1).unwrap();
        let skipped = first.process(&rows);

        let again = Statement::new().process(&skipped);
        assert_eq!(again.to_vec(), vec![row(&["b"]), row(&["c"])]);

        let mut names = Vec::new();
        for record in &again {
            names.push(record[0].clone());
        }
        assert_eq!(names, vec!["b", "c"]);
    }
}
