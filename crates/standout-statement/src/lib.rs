//! Statement - declarative filter, order and window queries over tabular records.
//!
//! A [`Statement`] turns a stream of records (rows of a delimited-text
//! document) into a filtered, ordered and windowed result. It supports:
//!
//! - Any number of predicates, combined with AND and evaluated left to right
//! - A priority chain of comparators with a stable sort
//! - An offset/limit window applied after filtering and sorting
//! - Lazy, re-iterable, countable results that can be fed back as sources
//!
//! # Quick Start
//!
//! ```rust
//! use standout_statement::{Record, Statement};
//!
//! let rows: Vec<Record> = vec![
//!     vec!["john".into(), "doe".into(), "john.doe@example.com".into()],
//!     vec!["jane".into(), "doe".into(), "jane.doe@example.com".into()],
//! ];
//!
//! let mut stmt = Statement::create(|row: &Record| row[1] == "doe");
//! stmt.order_by(|a: &Record, b: &Record| a[0].cmp(&b[0]))
//!     .offset(1)?;
//!
//! let result = stmt.process(&rows);
//! assert_eq!(result.count(), 1);
//! assert_eq!(result.first().unwrap()[0], "john");
//! # Ok::<(), standout_statement::StatementError>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source → filter → stable sort (only if ordered) → skip offset → take limit
//! ```
//!
//! Without comparators the whole pipeline streams from the source. With
//! comparators the filtered records are buffered once per result and sorted;
//! records the chain considers equal keep their input order.
//!
//! # Windows
//!
//! | Call | Accepts | Rejects with |
//! |------|---------|--------------|
//! | `offset(n)` | `n >= 0` | `InvalidOffset` |
//! | `limit(n)` | `n >= -1` (`-1` = unbounded) | `InvalidLimit` |
//!
//! An offset past the end gives an empty result. A zero-length window is
//! empty under the default [`BoundsPolicy::Lenient`]; under
//! [`BoundsPolicy::Strict`] a zero-length window past the first record fails
//! [`TabularResult::try_iter`] and [`TabularResult::try_count`] with
//! `OutOfRange`, and the infallible views panic with that error rather than
//! yield nothing.
//!
//! # Features
//!
//! - `csv` (default): [`CsvDocument`], a record source over the `csv` crate,
//!   and [`Statement::process_document`].

mod clause;
#[cfg(feature = "csv")]
mod document;
mod error;
mod op;
mod ordering;
mod predicate;
mod record;
mod result;
mod statement;
mod window;

// Re-export public API
pub use clause::{ClauseValue, ColumnClause};
#[cfg(feature = "csv")]
pub use document::{CsvDocument, CsvOptions};
pub use error::{Result, StatementError};
pub use op::Op;
pub use ordering::{Comparator, Comparators, Dir, OrderBy};
pub use predicate::{Predicate, Predicates};
pub use record::{Header, Record, RecordSource};
pub use result::{Records, TabularResult};
pub use statement::Statement;
pub use window::{BoundsPolicy, Window, UNBOUNDED};
