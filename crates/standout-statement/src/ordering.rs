//! Ordering rules for statement results.
//!
//! Provides [`Comparators`], the priority chain of caller-supplied
//! comparators, together with [`Dir`] and [`OrderBy`] for the common
//! column-based ordering.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::record::Record;

/// A three-way ordering function over two records.
pub type Comparator = Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

/// Priority chain of comparators.
///
/// The first comparator is the primary sort key, the second breaks its ties,
/// and so on. Records equal under the whole chain keep their input order
/// because sorting is stable.
#[derive(Clone, Default)]
pub struct Comparators {
    items: Vec<Comparator>,
}

impl Comparators {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Comparators::default()
    }

    /// Appends a comparator.
    pub fn add<F>(&mut self, comparator: F)
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        self.items.push(Arc::new(comparator));
    }

    /// Appends an already shared comparator.
    pub fn push(&mut self, comparator: Comparator) {
        self.items.push(comparator);
    }

    /// Compares two records with the chain.
    ///
    /// Returns the first non-equal result, or `Equal` when every comparator
    /// ties or the chain is empty.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for comparator in &self.items {
            let ordering = comparator(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable-sorts records in place. An empty chain leaves them untouched.
    pub fn sort(&self, records: &mut [Record]) {
        if self.items.is_empty() {
            return;
        }
        records.sort_by(|a, b| self.compare(a, b));
    }

    /// Number of registered comparators.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no comparator is registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Comparators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparators")
            .field("len", &self.items.len())
            .finish()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Zero-based column position.
    pub column: usize,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Ascending ordering on `column`.
    pub fn asc(column: usize) -> Self {
        OrderBy {
            column,
            dir: Dir::Asc,
        }
    }

    /// Descending ordering on `column`.
    pub fn desc(column: usize) -> Self {
        OrderBy {
            column,
            dir: Dir::Desc,
        }
    }

    /// Creates an ordering with the given direction.
    pub fn new(column: usize, dir: Dir) -> Self {
        OrderBy { column, dir }
    }

    /// Compares two records on this column.
    ///
    /// Fields compare lexically. A record missing the column sorts after
    /// one that has it, in both directions.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match (a.get(self.column), b.get(self.column)) {
            (Some(a), Some(b)) => self.dir.apply(a.cmp(b)),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        }
    }

    /// Converts this ordering into a chain comparator.
    pub fn into_comparator(self) -> Comparator {
        Arc::new(move |a: &Record, b: &Record| self.compare(a, b))
    }
}
