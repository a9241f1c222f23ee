//! Records and the sources that produce them.
//!
//! A [`Record`] is one row of tabular data: an ordered list of string fields
//! with no length guarantee across rows. Statements consume records through
//! the [`RecordSource`] trait and never look inside a field themselves.

/// One row of tabular data.
pub type Record = Vec<String>;

/// A finite, forward-iterable producer of records.
///
/// Each call to [`records`](RecordSource::records) starts a fresh pass.
/// Sources that can be walked repeatedly give deterministic results when a
/// statement or a result is iterated more than once.
///
/// # Example
///
/// ```
/// use standout_statement::{Record, RecordSource};
///
/// struct Numbers(u32);
///
/// impl RecordSource for Numbers {
///     fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
///         Box::new((0..self.0).map(|n| vec![n.to_string()]))
///     }
/// }
///
/// assert_eq!(Numbers(3).records().count(), 3);
/// ```
pub trait RecordSource {
    /// Starts a new pass over the source.
    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_>;
}

impl RecordSource for Vec<Record> {
    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<const N: usize> RecordSource for [Record; N] {
    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        Box::new(self.iter().cloned())
    }
}

/// Column labels attached to a result.
///
/// The header is decoration only: it maps labels to column positions in the
/// output records and is never consulted while filtering, sorting or
/// windowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    labels: Vec<String>,
}

impl Header {
    /// Creates a header from a list of labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Header {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the labels in column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns `true` if no labels were supplied.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns the column position of `label`.
    ///
    /// When a label repeats, the first occurrence wins.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

impl<S: Into<String>> FromIterator<S> for Header {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Header::new(iter)
    }
}
