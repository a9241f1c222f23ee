//! Filter conditions and their registry.

use std::fmt;
use std::sync::Arc;

use crate::record::Record;

/// A boolean test over a single record.
pub type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Ordered set of predicates combined with AND.
///
/// Predicates run left to right in registration order and evaluation stops at
/// the first one returning `false`, so cheap predicates registered early can
/// prune records before expensive ones run. An empty registry accepts every
/// record.
#[derive(Clone, Default)]
pub struct Predicates {
    items: Vec<Predicate>,
}

impl Predicates {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Predicates::default()
    }

    /// Appends a predicate.
    pub fn add<F>(&mut self, predicate: F)
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.items.push(Arc::new(predicate));
    }

    /// Appends an already shared predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.items.push(predicate);
    }

    /// Returns `true` if every predicate accepts the record.
    pub fn evaluate(&self, record: &Record) -> bool {
        self.items.iter().all(|predicate| predicate(record))
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no predicate is registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Predicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicates")
            .field("len", &self.items.len())
            .finish()
    }
}
