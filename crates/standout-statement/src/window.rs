//! The offset/limit window applied after filtering and sorting.

use crate::error::{Result, StatementError};

/// Sentinel accepted by [`Window::with_limit`] for "no limit".
pub const UNBOUNDED: i64 = -1;

/// How a zero-length window past the first record is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundsPolicy {
    /// A zero-length window is always silently empty.
    #[default]
    Lenient,
    /// `limit == 0` with `offset > 0` fails iteration with
    /// [`StatementError::OutOfRange`], matching legacy seek semantics.
    Strict,
}

/// Validated `(offset, limit)` pair.
///
/// The window always refers to the sequence *after* filtering and sorting.
/// An offset at or past the end yields an empty result, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Window {
    offset: usize,
    limit: Option<usize>,
}

impl Window {
    /// Creates a window from already validated values.
    ///
    /// `None` as the limit means unbounded.
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        Window { offset, limit }
    }

    /// Returns a copy with the offset replaced.
    ///
    /// Fails with [`StatementError::InvalidOffset`] when `offset < 0`.
    pub fn with_offset(self, offset: i64) -> Result<Self> {
        let offset = usize::try_from(offset).map_err(|_| StatementError::InvalidOffset(offset))?;
        Ok(Window { offset, ..self })
    }

    /// Returns a copy with the limit replaced.
    ///
    /// [`UNBOUNDED`] (-1) removes the limit; anything below it fails with
    /// [`StatementError::InvalidLimit`].
    pub fn with_limit(self, limit: i64) -> Result<Self> {
        let limit = match limit {
            UNBOUNDED => None,
            n => Some(usize::try_from(n).map_err(|_| StatementError::InvalidLimit(n))?),
        };
        Ok(Window { limit, ..self })
    }

    /// Number of leading records skipped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of records emitted, `None` if unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` if the window neither skips nor truncates.
    pub fn is_unbounded(&self) -> bool {
        self.offset == 0 && self.limit.is_none()
    }

    /// Checks the window against the bounds policy before iteration starts.
    pub fn check(&self, policy: BoundsPolicy) -> Result<()> {
        let zero_length = self.limit == Some(0) && self.offset > 0;
        if policy == BoundsPolicy::Strict && zero_length {
            return Err(StatementError::OutOfRange {
                offset: self.offset,
            });
        }
        Ok(())
    }

    /// Applies the window to an iterator.
    pub fn apply<'a, I>(&self, iter: I) -> Box<dyn Iterator<Item = I::Item> + 'a>
    where
        I: Iterator + 'a,
    {
        let skipped = iter.skip(self.offset);
        match self.limit {
            Some(limit) => Box::new(skipped.take(limit)),
            None => Box::new(skipped),
        }
    }

    /// Length of the window over a sequence of `total` records.
    pub fn len_within(&self, total: usize) -> usize {
        let remaining = total.saturating_sub(self.offset);
        match self.limit {
            Some(limit) => remaining.min(limit),
            None => remaining,
        }
    }
}
