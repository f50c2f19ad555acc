//! Lenient fetch results.
//!
//! The upstream server is treated as a lenient data source: a query that
//! returns an unexpected shape degrades the report instead of aborting it.
//! Builders surface that distinction explicitly so the project builder can
//! decide whether to log-and-continue or fail.

/// Result of a fetch that tolerates upstream data-quality problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Every query resolved as expected.
    Complete(T),
    /// Some responses were skipped; the value is missing those parts.
    Partial(T),
    /// The upstream returned nothing usable.
    Empty,
}

impl<T> Outcome<T> {
    /// Extract the value, if any data was produced.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Complete(v) | Outcome::Partial(v) => Some(v),
            Outcome::Empty => None,
        }
    }

    /// Whether some part of the data was skipped.
    pub fn is_partial(&self) -> bool {
        matches!(self, Outcome::Partial(_))
    }

    /// Extract the value, or the type's default when empty.
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.into_value().unwrap_or_default()
    }
}
