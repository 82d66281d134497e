//! Composite errors aggregating multiple independent failures

use std::{
    fmt::{self, Debug, Display},
    ops::Deref,
    sync::Arc,
};

mod json;
mod merge;
mod render;
mod sort;

pub use merge::*;
pub use render::*;

/// A failure value, either a single caller supplied error or an aggregate
/// of failures appearing as a value.
///
/// The absence of a failure is represented by `Option::None`, there is no
/// "empty" single failure.
#[derive(Debug, Clone)]
pub enum Failure<E> {
    Single(E),
    Composite(AggregateError<E>),
}

impl<E> Failure<E> {
    pub fn single(err: E) -> Self {
        Failure::Single(err)
    }

    /// Convert the error of a result into a failure, if any
    pub fn from_result<T>(result: Result<T, E>) -> Option<Self> {
        result.err().map(Failure::Single)
    }

    /// Return `true` if this is an aggregate holding no failures
    pub fn is_empty(&self) -> bool {
        match self {
            Failure::Single(_) => false,
            Failure::Composite(agg) => agg.is_empty(),
        }
    }

    pub fn as_single(&self) -> Option<&E> {
        match self {
            Failure::Single(err) => Some(err),
            Failure::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&AggregateError<E>> {
        match self {
            Failure::Single(_) => None,
            Failure::Composite(agg) => Some(agg),
        }
    }

    /// Transform every single failure, keeping the nesting structure
    ///
    /// Custom renderers cannot be carried over to the new error type, so
    /// mapped aggregates use the default renderer.
    pub fn map<F, M>(self, mut f: M) -> Failure<F>
    where
        M: FnMut(E) -> F,
    {
        self.map_with(&mut f)
    }

    pub(crate) fn map_with<F, M>(self, f: &mut M) -> Failure<F>
    where
        M: FnMut(E) -> F,
    {
        match self {
            Failure::Single(err) => Failure::Single(f(err)),
            Failure::Composite(agg) => Failure::Composite(agg.map_with(f)),
        }
    }
}

impl<E> From<AggregateError<E>> for Failure<E> {
    fn from(agg: AggregateError<E>) -> Self {
        Failure::Composite(agg)
    }
}

impl<E: PartialEq> PartialEq for Failure<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Failure::Single(a), Failure::Single(b)) => a == b,
            (Failure::Composite(a), Failure::Composite(b)) => a == b,
            _ => false,
        }
    }
}

impl<E: Display> Display for Failure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Single(err) => err.fmt(f),
            Failure::Composite(agg) => agg.fmt(f),
        }
    }
}

impl<E> std::error::Error for Failure<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Failure::Single(err) => err.source(),
            Failure::Composite(_) => None,
        }
    }
}

/// An error aggregating multiple failures, in the order they
/// were found.
///
/// An aggregate with no entries means that nothing failed. Use
/// [`error_or_none`](`AggregateError::error_or_none`) or
/// [`into_result`](`AggregateError::into_result`) at the end of an
/// accumulation to decide whether anything went wrong.
///
/// The error is rendered using [`list_format`] unless a custom
/// renderer is provided with [`with_renderer`](`AggregateError::with_renderer`).
///
/// ```rust
/// use multierror::{merge, AggregateError, Failure};
///
/// let first: Result<(), &str> = Err("disk full");
/// let second: Result<(), &str> = Ok(());
/// let third: Result<(), &str> = Err("permission denied");
///
/// let err = merge(
///     None,
///     [first, second, third].into_iter().map(Failure::from_result),
/// );
/// assert_eq!(
///     err.to_string(),
///     "2 error(s) occurred:\n\n* disk full\n* permission denied"
/// );
/// ```
#[derive(Clone)]
pub struct AggregateError<E> {
    entries: Vec<Failure<E>>,
    renderer: Option<Renderer<E>>,
}

impl<E> Default for AggregateError<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> AggregateError<E> {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            renderer: None,
        }
    }

    /// Use the given function to render the error instead of the default
    /// [`list_format`]
    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&[Failure<E>]) -> String + Send + Sync + 'static,
    {
        self.set_renderer(renderer);
        self
    }

    pub fn set_renderer<F>(&mut self, renderer: F)
    where
        F: Fn(&[Failure<E>]) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
    }

    /// Read-only access to the aggregated failures
    pub fn entries(&self) -> &[Failure<E>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Failure<E>> {
        self.entries
    }

    /// Append a failure to the aggregate.
    ///
    /// If the failure is itself an aggregate, its entries are spliced one
    /// level into this one.
    pub fn append(&mut self, failure: Failure<E>) {
        match failure {
            Failure::Single(err) => self.entries.push(Failure::Single(err)),
            Failure::Composite(agg) => self.entries.extend(agg.entries),
        }
    }

    /// Append a failure to the aggregate as a single entry, keeping
    /// any nested aggregate as-is.
    pub fn append_nested(&mut self, failure: Failure<E>) {
        self.entries.push(failure);
    }

    /// Return `None` if no failures were aggregated
    pub fn error_or_none(self) -> Option<Self> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self)
    }

    /// Return `Ok(())` if no failures were aggregated or `Err(self)` otherwise
    pub fn into_result(self) -> Result<(), Self> {
        match self.error_or_none() {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Recursively remove nested aggregates, depth first
    pub fn flattened(mut self) -> Self {
        fn walk<E>(failure: Failure<E>, out: &mut Vec<Failure<E>>) {
            match failure {
                Failure::Single(err) => out.push(Failure::Single(err)),
                Failure::Composite(agg) => {
                    for entry in agg.entries {
                        walk(entry, out);
                    }
                }
            }
        }

        let entries = std::mem::take(&mut self.entries);
        for entry in entries {
            walk(entry, &mut self.entries);
        }
        self
    }

    pub(crate) fn map_with<F, M>(self, f: &mut M) -> AggregateError<F>
    where
        M: FnMut(E) -> F,
    {
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            entries.push(entry.map_with(f));
        }
        AggregateError {
            entries,
            renderer: None,
        }
    }
}

impl<E> Deref for AggregateError<E> {
    type Target = [Failure<E>];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<E> From<Vec<E>> for AggregateError<E> {
    fn from(errs: Vec<E>) -> Self {
        AggregateError {
            entries: errs.into_iter().map(Failure::Single).collect(),
            renderer: None,
        }
    }
}

impl<E> FromIterator<Failure<E>> for AggregateError<E> {
    fn from_iter<I: IntoIterator<Item = Failure<E>>>(iter: I) -> Self {
        let mut agg = AggregateError::new();
        for failure in iter {
            agg.append(failure);
        }
        agg
    }
}

impl<E> Extend<Failure<E>> for AggregateError<E> {
    fn extend<I: IntoIterator<Item = Failure<E>>>(&mut self, iter: I) {
        for failure in iter {
            self.append(failure);
        }
    }
}

impl<E> IntoIterator for AggregateError<E> {
    type Item = Failure<E>;
    type IntoIter = std::vec::IntoIter<Failure<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a AggregateError<E> {
    type Item = &'a Failure<E>;
    type IntoIter = std::slice::Iter<'a, Failure<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// The renderer is not part of the aggregate value
impl<E: PartialEq> PartialEq for AggregateError<E> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<E: Debug> Debug for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateError")
            .field("entries", &self.entries)
            .field("custom_renderer", &self.renderer.is_some())
            .finish()
    }
}

impl<E: Display> Display for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.renderer {
            Some(render) => f.write_str(&render(self.entries.as_slice())),
            None => f.write_str(&list_format(&self.entries)),
        }
    }
}

// Entries only need to be printable
impl<E> std::error::Error for AggregateError<E> where E: Debug + Display {}
