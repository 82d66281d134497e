#![cfg_attr(docsrs, feature(doc_cfg))]
//! multierror aggregates multiple independent failures into a single composite error.
//!
//! Callers performing several independent fallible steps (parallel I/O, batch validation,
//! resource cleanup) often lose all but the first error. This library keeps all of them, in
//! order, within an [`AggregateError`] and renders them as a single human-readable report.
//!
//! # Features
//!
//! - Merge failures with [`merge`], flattening aggregates one level, or keep nesting with
//!   [`merge_nested`]. Remove all nesting with [`flatten`].
//! - Decide whether anything went wrong with [`AggregateError::error_or_none`] or
//!   [`AggregateError::into_result`]. An empty aggregate means nothing failed.
//! - Run fallible units concurrently with a [`Group`], optionally limiting how many of them run
//!   at the same time, and collect all their failures.
//! - Pluggable rendering, JSON serialization via [serde](https://serde.rs/) and helpers to
//!   [prefix](`decorate::prefix`) or [suffix](`decorate::suffix`) messages.
//! - Observable runtime. The [`Group`] reports its progress using the [tracing crate](https://crates.io/crates/tracing).
//!
//! # Failures
//!
//! A [`Failure`] is either a single error, or an aggregate appearing as a value. The absence of
//! a failure is always `None`, there is no such thing as an empty single failure.
//!
//! ```rust
//! use multierror::{flatten, merge, merge_nested, Failure};
//!
//! // aggregates given to merge are spliced one level
//! let io = merge(None, [Some(Failure::single("read failed")), None]);
//! let err = merge(Some(Failure::single("parse failed")), [Some(Failure::Composite(io.clone()))]);
//! assert_eq!(err.len(), 2);
//!
//! // merge_nested keeps the aggregate as a single entry
//! let err = merge_nested(Some(Failure::single("parse failed")), [Some(Failure::Composite(io))]);
//! assert_eq!(err.len(), 2);
//! assert!(err[1].as_composite().is_some());
//!
//! // flatten removes all nesting
//! let err = flatten(Failure::Composite(err));
//! assert!(err.iter().all(|f| f.as_single().is_some()));
//! ```
//!
//! # Groups
//!
//! A [`Group`] spawns every submitted unit as a tokio task and merges their failures. Waiting on
//! the group returns `Ok(())` if nothing failed.
//!
//! ```rust
//! use multierror::Group;
//!
//! # tokio_test::block_on(async {
//! let group = Group::new().with_limit(Some(4));
//! for path in ["/etc/a", "/etc/b"] {
//!     group.go(move || async move { Err(format!("{path}: not found")) }).await;
//! }
//!
//! let mut err = group.wait().await.unwrap_err();
//! // units complete in any order
//! err.sort();
//! assert_eq!(
//!     err.to_string(),
//!     "2 error(s) occurred:\n\n* /etc/a: not found\n* /etc/b: not found"
//! );
//! # })
//! ```

mod aggregate;
mod group;

pub mod decorate;

pub use aggregate::*;
pub use group::*;

#[cfg(test)]
mod testing;
