//! Helpers to add context to the messages of a failure

use thiserror::Error;

use crate::Failure;

#[derive(Debug, Error, Clone, PartialEq)]
/// A failure with a tag added to its message
pub enum Decorated<E> {
    #[error("{tag} {inner}")]
    Prefixed {
        tag: String,
        #[source]
        inner: E,
    },

    #[error("{inner} {tag}")]
    Suffixed {
        tag: String,
        #[source]
        inner: E,
    },
}

impl<E> Decorated<E> {
    /// The undecorated failure
    pub fn inner(&self) -> &E {
        match self {
            Decorated::Prefixed { inner, .. } | Decorated::Suffixed { inner, .. } => inner,
        }
    }

    pub fn into_inner(self) -> E {
        match self {
            Decorated::Prefixed { inner, .. } | Decorated::Suffixed { inner, .. } => inner,
        }
    }
}

/// Prefix the message of the failure with the given tag.
///
/// If the failure is an aggregate, every entry is prefixed. This is useful
/// to give better scoping when merging aggregates coming from different
/// operations.
pub fn prefix<E>(failure: Option<Failure<E>>, tag: &str) -> Option<Failure<Decorated<E>>> {
    failure.map(|failure| {
        failure.map(|inner| Decorated::Prefixed {
            tag: tag.to_owned(),
            inner,
        })
    })
}

/// Suffix the message of the failure with the given tag.
///
/// If the failure is an aggregate, every entry is suffixed.
pub fn suffix<E>(failure: Option<Failure<E>>, tag: &str) -> Option<Failure<Decorated<E>>> {
    failure.map(|failure| {
        failure.map(|inner| Decorated::Suffixed {
            tag: tag.to_owned(),
            inner,
        })
    })
}
