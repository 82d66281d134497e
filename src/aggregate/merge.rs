use super::{AggregateError, Failure};

/// Coerce an optional failure into an aggregate
///
/// - `None` becomes an empty aggregate
/// - an aggregate is returned unchanged
/// - any other failure becomes a single entry aggregate
pub fn wrap<E>(failure: Option<Failure<E>>) -> AggregateError<E> {
    match failure {
        None => AggregateError::new(),
        Some(Failure::Composite(agg)) => agg,
        Some(Failure::Single(err)) => {
            let mut agg = AggregateError::new();
            agg.append_nested(Failure::Single(err));
            agg
        }
    }
}

/// Merge failures into a larger aggregate.
///
/// The base is coerced with [`wrap`] and every addition that is not `None`
/// is appended in order. Additions that are aggregates themselves are
/// flattened one level into the result, i.e. their entries are spliced
/// but aggregates nested within those entries are kept as they are.
///
/// The result is always an aggregate, even if nothing failed. Use
/// [`AggregateError::error_or_none`] to check for that case.
pub fn merge<E, I>(base: Option<Failure<E>>, additions: I) -> AggregateError<E>
where
    I: IntoIterator<Item = Option<Failure<E>>>,
{
    let mut agg = wrap(base);
    for failure in additions.into_iter().flatten() {
        agg.append(failure);
    }
    agg
}

/// Like [`merge`], but aggregates given as additions are appended as a
/// single entry, preserving the nesting.
pub fn merge_nested<E, I>(base: Option<Failure<E>>, additions: I) -> AggregateError<E>
where
    I: IntoIterator<Item = Option<Failure<E>>>,
{
    let mut agg = wrap(base);
    for failure in additions.into_iter().flatten() {
        agg.append_nested(failure);
    }
    agg
}

/// Like [`merge`], but skips empty aggregates along with `None` values and
/// avoids wrapping when there is nothing to merge.
///
/// - if no failure remains, the result is `None`
/// - if the base is `None` and exactly one addition remains, that addition is
///   returned as-is
/// - otherwise the result is the merged aggregate
///
/// Callers should not expect the result to always be a
/// [`Failure::Composite`].
pub fn merge_non_nil<E, I>(base: Option<Failure<E>>, additions: I) -> Option<Failure<E>>
where
    I: IntoIterator<Item = Option<Failure<E>>>,
{
    let base = base.filter(|failure| !failure.is_empty());
    let mut rest = additions
        .into_iter()
        .flatten()
        .filter(|failure| !failure.is_empty())
        .collect::<Vec<_>>();

    match base {
        None if rest.is_empty() => None,
        None if rest.len() == 1 => rest.pop(),
        base => Some(Failure::Composite(merge(base, rest.into_iter().map(Some)))),
    }
}

/// Recursively flatten the failure into a single aggregate with no
/// nested aggregates, in depth-first order.
pub fn flatten<E>(failure: Failure<E>) -> AggregateError<E> {
    wrap(Some(failure)).flattened()
}

/// Call the provided callback and merge its error into the slot.
///
/// Useful to run cleanup steps without losing the errors of previous
/// steps. The slot is left as `None` if nothing failed.
///
/// ```rust
/// use multierror::call;
///
/// let mut err = None;
/// call(&mut err, || Err("failed to flush"));
/// call(&mut err, || Ok(()));
/// call(&mut err, || Err("failed to close"));
///
/// assert_eq!(err.map(|e| e.len()), Some(2));
/// ```
pub fn call<E, F>(slot: &mut Option<AggregateError<E>>, callback: F)
where
    F: FnOnce() -> Result<(), E>,
{
    if let Err(err) = callback() {
        slot.get_or_insert_with(AggregateError::new)
            .append(Failure::Single(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(err: &'static str) -> Option<Failure<&'static str>> {
        Some(Failure::Single(err))
    }

    fn composite(errs: Vec<&'static str>) -> Option<Failure<&'static str>> {
        Some(Failure::Composite(AggregateError::from(errs)))
    }

    #[test]
    fn it_wraps_failures() {
        assert!(wrap::<&str>(None).is_empty());
        assert_eq!(wrap(single("foo")).entries(), &[Failure::Single("foo")]);

        let agg = AggregateError::from(vec!["a", "b"]).with_renderer(|_| String::from("custom"));
        let wrapped = wrap(Some(Failure::Composite(agg)));
        assert_eq!(wrapped, AggregateError::from(vec!["a", "b"]));
        assert_eq!(wrapped.to_string(), "custom");
    }

    #[test]
    fn it_merges_nothing_into_an_empty_aggregate() {
        let agg: AggregateError<&str> = merge(None, []);
        assert!(agg.is_empty());

        let agg = merge(None, [None, None, composite(vec![])]);
        assert!(agg.is_empty());
        assert!(agg.error_or_none().is_none());
    }

    #[test]
    fn it_merges_into_an_existing_aggregate() {
        let base = composite(vec!["foo"]);
        let agg = merge(base, [single("bar"), None, single("baz")]);
        assert_eq!(agg, AggregateError::from(vec!["foo", "bar", "baz"]));
    }

    #[test]
    fn it_keeps_a_single_base_first() {
        let agg = merge(single("foo"), [composite(vec!["bar"])]);
        assert_eq!(agg, AggregateError::from(vec!["foo", "bar"]));
    }

    #[test]
    fn it_splices_aggregates_one_level() {
        let agg = merge(None, [composite(vec!["x"]), composite(vec!["y", "z"])]);
        assert_eq!(agg.entries().len(), 3);
        assert_eq!(agg, AggregateError::from(vec!["x", "y", "z"]));

        // deeper nesting is kept
        let inner = merge_nested(None, [single("b"), composite(vec!["c"])]);
        let agg = merge(single("a"), [Some(Failure::Composite(inner))]);
        assert_eq!(
            agg.entries(),
            &[
                Failure::Single("a"),
                Failure::Single("b"),
                Failure::Composite(AggregateError::from(vec!["c"])),
            ]
        );
    }

    #[test]
    fn it_merges_associatively() {
        let base = || composite(vec!["a1", "a2"]);
        let b = || composite(vec!["b1", "b2"]);
        let c = || single("c");

        let stepwise = merge(Some(Failure::Composite(merge(base(), [b()]))), [c()]);
        let at_once = merge(base(), [b(), c()]);
        assert_eq!(stepwise, at_once);
    }

    #[test]
    fn it_merges_without_flattening() {
        let agg = merge_nested(single("a"), [composite(vec!["b", "c"]), None]);
        assert_eq!(
            agg.entries(),
            &[
                Failure::Single("a"),
                Failure::Composite(AggregateError::from(vec!["b", "c"])),
            ]
        );
    }

    #[test]
    fn it_filters_out_empty_failures() {
        assert_eq!(merge_non_nil::<&str, _>(None, [None, None]), None);
        assert_eq!(merge_non_nil(None, [composite(vec![]), None]), None);
        assert_eq!(merge_non_nil(composite(vec![]), [None]), None);
    }

    #[test]
    fn it_returns_a_lone_failure_unchanged() {
        assert_eq!(merge_non_nil(None, [None, single("real")]), single("real"));

        let agg = AggregateError::from(vec!["a", "b"]).with_renderer(|_| String::from("custom"));
        let merged = merge_non_nil(None, [Some(Failure::Composite(agg))]);
        assert_eq!(merged.map(|f| f.to_string()), Some(String::from("custom")));
    }

    #[test]
    fn it_merges_the_remaining_failures() {
        assert_eq!(
            merge_non_nil(None, [single("a"), None, composite(vec!["b", "c"])]),
            composite(vec!["a", "b", "c"])
        );
        assert_eq!(merge_non_nil(single("a"), [None]), composite(vec!["a"]));
    }

    #[test]
    fn it_flattens_recursively() {
        let innermost = merge(None, [single("c")]);
        let inner = merge_nested(single("b"), [Some(Failure::Composite(innermost))]);
        let outer = merge_nested(single("a"), [Some(Failure::Composite(inner))]);

        let flat = flatten(Failure::Composite(outer));
        assert_eq!(flat.entries(), &[
            Failure::Single("a"),
            Failure::Single("b"),
            Failure::Single("c"),
        ]);
        assert!(flat.iter().all(|f| f.as_single().is_some()));
    }

    #[test]
    fn it_flattens_a_single_failure() {
        assert_eq!(flatten(Failure::Single("a")), AggregateError::from(vec!["a"]));
    }

    #[test]
    fn it_accumulates_errors_from_callbacks() {
        let mut err = None;
        call(&mut err, || Ok(()));
        assert!(err.is_none());

        call(&mut err, || Err("flush"));
        call(&mut err, || Ok(()));
        call(&mut err, || Err("close"));
        assert_eq!(err, Some(AggregateError::from(vec!["flush", "close"])));
    }
}
