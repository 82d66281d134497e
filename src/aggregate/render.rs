use std::{fmt::Display, sync::Arc};

use super::Failure;

/// A function rendering the entries of an aggregate into a human-readable message
pub type Renderer<E> = Arc<dyn Fn(&[Failure<E>]) -> String + Send + Sync>;

/// Default aggregate renderer.
///
/// Renders a header with the number of failures followed by one bullet
/// point per failure, e.g.
///
/// ```text
/// 2 error(s) occurred:
///
/// * one
/// * two
/// ```
pub fn list_format<E: Display>(entries: &[Failure<E>]) -> String {
    if entries.is_empty() {
        return String::from("0 errors occurred:");
    }

    let points = entries
        .iter()
        .map(|entry| format!("* {entry}"))
        .collect::<Vec<_>>();

    format!(
        "{} error(s) occurred:\n\n{}",
        entries.len(),
        points.join("\n")
    )
}
