use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

use super::AggregateError;

/// Interchange representation of an aggregate
#[derive(Deserialize)]
struct ErrorList {
    #[serde(default)]
    errors: Vec<String>,
}

/// Serializes as an object with the list of entry messages, e.g.
/// `{"errors": ["foo", "bar"]}`
impl<E: Display> Serialize for AggregateError<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let errors = self
            .entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>();

        let mut state = serializer.serialize_struct("AggregateError", 1)?;
        state.serialize_field("errors", &errors)?;
        state.end()
    }
}

/// Every message in the list becomes a single entry
impl<'de, E: From<String>> Deserialize<'de> for AggregateError<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ErrorList { errors } = ErrorList::deserialize(deserializer)?;
        Ok(AggregateError::from(
            errors.into_iter().map(E::from).collect::<Vec<_>>(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Failure;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn it_serializes_entry_messages() {
        let err = AggregateError::from(vec!["foo", "bar"]);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"errors": ["foo", "bar"]})
        );
    }

    #[test]
    fn it_serializes_an_empty_list() {
        let err = AggregateError::<&str>::new();
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"errors":[]}"#);
    }

    #[test]
    fn it_deserializes_messages_in_order() {
        let err: AggregateError<String> =
            serde_json::from_str(r#"{"errors": ["foo", "bar"]}"#).unwrap();
        assert_eq!(
            err.entries(),
            &[
                Failure::Single(String::from("foo")),
                Failure::Single(String::from("bar"))
            ]
        );

        let err: AggregateError<Box<dyn std::error::Error + Send + Sync>> =
            serde_json::from_str(r#"{"errors": ["foo"]}"#).unwrap();
        assert_eq!(err.to_string(), "1 error(s) occurred:\n\n* foo");
    }

    #[test]
    fn it_deserializes_a_missing_list_as_empty() {
        let err: AggregateError<String> = serde_json::from_str("{}").unwrap();
        assert!(err.is_empty());
    }
}
