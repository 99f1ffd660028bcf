use cube_content::{ContentError, ContentId, ContentResult, Properties};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Optional string property; present but non-string is an error.
pub(crate) fn string<'a>(
    id: &ContentId,
    properties: &'a Properties,
    key: &str,
) -> ContentResult<Option<&'a str>> {
    match properties.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(ContentError::invalid(
            id,
            format!("`{key}` must be a string, got {other}"),
        )),
    }
}

/// Optional integer property.
pub(crate) fn integer(
    id: &ContentId,
    properties: &Properties,
    key: &str,
) -> ContentResult<Option<i64>> {
    match properties.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            ContentError::invalid(id, format!("`{key}` must be an integer, got {value}"))
        }),
    }
}

/// Optional structured property decoded through serde.
pub(crate) fn decode<T: DeserializeOwned>(
    id: &ContentId,
    properties: &Properties,
    key: &str,
) -> ContentResult<Option<T>> {
    match properties.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|err| ContentError::invalid(id, format!("`{key}`: {err}"))),
    }
}
