//! The opaque leaf delegate: populate a concrete typed instance from a
//! fragment once structural ambiguity has been resolved.
//!
//! Key→field and index→element mapping is plain serde; what this module adds
//! is the failure shape. A mistyped field deep inside a payload reports the
//! JSON path at which deserialization went wrong, not just the message.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A fragment could not populate an instance of the named type. `path` is
/// the location of the failure within the delegated fragment.
#[derive(Debug, Error)]
#[error("failed to populate \"{type_id}\" at `{path}`: {source}")]
pub struct DelegateError {
    pub type_id: String,
    pub path: String,
    #[source]
    pub source: serde_json::Error,
}

impl DelegateError {
    /// For factory implementations that fail outside serde itself.
    pub fn message(type_id: &str, text: impl std::fmt::Display) -> Self {
        Self {
            type_id: type_id.to_owned(),
            path: ".".to_owned(),
            source: <serde_json::Error as serde::de::Error>::custom(text),
        }
    }

    /// Prefix an enclosing document location onto the serde-local path, so a
    /// failure deep inside a nested fragment reports where in the whole
    /// document it happened.
    pub fn located_at(mut self, prefix: &str) -> Self {
        if prefix == "." {
            return self;
        }
        self.path = match self.path.as_str() {
            "." => prefix.to_owned(),
            path if path.starts_with('[') => format!("{prefix}{path}"),
            path => format!("{prefix}.{path}"),
        };
        self
    }
}

/// Populate a `T` from a borrowed fragment.
pub fn from_fragment<T: DeserializeOwned>(
    type_id: &str,
    fragment: &Value,
) -> Result<T, DelegateError> {
    serde_path_to_error::deserialize(fragment).map_err(
        |err: serde_path_to_error::Error<serde_json::Error>| DelegateError {
            type_id: type_id.to_owned(),
            path: err.path().to_string(),
            source: err.into_inner(),
        },
    )
}
