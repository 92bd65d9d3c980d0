//! Failure taxonomy for layout construction.
//!
//! Fail-fast: the first problem aborts the whole build and no partial tree
//! escapes. Every variant carries the breadcrumb path of the offending
//! fragment (`rows[2][0]` style, matching the delegate's path rendering).

use thiserror::Error;

use crate::delegate::DelegateError;
use crate::node::{ExpectedKind, NodeKind};

/// Any failure raised while building a layout tree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),
    /// Delegate failures propagate unchanged.
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}

/// The document shape cannot be reconciled with the expected kind and no
/// type tag disambiguates it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// An object with no type tag and neither reserved key.
    #[error(
        "could not infer the type of node at `{path}`: object has no \"$type\", \"rows\" or \"control\" key"
    )]
    AmbiguousObject { path: String },

    /// A scalar where a node was expected.
    #[error("invalid object graph at `{path}`: cannot build a layout node from {found}")]
    ScalarFragment { path: String, found: &'static str },

    /// `"$type"` must always be a string.
    #[error("invalid object graph at `{path}`: \"$type\" must be a string, found {found}")]
    NonStringTag { path: String, found: &'static str },

    /// Rows may only hold control-bearing items.
    #[error("invalid object graph at `{path}`: {found} cannot be a row item")]
    ForbiddenRowItem { path: String, found: NodeKind },

    /// The produced kind cannot satisfy the caller's expectation.
    #[error("invalid object graph at `{path}`: expected {expected}, found {found}")]
    KindMismatch {
        path: String,
        expected: ExpectedKind,
        found: NodeKind,
    },

    /// A control wrapper whose `"control"` key is missing or null.
    #[error("invalid object graph at `{path}`: control wrapper has no control")]
    MissingControl { path: String },

    /// A reserved sequence key holding something other than an array.
    #[error("invalid object graph at `{path}`: \"{key}\" must be an array, found {found}")]
    NotAnArray {
        path: String,
        key: &'static str,
        found: &'static str,
    },

    /// A structural identifier in a slot that needs a concrete control.
    #[error("invalid object graph at `{path}`: \"{type_id}\" is a structural type, not a control")]
    StructuralControl { path: String, type_id: String },

    /// A control slot holding an object with no tag.
    #[error("invalid object graph at `{path}`: control object has no \"$type\"")]
    UntaggedControl { path: String },

    /// A control slot holding a non-object fragment.
    #[error("invalid object graph at `{path}`: control must be an object, found {found}")]
    NonObjectControl { path: String, found: &'static str },
}

/// A type tag names an identifier the registry cannot resolve.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeResolutionError {
    #[error("unknown type \"{type_id}\" at `{path}`")]
    Unknown { type_id: String, path: String },
    #[error("malformed type identifier \"{type_id}\" at `{path}`")]
    Malformed { type_id: String, path: String },
}

/// Misuse of the registry at registration time. Surfaced at startup, not
/// part of the build taxonomy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type identifier \"{type_id}\" is already registered")]
    Duplicate { type_id: String },
    #[error("\"{type_id}\" is a reserved structural identifier")]
    Reserved { type_id: String },
    #[error("malformed type identifier \"{type_id}\"")]
    Malformed { type_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path_and_shape() {
        let err = StructureError::ScalarFragment {
            path: "rows[1][0]".to_owned(),
            found: "a number",
        };
        assert_eq!(
            err.to_string(),
            "invalid object graph at `rows[1][0]`: cannot build a layout node from a number"
        );

        let err = TypeResolutionError::Unknown {
            type_id: "Carousel".to_owned(),
            path: ".".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown type \"Carousel\" at `.`");
    }

    #[test]
    fn build_error_is_transparent_over_its_members() {
        let inner = StructureError::MissingControl {
            path: "control".to_owned(),
        };
        let outer = BuildError::from(inner);
        assert_eq!(
            outer.to_string(),
            "invalid object graph at `control`: control wrapper has no control"
        );
    }
}
