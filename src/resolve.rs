//! Type resolution: classify one fragment against the caller's expectation.
//!
//! Priority order: null beats everything; arrays split on the expected kind;
//! an explicit `"$type"` tag beats the reserved shape-hint keys; `"rows"`
//! beats `"control"`; anything else is a structural failure. The resolver
//! only classifies; recursion, population and normalization live in the
//! builder.

use serde_json::{Map, Value};

use crate::doc;
use crate::error::{BuildError, StructureError, TypeResolutionError};
use crate::node::ExpectedKind;
use crate::registry::{
    ControlFactory, ControlRegistry, WrapperKind, is_valid_type_id, structural_kind,
};

/// Verdict for a single fragment. Borrows the document.
#[derive(Debug)]
pub enum Resolution<'doc> {
    /// Null fragment: contributes no node.
    Absent,
    /// Array under row expectation: elements are items.
    RowOfItems(&'doc [Value]),
    /// Array under any other expectation: elements are rows.
    TableOfRows(&'doc [Value]),
    /// Tagged object naming a registered control type.
    Control {
        type_id: &'doc str,
        factory: ControlFactory,
    },
    /// Object to populate as a structural wrapper (tagged or inferred).
    Wrapper(WrapperKind),
}

/// Verdict for a `"$type"` value alone, shared with the builder's control
/// slot handling.
#[derive(Debug)]
pub enum TagVerdict<'doc> {
    Structural {
        type_id: &'doc str,
        kind: WrapperKind,
    },
    Control {
        type_id: &'doc str,
        factory: ControlFactory,
    },
}

pub fn resolve<'doc>(
    registry: &ControlRegistry,
    fragment: &'doc Value,
    expected: ExpectedKind,
    path: &str,
) -> Result<Resolution<'doc>, BuildError> {
    match fragment {
        Value::Null => Ok(Resolution::Absent),
        Value::Array(elements) => Ok(match expected {
            ExpectedKind::Row => Resolution::RowOfItems(elements),
            // bare arrays group as tables everywhere else
            ExpectedKind::Control | ExpectedKind::Table => Resolution::TableOfRows(elements),
        }),
        Value::Object(object) => resolve_object(registry, object, path),
        scalar => Err(StructureError::ScalarFragment {
            path: path.to_owned(),
            found: doc::shape_name(scalar),
        }
        .into()),
    }
}

fn resolve_object<'doc>(
    registry: &ControlRegistry,
    object: &'doc Map<String, Value>,
    path: &str,
) -> Result<Resolution<'doc>, BuildError> {
    if let Some(tag) = object.get(doc::TYPE_TAG_KEY) {
        return Ok(match resolve_tag(registry, tag, path)? {
            TagVerdict::Structural { type_id, kind } => {
                log::debug!("`{path}`: structural tag \"{type_id}\"");
                Resolution::Wrapper(kind)
            }
            TagVerdict::Control { type_id, factory } => Resolution::Control { type_id, factory },
        });
    }
    // no tag: reserved keys decide, "rows" first
    if object.contains_key(doc::ROWS_KEY) {
        log::debug!("`{path}`: inferred table wrapper via \"rows\"");
        return Ok(Resolution::Wrapper(WrapperKind::Table));
    }
    if object.contains_key(doc::CONTROL_KEY) {
        log::debug!("`{path}`: inferred control wrapper via \"control\"");
        return Ok(Resolution::Wrapper(WrapperKind::Control));
    }
    Err(StructureError::AmbiguousObject {
        path: path.to_owned(),
    }
    .into())
}

/// Resolve a raw `"$type"` value to a structural kind or a registered
/// factory.
pub fn resolve_tag<'doc>(
    registry: &ControlRegistry,
    tag: &'doc Value,
    path: &str,
) -> Result<TagVerdict<'doc>, BuildError> {
    let type_id = tag.as_str().ok_or_else(|| StructureError::NonStringTag {
        path: path.to_owned(),
        found: doc::shape_name(tag),
    })?;
    if !is_valid_type_id(type_id) {
        return Err(TypeResolutionError::Malformed {
            type_id: type_id.to_owned(),
            path: path.to_owned(),
        }
        .into());
    }
    if let Some(kind) = structural_kind(type_id) {
        return Ok(TagVerdict::Structural { type_id, kind });
    }
    if let Some(factory) = registry.factory(type_id) {
        return Ok(TagVerdict::Control { type_id, factory });
    }
    Err(TypeResolutionError::Unknown {
        type_id: type_id.to_owned(),
        path: path.to_owned(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use serde_json::json;

    fn classify(fragment: &Value, expected: ExpectedKind) -> Result<Resolution<'_>, BuildError> {
        resolve(default_registry(), fragment, expected, ".")
    }

    #[test]
    fn null_is_absent_under_every_expectation() {
        for expected in [ExpectedKind::Control, ExpectedKind::Row, ExpectedKind::Table] {
            assert!(matches!(
                classify(&Value::Null, expected).unwrap(),
                Resolution::Absent
            ));
        }
    }

    #[test]
    fn arrays_split_on_the_expected_kind() {
        let doc = json!([1, 2, 3]);
        assert!(matches!(
            classify(&doc, ExpectedKind::Row).unwrap(),
            Resolution::RowOfItems(elements) if elements.len() == 3
        ));
        assert!(matches!(
            classify(&doc, ExpectedKind::Table).unwrap(),
            Resolution::TableOfRows(elements) if elements.len() == 3
        ));
        assert!(matches!(
            classify(&doc, ExpectedKind::Control).unwrap(),
            Resolution::TableOfRows(_)
        ));
    }

    #[test]
    fn tagged_controls_resolve_through_the_registry() {
        let doc = json!({"$type": "Button", "text": "Ok"});
        assert!(matches!(
            classify(&doc, ExpectedKind::Control).unwrap(),
            Resolution::Control { type_id: "Button", .. }
        ));
    }

    #[test]
    fn structural_tags_resolve_without_the_registry() {
        let table = json!({"$type": "Table"});
        let control = json!({"$type": "Control"});
        assert!(matches!(
            classify(&table, ExpectedKind::Control).unwrap(),
            Resolution::Wrapper(WrapperKind::Table)
        ));
        assert!(matches!(
            classify(&control, ExpectedKind::Control).unwrap(),
            Resolution::Wrapper(WrapperKind::Control)
        ));
    }

    #[test]
    fn row_is_not_a_structural_tag() {
        let doc = json!({"$type": "Row"});
        let err = classify(&doc, ExpectedKind::Row).unwrap_err();
        assert!(matches!(
            err,
            BuildError::TypeResolution(TypeResolutionError::Unknown { ref type_id, .. })
                if type_id == "Row"
        ));
    }

    #[test]
    fn the_tag_beats_reserved_keys() {
        let doc = json!({"$type": "Button", "rows": [[]], "control": {}});
        assert!(matches!(
            classify(&doc, ExpectedKind::Control).unwrap(),
            Resolution::Control { type_id: "Button", .. }
        ));
    }

    #[test]
    fn reserved_keys_infer_wrappers_rows_first() {
        assert!(matches!(
            classify(&json!({"rows": []}), ExpectedKind::Control).unwrap(),
            Resolution::Wrapper(WrapperKind::Table)
        ));
        assert!(matches!(
            classify(&json!({"control": {}}), ExpectedKind::Control).unwrap(),
            Resolution::Wrapper(WrapperKind::Control)
        ));
        assert!(matches!(
            classify(&json!({"rows": [], "control": {}}), ExpectedKind::Control).unwrap(),
            Resolution::Wrapper(WrapperKind::Table)
        ));
    }

    #[test]
    fn unresolvable_objects_and_scalars_fail() {
        let err = classify(&json!({"text": "x"}), ExpectedKind::Control).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Structure(StructureError::AmbiguousObject { .. })
        ));

        let err = classify(&json!("hello"), ExpectedKind::Table).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Structure(StructureError::ScalarFragment { found: "a string", .. })
        ));
    }

    #[test]
    fn bad_tags_report_their_flavor() {
        let err = classify(&json!({"$type": 7}), ExpectedKind::Control).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Structure(StructureError::NonStringTag { found: "a number", .. })
        ));

        let err = classify(&json!({"$type": "9no pe"}), ExpectedKind::Control).unwrap_err();
        assert!(matches!(
            err,
            BuildError::TypeResolution(TypeResolutionError::Malformed { .. })
        ));

        let err = classify(&json!({"$type": "Carousel"}), ExpectedKind::Control).unwrap_err();
        assert!(matches!(
            err,
            BuildError::TypeResolution(TypeResolutionError::Unknown { ref type_id, .. })
                if type_id == "Carousel"
        ));
    }
}
