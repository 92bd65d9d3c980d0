//! Builtin control vocabulary.
//!
//! Controls are opaque to the layout engine: the tree only needs a boxed
//! instance and a type name for diagnostics. The builtin set below is small
//! and serde-derived; anything else enters through
//! `ControlRegistry::register`.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Opaque leaf interface consumed by the layout tree.
pub trait Control: fmt::Debug + Send + Sync {
    /// The registered identifier this control was produced from.
    fn type_name(&self) -> &'static str;
}

pub type BoxedControl = Box<dyn Control>;

/// A deserializable control type with a fixed registry identifier.
pub trait ControlType: Control + DeserializeOwned + Sized + 'static {
    const TYPE_ID: &'static str;
}

/// Push button with an optional text label.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Button {
    pub text: Option<String>,
    pub enabled: Option<bool>,
}

/// Static text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Label {
    pub text: Option<String>,
    pub wrap: Option<bool>,
}

/// Single-line text input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextBox {
    pub text: Option<String>,
    pub placeholder: Option<String>,
    pub read_only: Option<bool>,
}

/// Two-state check box.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckBox {
    pub text: Option<String>,
    pub checked: Option<bool>,
}

/// Integer slider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Slider {
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub value: Option<i32>,
}

/// Image placeholder referencing a named resource. Resource loading is a
/// separate subsystem; only the name travels here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageView {
    pub resource: Option<String>,
}

impl Control for Button {
    fn type_name(&self) -> &'static str {
        Self::TYPE_ID
    }
}
impl ControlType for Button {
    const TYPE_ID: &'static str = "Button";
}

impl Control for Label {
    fn type_name(&self) -> &'static str {
        Self::TYPE_ID
    }
}
impl ControlType for Label {
    const TYPE_ID: &'static str = "Label";
}

impl Control for TextBox {
    fn type_name(&self) -> &'static str {
        Self::TYPE_ID
    }
}
impl ControlType for TextBox {
    const TYPE_ID: &'static str = "TextBox";
}

impl Control for CheckBox {
    fn type_name(&self) -> &'static str {
        Self::TYPE_ID
    }
}
impl ControlType for CheckBox {
    const TYPE_ID: &'static str = "CheckBox";
}

impl Control for Slider {
    fn type_name(&self) -> &'static str {
        Self::TYPE_ID
    }
}
impl ControlType for Slider {
    const TYPE_ID: &'static str = "Slider";
}

impl Control for ImageView {
    fn type_name(&self) -> &'static str {
        Self::TYPE_ID
    }
}
impl ControlType for ImageView {
    const TYPE_ID: &'static str = "ImageView";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_fields() {
        let button: Button = serde_json::from_value(json!({})).unwrap();
        assert_eq!(button.text, None);
        assert_eq!(button.enabled, None);

        let slider: Slider = serde_json::from_value(json!({"min": 0, "max": 10})).unwrap();
        assert_eq!(slider.min, Some(0));
        assert_eq!(slider.max, Some(10));
        assert_eq!(slider.value, None);
    }

    #[test]
    fn the_type_tag_key_is_ignored_by_payloads() {
        let label: Label =
            serde_json::from_value(json!({"$type": "Label", "text": "hi"})).unwrap();
        assert_eq!(label.text.as_deref(), Some("hi"));
    }

    #[test]
    fn type_names_match_registry_identifiers() {
        assert_eq!(Button::default().type_name(), "Button");
        assert_eq!(Label::default().type_name(), "Label");
        assert_eq!(TextBox::default().type_name(), "TextBox");
        assert_eq!(CheckBox::default().type_name(), "CheckBox");
        assert_eq!(Slider::default().type_name(), "Slider");
        assert_eq!(ImageView::default().type_name(), "ImageView");
    }
}
