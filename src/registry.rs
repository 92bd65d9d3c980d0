//! Closed control registry: type identifier → deserialization factory.
//!
//! Tag resolution never reaches into reflection or arbitrary code; only what
//! was registered at startup can be produced. "Table" and "Control" are
//! structural identifiers handled by the builder itself and cannot be
//! registered as controls.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::controls::{
    BoxedControl, Button, CheckBox, ControlType, ImageView, Label, Slider, TextBox,
};
use crate::delegate::{self, DelegateError};
use crate::error::RegistryError;

// Identifier grammar: leading ASCII letter, then letters, digits,
// underscores or dots (dots accommodate qualified names).
static TYPE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.]*$").unwrap());

pub fn is_valid_type_id(id: &str) -> bool {
    TYPE_ID_RE.is_match(id)
}

/// Wrapper kinds a structural identifier can name. Rows are deliberately
/// absent: a row arises only from an array or from singleton normalization,
/// never from a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    Table,
    Control,
}

/// Structural identifiers name the wrapper types that may occupy an item
/// slot; the builder populates them itself, no factory involved.
pub fn structural_kind(id: &str) -> Option<WrapperKind> {
    match id {
        "Table" => Some(WrapperKind::Table),
        "Control" => Some(WrapperKind::Control),
        _ => None,
    }
}

/// Monomorphized deserialization entry for one registered control type.
pub type ControlFactory = fn(&Value) -> Result<BoxedControl, DelegateError>;

fn deserialize_control<T: ControlType>(fragment: &Value) -> Result<BoxedControl, DelegateError> {
    let control: T = delegate::from_fragment(T::TYPE_ID, fragment)?;
    Ok(Box::new(control))
}

/// Insertion-ordered identifier → factory map.
#[derive(Debug, Default, Clone)]
pub struct ControlRegistry {
    entries: IndexMap<String, ControlFactory>,
}

impl ControlRegistry {
    /// An empty registry. Structural identifiers resolve regardless.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the builtin vocabulary.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.install_builtins();
        registry
    }

    // Builtin identifiers are literals covered by the grammar tests, so they
    // bypass `register` validation.
    fn install_builtins(&mut self) {
        fn put<T: ControlType>(entries: &mut IndexMap<String, ControlFactory>) {
            entries.insert(T::TYPE_ID.to_owned(), deserialize_control::<T>);
        }
        put::<Button>(&mut self.entries);
        put::<Label>(&mut self.entries);
        put::<TextBox>(&mut self.entries);
        put::<CheckBox>(&mut self.entries);
        put::<Slider>(&mut self.entries);
        put::<ImageView>(&mut self.entries);
    }

    /// Register a control type under its `TYPE_ID`.
    pub fn register<T: ControlType>(&mut self) -> Result<(), RegistryError> {
        self.register_factory(T::TYPE_ID, deserialize_control::<T>)
    }

    /// Register an explicit factory, for controls that need custom
    /// construction logic.
    pub fn register_factory(
        &mut self,
        type_id: &str,
        factory: ControlFactory,
    ) -> Result<(), RegistryError> {
        if structural_kind(type_id).is_some() {
            return Err(RegistryError::Reserved {
                type_id: type_id.to_owned(),
            });
        }
        if !is_valid_type_id(type_id) {
            return Err(RegistryError::Malformed {
                type_id: type_id.to_owned(),
            });
        }
        if self.entries.contains_key(type_id) {
            return Err(RegistryError::Duplicate {
                type_id: type_id.to_owned(),
            });
        }
        log::debug!("registered control type \"{type_id}\"");
        self.entries.insert(type_id.to_owned(), factory);
        Ok(())
    }

    /// The factory registered for `type_id`, if any.
    pub fn factory(&self, type_id: &str) -> Option<ControlFactory> {
        self.entries.get(type_id).copied()
    }

    /// Registered identifiers in registration order.
    pub fn known_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The process-wide default registry (builtins only), populated on first use.
pub fn default_registry() -> &'static ControlRegistry {
    static DEFAULT: Lazy<ControlRegistry> = Lazy::new(ControlRegistry::with_builtins);
    &DEFAULT
}
