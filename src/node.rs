// Strongly-typed layout tree. No serde_json::Value past this point.

use std::fmt;

use serde::Deserialize;

use crate::controls::{BoxedControl, Control};

/// What the caller asked the builder to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    Control,
    Row,
    Table,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExpectedKind::Control => "a control node",
            ExpectedKind::Row => "a row node",
            ExpectedKind::Table => "a table node",
        })
    }
}

/// Concrete kind of a produced node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Control,
    Row,
    Table,
}

impl NodeKind {
    /// Short lowercase label ("control" / "row" / "table").
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Control => "control",
            NodeKind::Row => "row",
            NodeKind::Table => "table",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Control => "a control node",
            NodeKind::Row => "a row node",
            NodeKind::Table => "a table node",
        })
    }
}

/// Leaf node owning exactly one opaque control.
#[derive(Debug)]
pub struct ControlNode {
    pub control: BoxedControl,
    pub xscale: Option<bool>,
    pub yscale: Option<bool>,
}

impl ControlNode {
    pub fn new(control: BoxedControl) -> Self {
        Self {
            control,
            xscale: None,
            yscale: None,
        }
    }

    pub fn control(&self) -> &dyn Control {
        &*self.control
    }

    /// Registered identifier of the wrapped control.
    pub fn type_name(&self) -> &'static str {
        self.control.type_name()
    }
}

/// A row of control-bearing items. Rows cannot nest rows or tables; the
/// restriction is carried by the item type itself.
#[derive(Debug, Default)]
pub struct RowNode {
    pub items: Vec<ControlNode>,
}

impl RowNode {
    pub fn items(&self) -> &[ControlNode] {
        &self.items
    }
}

/// A table of rows.
#[derive(Debug, Default)]
pub struct TableNode {
    pub rows: Vec<RowNode>,
    pub padding: Option<Padding>,
    pub spacing: Option<Spacing>,
    pub xscale: Option<bool>,
    pub yscale: Option<bool>,
}

impl TableNode {
    pub fn rows(&self) -> &[RowNode] {
        &self.rows
    }
}

/// The closed node set.
#[derive(Debug)]
pub enum LayoutNode {
    Control(ControlNode),
    Row(RowNode),
    Table(TableNode),
}

impl LayoutNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            LayoutNode::Control(_) => NodeKind::Control,
            LayoutNode::Row(_) => NodeKind::Row,
            LayoutNode::Table(_) => NodeKind::Table,
        }
    }
}

/// Outer padding of a table, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "PaddingForm")]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn uniform(all: i32) -> Self {
        Self {
            left: all,
            top: all,
            right: all,
            bottom: all,
        }
    }
}

// Wire form: a uniform number or a per-side object.
#[derive(Deserialize)]
#[serde(untagged)]
enum PaddingForm {
    Uniform(i32),
    Sides {
        #[serde(default)]
        left: i32,
        #[serde(default)]
        top: i32,
        #[serde(default)]
        right: i32,
        #[serde(default)]
        bottom: i32,
    },
}

impl From<PaddingForm> for Padding {
    fn from(form: PaddingForm) -> Self {
        match form {
            PaddingForm::Uniform(all) => Padding::uniform(all),
            PaddingForm::Sides {
                left,
                top,
                right,
                bottom,
            } => Padding {
                left,
                top,
                right,
                bottom,
            },
        }
    }
}

/// Horizontal/vertical gap between table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Spacing {
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Button;
    use serde_json::json;

    #[test]
    fn kinds_follow_variants() {
        let control = LayoutNode::Control(ControlNode::new(Box::new(Button::default())));
        let row = LayoutNode::Row(RowNode::default());
        let table = LayoutNode::Table(TableNode::default());
        assert_eq!(control.kind(), NodeKind::Control);
        assert_eq!(row.kind(), NodeKind::Row);
        assert_eq!(table.kind(), NodeKind::Table);
        assert_eq!(table.kind().label(), "table");
    }

    #[test]
    fn padding_accepts_uniform_and_per_side_forms() {
        let uniform: Padding = serde_json::from_value(json!(8)).unwrap();
        assert_eq!(uniform, Padding::uniform(8));

        let sides: Padding = serde_json::from_value(json!({"left": 1, "top": 2})).unwrap();
        assert_eq!(
            sides,
            Padding {
                left: 1,
                top: 2,
                right: 0,
                bottom: 0
            }
        );
    }

    #[test]
    fn spacing_is_a_plain_pair() {
        let spacing: Spacing = serde_json::from_value(json!({"width": 4, "height": 6})).unwrap();
        assert_eq!(
            spacing,
            Spacing {
                width: 4,
                height: 6
            }
        );
    }
}
