//! Compact diagnostic view of a built tree.
//!
//! Used by tests for structural comparison and by the CLI for display. This
//! is not a write path: an outline names kinds and control types, it does
//! not reproduce a buildable document.

use serde_json::{Map, Value, json};

use crate::node::{ControlNode, LayoutNode, RowNode, TableNode};

pub fn outline(node: &LayoutNode) -> Value {
    match node {
        LayoutNode::Control(control) => control_outline(control),
        LayoutNode::Row(row) => row_outline(row),
        LayoutNode::Table(table) => table_outline(table),
    }
}

/// Outline of an optional build outcome; absent nodes render as `null`.
pub fn outline_opt(node: Option<&LayoutNode>) -> Value {
    node.map(outline).unwrap_or(Value::Null)
}

fn control_outline(node: &ControlNode) -> Value {
    let mut out = Map::new();
    out.insert("kind".to_owned(), json!("control"));
    out.insert("type".to_owned(), json!(node.type_name()));
    if let Some(xscale) = node.xscale {
        out.insert("xscale".to_owned(), json!(xscale));
    }
    if let Some(yscale) = node.yscale {
        out.insert("yscale".to_owned(), json!(yscale));
    }
    Value::Object(out)
}

fn row_outline(row: &RowNode) -> Value {
    json!({
        "kind": "row",
        "items": row.items.iter().map(control_outline).collect::<Vec<_>>(),
    })
}

fn table_outline(table: &TableNode) -> Value {
    let mut out = Map::new();
    out.insert("kind".to_owned(), json!("table"));
    out.insert(
        "rows".to_owned(),
        Value::Array(table.rows.iter().map(row_outline).collect()),
    );
    if let Some(padding) = table.padding {
        out.insert(
            "padding".to_owned(),
            json!({
                "left": padding.left,
                "top": padding.top,
                "right": padding.right,
                "bottom": padding.bottom,
            }),
        );
    }
    if let Some(spacing) = table.spacing {
        out.insert(
            "spacing".to_owned(),
            json!({"width": spacing.width, "height": spacing.height}),
        );
    }
    if let Some(xscale) = table.xscale {
        out.insert("xscale".to_owned(), json!(xscale));
    }
    if let Some(yscale) = table.yscale {
        out.insert("yscale".to_owned(), json!(yscale));
    }
    Value::Object(out)
}
