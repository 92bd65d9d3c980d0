//! Tree builder: recursive materialization of layout nodes.
//!
//! The builder walks the document depth-first, asks the resolver for a
//! verdict at each fragment, populates wrapper objects through the delegate,
//! and applies singleton normalization (a lone control-bearing result under
//! row expectation becomes a one-item row). Kind checks are asymmetric on
//! purpose: table expectation never wraps, control expectation never
//! rejects.

use serde_json::Value;

use crate::controls::BoxedControl;
use crate::delegate;
use crate::doc;
use crate::error::{BuildError, StructureError};
use crate::node::{
    ControlNode, ExpectedKind, LayoutNode, NodeKind, Padding, RowNode, Spacing, TableNode,
};
use crate::registry::{ControlRegistry, WrapperKind, default_registry};
use crate::resolve::{Resolution, TagVerdict, resolve, resolve_tag};

/// Build against the default builtin registry. `Ok(None)` is the valid
/// absent outcome for a null fragment.
pub fn build(
    fragment: &Value,
    expected: ExpectedKind,
) -> Result<Option<LayoutNode>, BuildError> {
    LayoutBuilder::new(default_registry()).build(fragment, expected)
}

// Remaining keys of a table wrapper, populated via the delegate. `"rows"`
// and `"$type"` fall out as ignored unknowns.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TableAttrs {
    padding: Option<Padding>,
    spacing: Option<Spacing>,
    xscale: Option<bool>,
    yscale: Option<bool>,
}

// Remaining keys of a control wrapper.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ControlAttrs {
    xscale: Option<bool>,
    yscale: Option<bool>,
}

// Breadcrumb segment; rendered like the delegate's paths (`rows[2][0]`).
#[derive(Debug, Clone, Copy)]
enum Seg {
    Key(&'static str),
    Index(usize),
}

pub struct LayoutBuilder<'reg> {
    registry: &'reg ControlRegistry,
    path: Vec<Seg>,
}

impl<'reg> LayoutBuilder<'reg> {
    pub fn new(registry: &'reg ControlRegistry) -> Self {
        Self {
            registry,
            path: Vec::new(),
        }
    }

    /// Materialize a node of the expected kind from `fragment`.
    pub fn build(
        &mut self,
        fragment: &Value,
        expected: ExpectedKind,
    ) -> Result<Option<LayoutNode>, BuildError> {
        self.path.clear();
        log::debug!(
            "building {} from {}",
            expected,
            doc::shape_name(fragment)
        );
        match expected {
            ExpectedKind::Row => Ok(self.row_node(fragment)?.map(LayoutNode::Row)),
            ExpectedKind::Table => Ok(self.table_node(fragment)?.map(LayoutNode::Table)),
            ExpectedKind::Control => self.materialize(fragment, ExpectedKind::Control),
        }
    }

    // One resolution step plus recursion into children. Expectation checks
    // and normalization live in `row_node`/`table_node`; control
    // expectation returns whatever resolution produced.
    fn materialize(
        &mut self,
        fragment: &Value,
        expected: ExpectedKind,
    ) -> Result<Option<LayoutNode>, BuildError> {
        let path = self.path_string();
        let node = match resolve(self.registry, fragment, expected, &path)? {
            Resolution::Absent => return Ok(None),
            Resolution::RowOfItems(elements) => LayoutNode::Row(self.items_row(elements)?),
            Resolution::TableOfRows(elements) => LayoutNode::Table(TableNode {
                rows: self.element_rows(elements)?,
                ..TableNode::default()
            }),
            Resolution::Control { type_id, factory } => {
                log::debug!("`{path}`: populating \"{type_id}\"");
                LayoutNode::Control(ControlNode::new(
                    factory(fragment).map_err(|err| err.located_at(&path))?,
                ))
            }
            Resolution::Wrapper(WrapperKind::Table) => {
                LayoutNode::Table(self.table_wrapper(fragment)?)
            }
            Resolution::Wrapper(WrapperKind::Control) => {
                LayoutNode::Control(self.control_wrapper(fragment)?)
            }
        };
        Ok(Some(node))
    }

    // Row expectation: wrap a lone control-bearing result into a one-item
    // row; a table is not a control-bearing item and cannot be wrapped.
    fn row_node(&mut self, fragment: &Value) -> Result<Option<RowNode>, BuildError> {
        match self.materialize(fragment, ExpectedKind::Row)? {
            None => Ok(None),
            Some(LayoutNode::Row(row)) => Ok(Some(row)),
            Some(LayoutNode::Control(item)) => Ok(Some(RowNode { items: vec![item] })),
            Some(LayoutNode::Table(_)) => Err(StructureError::KindMismatch {
                path: self.path_string(),
                expected: ExpectedKind::Row,
                found: NodeKind::Table,
            }
            .into()),
        }
    }

    // Table expectation is never normalized.
    fn table_node(&mut self, fragment: &Value) -> Result<Option<TableNode>, BuildError> {
        match self.materialize(fragment, ExpectedKind::Table)? {
            None => Ok(None),
            Some(LayoutNode::Table(table)) => Ok(Some(table)),
            Some(other) => Err(StructureError::KindMismatch {
                path: self.path_string(),
                expected: ExpectedKind::Table,
                found: other.kind(),
            }
            .into()),
        }
    }

    // Items of a bare array under row expectation. Null elements contribute
    // nothing; anything that is not control-bearing violates row purity.
    fn items_row(&mut self, elements: &[Value]) -> Result<RowNode, BuildError> {
        let mut items = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            self.path.push(Seg::Index(index));
            match self.materialize(element, ExpectedKind::Control)? {
                None => {}
                Some(LayoutNode::Control(item)) => items.push(item),
                Some(other) => {
                    return Err(StructureError::ForbiddenRowItem {
                        path: self.path_string(),
                        found: other.kind(),
                    }
                    .into());
                }
            }
            self.path.pop();
        }
        Ok(RowNode { items })
    }

    // Rows of a table from array elements, each under row expectation.
    fn element_rows(&mut self, elements: &[Value]) -> Result<Vec<RowNode>, BuildError> {
        let mut rows = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            self.path.push(Seg::Index(index));
            if let Some(row) = self.row_node(element)? {
                rows.push(row);
            }
            self.path.pop();
        }
        Ok(rows)
    }

    fn table_wrapper(&mut self, fragment: &Value) -> Result<TableNode, BuildError> {
        let path = self.path_string();
        let attrs: TableAttrs = delegate::from_fragment("Table", fragment)
            .map_err(|err| err.located_at(&path))?;
        let rows = match fragment.get(doc::ROWS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(elements)) => {
                self.path.push(Seg::Key(doc::ROWS_KEY));
                let rows = self.element_rows(elements)?;
                self.path.pop();
                rows
            }
            Some(other) => {
                return Err(StructureError::NotAnArray {
                    path,
                    key: doc::ROWS_KEY,
                    found: doc::shape_name(other),
                }
                .into());
            }
        };
        Ok(TableNode {
            rows,
            padding: attrs.padding,
            spacing: attrs.spacing,
            xscale: attrs.xscale,
            yscale: attrs.yscale,
        })
    }

    fn control_wrapper(&mut self, fragment: &Value) -> Result<ControlNode, BuildError> {
        let path = self.path_string();
        let attrs: ControlAttrs = delegate::from_fragment("Control", fragment)
            .map_err(|err| err.located_at(&path))?;
        let control_value = match fragment.get(doc::CONTROL_KEY) {
            None | Some(Value::Null) => {
                return Err(StructureError::MissingControl { path }.into());
            }
            Some(value) => value,
        };
        self.path.push(Seg::Key(doc::CONTROL_KEY));
        let control = self.leaf_control(control_value)?;
        self.path.pop();
        Ok(ControlNode {
            control,
            xscale: attrs.xscale,
            yscale: attrs.yscale,
        })
    }

    // The control slot is strict: an object carrying a tag that names a
    // registered (non-structural) control type.
    fn leaf_control(
        &mut self,
        fragment: &Value,
    ) -> Result<BoxedControl, BuildError> {
        let path = self.path_string();
        let Some(object) = fragment.as_object() else {
            return Err(StructureError::NonObjectControl {
                path,
                found: doc::shape_name(fragment),
            }
            .into());
        };
        let Some(tag) = object.get(doc::TYPE_TAG_KEY) else {
            return Err(StructureError::UntaggedControl { path }.into());
        };
        match resolve_tag(self.registry, tag, &path)? {
            TagVerdict::Control { factory, .. } => {
                Ok(factory(fragment).map_err(|err| err.located_at(&path))?)
            }
            TagVerdict::Structural { type_id, .. } => Err(StructureError::StructuralControl {
                path,
                type_id: type_id.to_owned(),
            }
            .into()),
        }
    }

    fn path_string(&self) -> String {
        if self.path.is_empty() {
            return ".".to_owned();
        }
        let mut out = String::new();
        for seg in &self.path {
            match seg {
                Seg::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Seg::Index(index) => out.push_str(&format!("[{index}]")),
            }
        }
        out
    }
}
