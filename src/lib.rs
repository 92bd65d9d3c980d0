//! Document-driven layout construction.
//!
//! `dynlayout` builds an in-memory layout tree (controls, rows, tables) from
//! a JSON document whose structure is under-specified: arrays mean "row" or
//! "table" depending on the caller's expectation, objects may carry an
//! explicit `"$type"` tag or be inferred from reserved keys, and lone items
//! are normalized into one-item rows when a row was expected.
//!
//! Design goals:
//! - Deterministic: same document + expectation → structurally identical tree.
//! - Fail-fast: the first problem aborts the build; no partial trees escape.
//! - Closed: only registered control types can be produced; no reflection.

pub mod build;
pub mod cli;
pub mod controls;
pub mod delegate;
pub mod doc;
pub mod error;
pub mod node;
pub mod outline;
pub mod registry;
pub mod resolve;

pub use build::{LayoutBuilder, build};
pub use controls::{BoxedControl, Control, ControlType};
pub use delegate::DelegateError;
pub use error::{BuildError, RegistryError, StructureError, TypeResolutionError};
pub use node::{
    ControlNode, ExpectedKind, LayoutNode, NodeKind, Padding, RowNode, Spacing, TableNode,
};
pub use outline::{outline, outline_opt};
pub use registry::{ControlRegistry, default_registry};
