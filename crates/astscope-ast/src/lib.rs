//! ESTree syntax tree model for the astscope analyzer.
//!
//! This crate provides the node-shape contract the analyzer consumes:
//! - `NodeArena` / `NodeIndex` - arena storage for ESTree nodes
//! - `NodeData` / `NodeKind` - the closed set of supported node kinds
//! - `estree` - lowering of ESTree JSON documents into the arena
//! - `walk` - depth-first enter/leave traversal with skip/break control

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::{
    Function, LiteralValue, Node, NodeData, NodeKind, PropertyKind, VariableKind,
};

pub mod node_arena;
pub use node_arena::NodeArena;

pub mod estree;
pub use estree::{AstError, from_json_str, from_value};

pub mod walk;
pub use walk::{Visitor, WalkControl, WalkOutcome, walk, walk_fn};
