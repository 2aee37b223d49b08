//! Scope and binding analysis for ESTree syntax trees.
//!
//! `analyze` walks a tree once and produces a `ScopeTree`: the lexical scope
//! hierarchy, every named binding (`Variable`) with its declarations, every
//! write (`Assignment`) and every resolved use (`Reference`). Names that are
//! never declared resolve to unscoped variables held by the root scope.
//!
//! Binding follows the legacy ECMAScript model: `var` and function
//! declarations are hoisted to the nearest function or program scope, and
//! `this`/`arguments` bind per function.

pub mod analyzer;
pub use analyzer::{Analyzer, analyze};

pub mod assignment;
pub use assignment::Assignment;

pub mod error;
pub use error::{Construct, ScopeError};

pub mod ids;
pub use ids::{AssignmentId, ReferenceId, ScopeId, VariableId};

pub mod options;
pub use options::{AnalyzerOptions, LexicalScopeMode};

pub mod reference;
pub use reference::Reference;

pub mod report;
pub use report::{ScopeReport, VariableReport};

pub mod scope;
pub use scope::{Scope, ScopeKind, ScopeTree};

pub mod variable;
pub use variable::{Binding, Variable};
