//! Scope and binding analysis for ESTree ECMAScript syntax trees.
//!
//! The workspace crates are re-exported here together with a one-call
//! entry point for JSON input:
//!
//! ```no_run
//! let analysis = astscope::analyze_json(r#"{"type":"Program","body":[]}"#, Default::default())?;
//! assert_eq!(analysis.tree.scope_count(), 1);
//! # Ok::<(), astscope::Error>(())
//! ```

pub use astscope_ast as ast;
pub use astscope_binder as binder;
pub use astscope_common as common;
pub use astscope_emitter as emitter;

pub use astscope_ast::{AstError, NodeArena, NodeIndex, NodeKind};
pub use astscope_binder::{
    Analyzer, AnalyzerOptions, Assignment, LexicalScopeMode, Reference, Scope, ScopeError,
    ScopeKind, ScopeReport, ScopeTree, Variable, analyze,
};

/// Failure of `analyze_json`.
#[derive(Debug)]
pub enum Error {
    Ast(AstError),
    Scope(ScopeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Ast(err) => write!(f, "{err}"),
            Error::Scope(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Ast(err) => Some(err),
            Error::Scope(err) => Some(err),
        }
    }
}

impl From<AstError> for Error {
    fn from(err: AstError) -> Self {
        Error::Ast(err)
    }
}

impl From<ScopeError> for Error {
    fn from(err: ScopeError) -> Self {
        Error::Scope(err)
    }
}

/// An analyzed document: the lowered tree and its scopes.
#[derive(Debug)]
pub struct Analysis {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub tree: ScopeTree,
}

impl Analysis {
    pub fn report(&self) -> ScopeReport {
        ScopeReport::from_tree(&self.arena, &self.tree)
    }
}

/// Lower an ESTree JSON document and analyze it.
pub fn analyze_json(text: &str, options: AnalyzerOptions) -> Result<Analysis, Error> {
    let (arena, root) = astscope_ast::from_json_str(text)?;
    let tree = Analyzer::with_options(options).analyze(&arena, root)?;
    tracing::debug!(nodes = arena.len(), scopes = tree.scope_count(), "Analyzed JSON document");
    Ok(Analysis { arena, root, tree })
}
