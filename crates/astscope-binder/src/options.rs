//! Analyzer configuration.

use serde::{Deserialize, Serialize};

/// How `catch` clauses and `with` statements are scoped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LexicalScopeMode {
    /// Each catch clause and `with` statement gets its own child scope; the
    /// catch parameter is bound there.
    #[default]
    Separate,
    /// No scopes for catch clauses or `with`; catch parameters are declared
    /// in the nearest function or program scope.
    Fold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnalyzerOptions {
    pub lexical_scopes: LexicalScopeMode,
}

impl AnalyzerOptions {
    pub fn with_lexical_scopes(mut self, mode: LexicalScopeMode) -> Self {
        self.lexical_scopes = mode;
        self
    }
}
