use crate::precedence::Precedence;
use astscope_ast::{NodeArena, NodeData, NodeIndex, NodeList};
use astscope_common::limits::MAX_EMIT_RECURSION_DEPTH;
use tracing::warn;

/// Renders ESTree nodes back to JavaScript source text.
pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    output: String,
    depth: u32,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            output: String::new(),
            depth: 0,
        }
    }

    /// Render `idx` and return the text. A `NONE` index renders as empty.
    pub fn print(mut self, idx: NodeIndex) -> String {
        self.emit(idx);
        self.output
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Emit any node in its natural context.
    pub(crate) fn emit(&mut self, idx: NodeIndex) {
        self.emit_guarded(idx, |this, data| match data {
            NodeData::Program { .. }
            | NodeData::ExpressionStatement { .. }
            | NodeData::BlockStatement { .. }
            | NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::WithStatement { .. }
            | NodeData::ReturnStatement { .. }
            | NodeData::LabeledStatement { .. }
            | NodeData::BreakStatement { .. }
            | NodeData::ContinueStatement { .. }
            | NodeData::IfStatement { .. }
            | NodeData::SwitchStatement { .. }
            | NodeData::SwitchCase { .. }
            | NodeData::ThrowStatement { .. }
            | NodeData::TryStatement { .. }
            | NodeData::CatchClause { .. }
            | NodeData::WhileStatement { .. }
            | NodeData::DoWhileStatement { .. }
            | NodeData::ForStatement { .. }
            | NodeData::ForInStatement { .. }
            | NodeData::VariableDeclaration { .. }
            | NodeData::VariableDeclarator { .. }
            | NodeData::FunctionDeclaration(_)
            | NodeData::DirectiveStatement { .. } => this.emit_statement(data),
            NodeData::Property { .. } => this.emit_property(data),
            _ => this.emit_expression_data(data),
        });
    }

    /// Emit an expression, parenthesized when it binds looser than `min`.
    pub(crate) fn emit_expression(&mut self, idx: NodeIndex, min: Precedence) {
        self.emit_guarded(idx, |this, data| {
            if Precedence::of(data) < min {
                this.write("(");
                this.emit_expression_data(data);
                this.write(")");
            } else {
                this.emit_expression_data(data);
            }
        });
    }

    fn emit_guarded<F>(&mut self, idx: NodeIndex, f: F)
    where
        F: FnOnce(&mut Self, &'a NodeData),
    {
        let Some(data) = self.arena.data(idx) else {
            return;
        };
        if self.depth >= MAX_EMIT_RECURSION_DEPTH {
            warn!(node = idx.0, "Emitter recursion limit reached");
            self.write("/* ... */");
            return;
        }
        self.depth += 1;
        f(self, data);
        self.depth -= 1;
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    pub(crate) fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub(crate) fn write_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    /// Write `items` separated by `", "`, each at assignment precedence.
    /// `NONE` entries are array holes and print as nothing.
    pub(crate) fn write_comma_list(&mut self, items: &NodeList) {
        let len = items.len();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(",");
                if item.is_some() {
                    self.write_char(' ');
                }
            }
            self.emit_expression(item, Precedence::Assignment);
            if item.is_none() && i + 1 == len {
                self.write(",");
            }
        }
    }
}
