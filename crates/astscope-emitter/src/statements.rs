use crate::precedence::Precedence;
use crate::printer::Printer;
use astscope_ast::{NodeData, NodeIndex, NodeList};

impl<'a> Printer<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn emit_statement(&mut self, data: &'a NodeData) {
        match data {
            NodeData::Program { body } => self.emit_statement_list(body, "\n"),
            NodeData::BlockStatement { body } => {
                if body.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    self.emit_statement_list(body, " ");
                    self.write(" }");
                }
            }
            NodeData::ExpressionStatement { expression } => {
                if self.starts_ambiguously(*expression) {
                    self.write("(");
                    self.emit_expression(*expression, Precedence::Sequence);
                    self.write(")");
                } else {
                    self.emit_expression(*expression, Precedence::Sequence);
                }
                self.write(";");
            }
            NodeData::EmptyStatement => self.write(";"),
            NodeData::DebuggerStatement => self.write("debugger;"),
            NodeData::DirectiveStatement { directive } => {
                self.write_char('\'');
                self.write(directive);
                self.write("';");
            }
            NodeData::WithStatement { object, body } => {
                self.write("with (");
                self.emit_expression(*object, Precedence::Sequence);
                self.write(") ");
                self.emit(*body);
            }
            NodeData::ReturnStatement { argument } => {
                self.emit_keyword_argument("return", *argument);
            }
            NodeData::ThrowStatement { argument } => {
                self.emit_keyword_argument("throw", *argument);
            }
            NodeData::BreakStatement { label } => self.emit_keyword_argument("break", *label),
            NodeData::ContinueStatement { label } => {
                self.emit_keyword_argument("continue", *label);
            }
            NodeData::LabeledStatement { label, body } => {
                self.emit(*label);
                self.write(": ");
                self.emit(*body);
            }
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.write("if (");
                self.emit_expression(*test, Precedence::Sequence);
                self.write(") ");
                if alternate.is_some() && self.is_open_if(*consequent) {
                    // Brace the inner `if` so the `else` stays with this one.
                    self.write("{ ");
                    self.emit(*consequent);
                    self.write(" }");
                } else {
                    self.emit(*consequent);
                }
                if alternate.is_some() {
                    self.write(" else ");
                    self.emit(*alternate);
                }
            }
            NodeData::SwitchStatement {
                discriminant,
                cases,
            } => {
                self.write("switch (");
                self.emit_expression(*discriminant, Precedence::Sequence);
                self.write(") {");
                for case in cases.iter() {
                    self.write_char(' ');
                    self.emit(case);
                }
                self.write(" }");
            }
            NodeData::SwitchCase { test, consequent } => {
                if test.is_some() {
                    self.write("case ");
                    self.emit_expression(*test, Precedence::Sequence);
                    self.write(":");
                } else {
                    self.write("default:");
                }
                if !consequent.is_empty() {
                    self.write_char(' ');
                    self.emit_statement_list(consequent, " ");
                }
            }
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.write("try ");
                self.emit(*block);
                if handler.is_some() {
                    self.write_char(' ');
                    self.emit(*handler);
                }
                if finalizer.is_some() {
                    self.write(" finally ");
                    self.emit(*finalizer);
                }
            }
            NodeData::CatchClause { param, body } => {
                self.write("catch (");
                self.emit(*param);
                self.write(") ");
                self.emit(*body);
            }
            NodeData::WhileStatement { test, body } => {
                self.write("while (");
                self.emit_expression(*test, Precedence::Sequence);
                self.write(") ");
                self.emit(*body);
            }
            NodeData::DoWhileStatement { body, test } => {
                self.write("do ");
                self.emit(*body);
                self.write(" while (");
                self.emit_expression(*test, Precedence::Sequence);
                self.write(");");
            }
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                self.write("for (");
                self.emit_for_head(*init);
                self.write(";");
                if test.is_some() {
                    self.write_char(' ');
                    self.emit_expression(*test, Precedence::Sequence);
                }
                self.write(";");
                if update.is_some() {
                    self.write_char(' ');
                    self.emit_expression(*update, Precedence::Sequence);
                }
                self.write(") ");
                self.emit(*body);
            }
            NodeData::ForInStatement { left, right, body } => {
                self.write("for (");
                self.emit_for_head(*left);
                self.write(" in ");
                self.emit_expression(*right, Precedence::Sequence);
                self.write(") ");
                self.emit(*body);
            }
            NodeData::VariableDeclaration { .. } => {
                self.emit_variable_declaration(data);
                self.write(";");
            }
            NodeData::VariableDeclarator { id, init } => {
                self.emit(*id);
                if init.is_some() {
                    self.write(" = ");
                    self.emit_expression(*init, Precedence::Assignment);
                }
            }
            NodeData::FunctionDeclaration(func) => {
                self.write("function ");
                self.emit(func.id);
                self.emit_function_signature(&func.params, func.body);
            }
            _ => self.emit_expression_data(data),
        }
    }

    fn emit_statement_list(&mut self, statements: &NodeList, separator: &str) {
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.emit(stmt);
        }
    }

    fn emit_keyword_argument(&mut self, keyword: &str, argument: NodeIndex) {
        self.write(keyword);
        if argument.is_some() {
            self.write_char(' ');
            self.emit_expression(argument, Precedence::Sequence);
        }
        self.write(";");
    }

    /// `var a = 1, b` without the trailing semicolon.
    fn emit_variable_declaration(&mut self, data: &'a NodeData) {
        let NodeData::VariableDeclaration { declarations, kind } = data else {
            return;
        };
        self.write(kind.as_str());
        self.write_char(' ');
        for (i, declarator) in declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit(declarator);
        }
    }

    /// Initializer slot of `for (...;...;...)` or left side of `for-in`.
    fn emit_for_head(&mut self, idx: NodeIndex) {
        match self.arena.data(idx) {
            None => {}
            Some(data @ NodeData::VariableDeclaration { .. }) => {
                self.emit_variable_declaration(data);
            }
            Some(NodeData::BinaryExpression { operator, .. }) if operator == "in" => {
                self.write("(");
                self.emit_expression(idx, Precedence::Sequence);
                self.write(")");
            }
            Some(_) => self.emit_expression(idx, Precedence::Sequence),
        }
    }

    /// An `if` without `else`, possibly behind labels.
    fn is_open_if(&self, idx: NodeIndex) -> bool {
        match self.arena.data(idx) {
            Some(NodeData::IfStatement { alternate, .. }) => {
                alternate.is_none() || self.is_open_if(*alternate)
            }
            Some(NodeData::LabeledStatement { body, .. }) => self.is_open_if(*body),
            _ => false,
        }
    }

    /// Whether an expression statement would begin with `function` or `{`
    /// and be misread as a declaration or block.
    fn starts_ambiguously(&self, idx: NodeIndex) -> bool {
        let mut current = idx;
        loop {
            let Some(data) = self.arena.data(current) else {
                return false;
            };
            current = match data {
                NodeData::FunctionExpression(_) | NodeData::ObjectExpression { .. } => {
                    return true;
                }
                NodeData::CallExpression { callee, .. } => *callee,
                NodeData::MemberExpression { object, .. } => *object,
                NodeData::BinaryExpression { left, .. }
                | NodeData::LogicalExpression { left, .. }
                | NodeData::AssignmentExpression { left, .. } => *left,
                NodeData::ConditionalExpression { test, .. } => *test,
                NodeData::UpdateExpression {
                    prefix: false,
                    argument,
                    ..
                } => *argument,
                NodeData::SequenceExpression { expressions } => match expressions.first() {
                    Some(first) => first,
                    None => return false,
                },
                _ => return false,
            };
        }
    }
}
