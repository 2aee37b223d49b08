use crate::precedence::Precedence;
use crate::printer::Printer;
use astscope_ast::{LiteralValue, NodeData, NodeIndex, NodeList, PropertyKind};

impl<'a> Printer<'a> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub(crate) fn emit_expression_data(&mut self, data: &'a NodeData) {
        match data {
            NodeData::Identifier { name } => self.write(name),
            NodeData::ThisExpression => self.write("this"),
            NodeData::Literal { value, raw } => match raw {
                Some(raw) => self.write(raw),
                None => self.emit_literal_value(value),
            },
            NodeData::ArrayExpression { elements } => {
                self.write("[");
                self.write_comma_list(elements);
                self.write("]");
            }
            NodeData::ObjectExpression { properties } => {
                if properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit(property);
                }
                self.write(" }");
            }
            NodeData::FunctionExpression(func) => {
                self.write("function ");
                self.emit(func.id);
                self.emit_function_signature(&func.params, func.body);
            }
            NodeData::SequenceExpression { expressions } => {
                for (i, expr) in expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(expr, Precedence::Assignment);
                }
            }
            NodeData::UnaryExpression {
                operator, argument, ..
            } => {
                self.write(operator);
                if operator.chars().all(|c| c.is_ascii_alphabetic())
                    || self.starts_with_sign(*argument, operator)
                {
                    self.write_char(' ');
                }
                self.emit_expression(*argument, Precedence::Unary);
            }
            NodeData::UpdateExpression {
                operator,
                prefix,
                argument,
            } => {
                if *prefix {
                    self.write(operator);
                    self.emit_expression(*argument, Precedence::Unary);
                } else {
                    self.emit_expression(*argument, Precedence::Call);
                    self.write(operator);
                }
            }
            NodeData::BinaryExpression {
                operator,
                left,
                right,
            }
            | NodeData::LogicalExpression {
                operator,
                left,
                right,
            } => {
                let prec = Precedence::of_binary_operator(operator);
                self.emit_expression(*left, prec);
                self.write_char(' ');
                self.write(operator);
                self.write_char(' ');
                self.emit_expression(*right, prec.tighter());
            }
            NodeData::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.emit_expression(*left, Precedence::Call);
                self.write_char(' ');
                self.write(operator);
                self.write_char(' ');
                self.emit_expression(*right, Precedence::Assignment);
            }
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.emit_expression(*test, Precedence::LogicalOr);
                self.write(" ? ");
                self.emit_expression(*consequent, Precedence::Assignment);
                self.write(" : ");
                self.emit_expression(*alternate, Precedence::Assignment);
            }
            NodeData::CallExpression { callee, arguments } => {
                self.emit_expression(*callee, Precedence::Call);
                self.write("(");
                self.write_comma_list(arguments);
                self.write(")");
            }
            NodeData::NewExpression { callee, arguments } => {
                self.write("new ");
                if self.has_unparenthesized_call(*callee) {
                    self.write("(");
                    self.emit_expression(*callee, Precedence::Sequence);
                    self.write(")");
                } else {
                    self.emit_expression(*callee, Precedence::New);
                }
                self.write("(");
                self.write_comma_list(arguments);
                self.write(")");
            }
            NodeData::MemberExpression {
                object,
                property,
                computed,
            } => {
                let numeric_object = matches!(
                    self.arena.data(*object),
                    Some(NodeData::Literal {
                        value: LiteralValue::Number(_),
                        ..
                    })
                );
                if numeric_object && !computed {
                    self.write("(");
                    self.emit_expression(*object, Precedence::Sequence);
                    self.write(")");
                } else {
                    self.emit_expression(*object, Precedence::Call);
                }
                if *computed {
                    self.write("[");
                    self.emit_expression(*property, Precedence::Sequence);
                    self.write("]");
                } else {
                    self.write(".");
                    self.emit(*property);
                }
            }
            NodeData::Property { .. } => self.emit_property(data),
            _ => self.emit_statement(data),
        }
    }

    pub(crate) fn emit_property(&mut self, data: &'a NodeData) {
        let NodeData::Property { key, value, kind } = data else {
            return;
        };
        let accessor = match kind {
            PropertyKind::Init => None,
            PropertyKind::Get => Some("get "),
            PropertyKind::Set => Some("set "),
        };
        let function = self.arena.data(*value).and_then(NodeData::as_function);

        match (accessor, function) {
            (Some(prefix), Some(func)) => {
                self.write(prefix);
                self.emit(*key);
                self.emit_function_signature(&func.params, func.body);
            }
            _ => {
                self.emit(*key);
                self.write(": ");
                self.emit_expression(*value, Precedence::Assignment);
            }
        }
    }

    /// `(params) body`, shared by declarations, expressions and accessors.
    pub(crate) fn emit_function_signature(
        &mut self,
        params: &'a NodeList,
        body: NodeIndex,
    ) {
        self.write("(");
        self.write_comma_list(params);
        self.write(") ");
        self.emit(body);
    }

    fn emit_literal_value(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::Null => self.write("null"),
            LiteralValue::Boolean(true) => self.write("true"),
            LiteralValue::Boolean(false) => self.write("false"),
            LiteralValue::Number(n) => {
                let text = format_number(*n);
                self.write(&text);
            }
            LiteralValue::String(s) => {
                let text = quote_string(s);
                self.write(&text);
            }
            LiteralValue::RegExp { pattern, flags } => {
                self.write_char('/');
                self.write(pattern);
                self.write_char('/');
                self.write(flags);
            }
        }
    }

    /// `- -x` and `+ +x` must not fuse into `--x` / `++x`.
    fn starts_with_sign(&self, argument: NodeIndex, operator: &str) -> bool {
        if operator != "-" && operator != "+" {
            return false;
        }
        match self.arena.data(argument) {
            Some(
                NodeData::UnaryExpression { operator: inner, .. }
                | NodeData::UpdateExpression {
                    operator: inner,
                    prefix: true,
                    ..
                },
            ) => inner.starts_with(operator),
            _ => false,
        }
    }

    /// Whether a `new` callee contains a call on its member-access spine,
    /// which would otherwise be taken as the `new` argument list.
    fn has_unparenthesized_call(&self, callee: NodeIndex) -> bool {
        let mut current = callee;
        loop {
            match self.arena.data(current) {
                Some(NodeData::CallExpression { .. }) => return true,
                Some(NodeData::MemberExpression { object, .. }) => current = *object,
                _ => return false,
            }
        }
    }
}

/// Shortest decimal text for a numeric literal value.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        format!("{n}")
    }
}

/// Single-quoted JavaScript string literal.
pub(crate) fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("it's"), "'it\\'s'");
        assert_eq!(quote_string("a\nb\\"), "'a\\nb\\\\'");
        assert_eq!(quote_string("\u{1}"), "'\\x01'");
    }
}
