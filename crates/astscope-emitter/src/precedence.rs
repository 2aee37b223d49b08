//! Expression precedence levels, lowest binding first.

use astscope_ast::NodeData;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Sequence,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
    Call,
    New,
    Member,
    Primary,
}

impl Precedence {
    /// The next tighter level. Used for the right operand of
    /// left-associative binary operators.
    pub const fn tighter(self) -> Precedence {
        match self {
            Precedence::Sequence => Precedence::Assignment,
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix => Precedence::Call,
            Precedence::Call => Precedence::New,
            Precedence::New => Precedence::Member,
            Precedence::Member | Precedence::Primary => Precedence::Primary,
        }
    }

    /// Precedence of a binary or logical operator token.
    pub fn of_binary_operator(operator: &str) -> Precedence {
        match operator {
            "||" => Precedence::LogicalOr,
            "&&" => Precedence::LogicalAnd,
            "|" => Precedence::BitwiseOr,
            "^" => Precedence::BitwiseXor,
            "&" => Precedence::BitwiseAnd,
            "==" | "!=" | "===" | "!==" => Precedence::Equality,
            "<" | ">" | "<=" | ">=" | "in" | "instanceof" => Precedence::Relational,
            "<<" | ">>" | ">>>" => Precedence::Shift,
            "+" | "-" => Precedence::Additive,
            "*" | "/" | "%" => Precedence::Multiplicative,
            _ => Precedence::Sequence,
        }
    }

    /// Precedence of an expression node. Statements and other
    /// non-expression nodes report `Primary`, so they are never wrapped.
    pub fn of(data: &NodeData) -> Precedence {
        match data {
            NodeData::SequenceExpression { .. } => Precedence::Sequence,
            NodeData::AssignmentExpression { .. } => Precedence::Assignment,
            NodeData::ConditionalExpression { .. } => Precedence::Conditional,
            NodeData::BinaryExpression { operator, .. }
            | NodeData::LogicalExpression { operator, .. } => {
                Precedence::of_binary_operator(operator)
            }
            NodeData::UnaryExpression { .. } => Precedence::Unary,
            NodeData::UpdateExpression { prefix: true, .. } => Precedence::Unary,
            NodeData::UpdateExpression { prefix: false, .. } => Precedence::Postfix,
            NodeData::CallExpression { .. } => Precedence::Call,
            NodeData::NewExpression { .. } => Precedence::New,
            NodeData::MemberExpression { .. } => Precedence::Member,
            _ => Precedence::Primary,
        }
    }
}
