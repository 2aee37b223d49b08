//! Source printer for ESTree nodes stored in a `NodeArena`.
//!
//! Output is compact single-line JavaScript: statements inside blocks are
//! separated by a space, top-level program statements by a newline.
//! Parentheses are inserted only where operator precedence requires them.
//!
//! ```ignore
//! let text = Printer::new(&arena).print(idx);
//! ```

mod expressions;
pub mod precedence;
mod printer;
mod statements;

pub use precedence::Precedence;
pub use printer::Printer;

use astscope_ast::{NodeArena, NodeIndex};

/// Render a single node.
pub fn print_node(arena: &NodeArena, idx: NodeIndex) -> String {
    Printer::new(arena).print(idx)
}
