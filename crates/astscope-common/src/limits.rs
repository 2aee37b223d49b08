//! Centralized limits and thresholds for the analyzer.
//!
//! This module provides shared constants for nesting depths and walk counts
//! used throughout the codebase. Keeping them in one place prevents
//! duplicate definitions with inconsistent values.
//!
//! # Categories
//!
//! - **Recursion Depths**: Limits to prevent stack overflow in recursive algorithms
//! - **Operation Counts**: Limits to prevent infinite loops in iterative algorithms
//! - **Capacity Limits**: Pre-allocation sizes

// =============================================================================
// Recursion Depth Limits (Ingestion / Walker / Emitter)
// =============================================================================

/// Maximum nesting depth of an ESTree document accepted by ingestion.
///
/// Every later pass (walker, hoisting, emitter) recurses over the tree, so
/// bounding the depth once at ingestion bounds all of them. The value keeps
/// the deepest recursive pass well inside a 2 MiB thread stack in debug
/// builds, and matches the nesting limit `serde_json` applies to text input.
/// Documents nested deeper are rejected with `AstError::NestingTooDeep`.
///
/// # JavaScript example
///
/// ```javascript
/// // Deeply nested blocks:
/// {{{{{{{{{{{{{{{{{{{{{{{{{
///   var x = 1; // 128 levels of nesting
/// }}}}}}}}}}}}}}}}}}}}}}}}}
///
/// // Deeply nested calls:
/// f(f(f(f(f(f(f(f(/* ... */))))))));
/// ```
pub const MAX_AST_DEPTH: u32 = 128;

/// Maximum depth for emitter recursion.
///
/// Equal to `MAX_AST_DEPTH`, so ingested trees always print in full. Trees
/// built directly in an arena may nest deeper; the printer writes
/// `/* ... */` instead of descending further.
pub const MAX_EMIT_RECURSION_DEPTH: u32 = MAX_AST_DEPTH;

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Maximum number of parent links followed when walking a scope chain.
///
/// Scope chains are acyclic by construction; the guard turns a corrupted
/// tree into a failed lookup instead of a hang.
///
/// ```javascript
/// function outer() {
///   function level1() {
///     function level2() {
///       return someVar; // walks up at most 10,000 scopes
///     }
///   }
/// }
/// ```
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum pre-allocation of node slots when ingesting a document.
///
/// Ingestion estimates the node count from the input size; the actual
/// allocation is `min(estimated_nodes, MAX_NODE_PREALLOC)`.
pub const MAX_NODE_PREALLOC: usize = 5_000_000;

/// Rough number of JSON bytes per ESTree node, used for pre-allocation.
pub const ESTREE_BYTES_PER_NODE: usize = 48;
