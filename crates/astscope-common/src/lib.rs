//! Common types and utilities for the astscope analyzer.
//!
//! This crate provides foundational types used across all astscope crates:
//! - Source spans (`Span`) carried over from ESTree `range` fields
//! - Analyzer limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;
