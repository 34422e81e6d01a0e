//! Language-specific tree-sitter configurations.
//!
//! Each language module provides:
//! - Candidate comment node kinds for its grammar
//! - Factory function for creating comment sources

pub mod kotlin;
