//! Graph module for player win relationships.
//!
//! This module provides [`extract`] and [`extract_rows`], which turn match
//! lines into a [`MatchGraph`]: a deduplicated player registry plus one
//! directed edge per game won.
//!
//! # Example
//!
//! ```rust
//! use matchgraph::graph::extract;
//! use matchgraph::parser::MatchLine;
//!
//! let graph = extract(&[vec![
//!     MatchLine::new("Alice", "Bob", 1, 0),
//!     MatchLine::new("bob", "Alice", 0, 2),
//! ]]);
//!
//! assert_eq!(graph.player_count(), 2);
//! assert_eq!(graph.edge_count(), 3);
//! ```

mod match_graph;

pub use match_graph::{
    extract, extract_rows, Edge, ExtractError, Extraction, GraphError, MatchGraph, Player,
    PlayerRecord, RowIssue, RowPolicy, RowWarning,
};
