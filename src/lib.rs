//! matchgraph - per-game player win graphs from bracket match lists
//!
//! This crate reads match-list tables from rendered bracket pages, merges
//! players whose names differ only in case, and emits one directed edge per
//! game won, ready for win/loss ranking tools.

pub mod export;
pub mod graph;
pub mod parser;
pub mod source;
