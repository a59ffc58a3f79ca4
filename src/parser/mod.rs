//! Parser module for matchgraph.
//!
//! This module turns source documents into raw match rows. The graph
//! extractor never touches HTML; it only sees [`RawMatchRow`] and
//! [`MatchLine`] values produced here.
//!
//! # Supported Inputs
//!
//! - **HTML** match-list tables, located with configurable CSS selectors
//! - **JSON** fixtures holding the same raw rows
//!
//! # Example
//!
//! ```
//! use matchgraph::parser::{bracket_html, BracketSelectors};
//!
//! let html = r#"<div class="brkts-matchlist"></div>"#;
//! let groups = bracket_html::parse_str(html, &BracketSelectors::default()).unwrap();
//!
//! println!("Found {} match tables", groups.len());
//! ```

pub mod bracket_html;
pub mod fixture;
pub mod score;
pub mod types;

// Re-export commonly used types for convenience
pub use bracket_html::BracketSelectors;
pub use score::{leading_int, parse_wins, ScoreError, MAX_WINS_PER_MATCH};
pub use types::{
    MatchGroup, MatchLine, ParseError, ParseResult, RawMatchGroup, RawMatchRow, Side,
};
