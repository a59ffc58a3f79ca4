//! Shared types for match-list parsing.
//!
//! This module defines the raw rows produced by the input adapters and the
//! normalized match lines consumed by the graph extractor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while reading match rows from a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse a JSON fixture.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A CSS selector could not be compiled.
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// One head-to-head entry between two named players.
///
/// This is the normalized form the extractor works on. Win counts are
/// already parsed; see [`RawMatchRow`] for the unparsed form.
///
/// # Example
///
/// ```
/// use matchgraph::parser::MatchLine;
///
/// let line = MatchLine::new("Alice", "Bob", 2, 1);
/// assert_eq!(line.total_games(), 3);
/// assert_eq!(line.to_string(), "Alice 2-1 Bob");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    /// Name of the first (left) player, as written in the source.
    pub name_a: String,

    /// Name of the second (right) player, as written in the source.
    pub name_b: String,

    /// Games won by the first player.
    pub wins_a: u32,

    /// Games won by the second player.
    pub wins_b: u32,
}

impl MatchLine {
    /// Creates a new MatchLine instance.
    pub fn new(
        name_a: impl Into<String>,
        name_b: impl Into<String>,
        wins_a: u32,
        wins_b: u32,
    ) -> Self {
        Self {
            name_a: name_a.into(),
            name_b: name_b.into(),
            wins_a,
            wins_b,
        }
    }

    /// Returns the number of individual games recorded on this line.
    pub fn total_games(&self) -> u64 {
        u64::from(self.wins_a) + u64::from(self.wins_b)
    }
}

impl fmt::Display for MatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.name_a, self.wins_a, self.wins_b, self.name_b
        )
    }
}

/// A table or bracket section grouping one or more match lines.
pub type MatchGroup = Vec<MatchLine>;

/// A match row as found in the source document, before any validation.
///
/// Adapters fill `names` and `scores` with every matching cell they find,
/// so a well-formed row has exactly two of each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatchRow {
    /// Text of each player-name cell, in document order.
    #[serde(default)]
    pub names: Vec<String>,

    /// Text of each score cell, in document order.
    #[serde(default)]
    pub scores: Vec<String>,
}

impl RawMatchRow {
    /// Creates a row from any iterables of cell texts.
    pub fn new<N, S>(names: N, scores: S) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            scores: scores.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the row has exactly two name cells and two score cells.
    pub fn is_well_formed(&self) -> bool {
        self.names.len() == 2 && self.scores.len() == 2
    }
}

/// A table or bracket section of raw rows.
pub type RawMatchGroup = Vec<RawMatchRow>;

/// Which side of a match line a score cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The first (left) player.
    First,
    /// The second (right) player.
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}
