//! Lenient score-cell parsing.
//!
//! Score cells are read with leading-integer semantics: leading whitespace
//! is skipped, an optional sign is accepted, and digits are consumed up to
//! the first non-digit. Anything after that is ignored, so `"2 (forfeit)"`
//! reads as 2.

use thiserror::Error;

/// Largest win count accepted from a single score cell.
///
/// Each win becomes one edge, so a stray date or typo in a score cell
/// (`20240101`) would otherwise request millions of edges.
pub const MAX_WINS_PER_MATCH: u32 = 1000;

/// Why a score cell could not be read as a win count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The cell does not start with a number.
    #[error("no numeric prefix in {0:?}")]
    NotANumber(String),

    /// The cell starts with a negative number.
    #[error("negative score {0:?}")]
    Negative(String),

    /// The numeric prefix exceeds [`MAX_WINS_PER_MATCH`].
    #[error("score {0:?} is too large")]
    Overflow(String),
}

/// Reads the leading integer of `text`, if there is one.
///
/// Returns `None` when no digit follows the optional sign. Values beyond
/// the range of `i64` saturate.
///
/// ```
/// use matchgraph::parser::score::leading_int;
///
/// assert_eq!(leading_int(" 12abc"), Some(12));
/// assert_eq!(leading_int("-3"), Some(-3));
/// assert_eq!(leading_int("—"), None);
/// ```
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses a score cell into a win count.
///
/// Counts above [`MAX_WINS_PER_MATCH`] are rejected with
/// [`ScoreError::Overflow`].
///
/// # Example
///
/// ```
/// use matchgraph::parser::score::{parse_wins, ScoreError};
///
/// assert_eq!(parse_wins("2 (forfeit)"), Ok(2));
/// assert!(matches!(parse_wins("W"), Err(ScoreError::NotANumber(_))));
/// ```
pub fn parse_wins(text: &str) -> Result<u32, ScoreError> {
    let value = leading_int(text).ok_or_else(|| ScoreError::NotANumber(text.to_string()))?;
    if value < 0 {
        return Err(ScoreError::Negative(text.to_string()));
    }
    u32::try_from(value)
        .ok()
        .filter(|&wins| wins <= MAX_WINS_PER_MATCH)
        .ok_or_else(|| ScoreError::Overflow(text.to_string()))
}
