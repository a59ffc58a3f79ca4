//! JSON fixtures of raw match rows.
//!
//! A fixture is an array of groups, each an array of rows:
//!
//! ```json
//! [[{"names": ["Alice", "Bob"], "scores": ["2", "1"]}]]
//! ```
//!
//! Cells hold the same raw text the HTML adapter would produce, so fixtures
//! go through the same row checks as scraped documents.

use std::fs;
use std::io::Read;
use std::path::Path;

use super::types::{ParseResult, RawMatchGroup};

/// Parses a fixture file.
pub fn parse_file(path: &Path) -> ParseResult<Vec<RawMatchGroup>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a fixture from a string.
///
/// # Example
///
/// ```
/// use matchgraph::parser::fixture::parse_str;
///
/// let groups = parse_str(r#"[[{"names": ["Alice", "Bob"], "scores": ["2", "1"]}]]"#).unwrap();
/// assert_eq!(groups[0][0].names, vec!["Alice", "Bob"]);
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<RawMatchGroup>> {
    let groups: Vec<RawMatchGroup> = serde_json::from_str(content)?;
    Ok(groups)
}

/// Parses a fixture from any reader.
pub fn parse_reader<R: Read>(reader: R) -> ParseResult<Vec<RawMatchGroup>> {
    let groups: Vec<RawMatchGroup> = serde_json::from_reader(reader)?;
    Ok(groups)
}

/// Serializes raw groups back into fixture form.
pub fn to_string(groups: &[RawMatchGroup]) -> ParseResult<String> {
    Ok(serde_json::to_string_pretty(groups)?)
}

/// Writes raw groups to a fixture file.
///
/// Snapshots a scraped page so later runs can read the rows without HTML.
pub fn write_file(path: &Path, groups: &[RawMatchGroup]) -> ParseResult<()> {
    fs::write(path, to_string(groups)?)?;
    Ok(())
}
