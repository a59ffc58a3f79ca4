//! HTML adapter for bracket match-list tables.
//!
//! This module locates match-list tables in a rendered document and reads
//! each row's name and score cells as plain text. It knows nothing about
//! players or edges; that is the job of [`crate::graph`].

use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::types::{ParseError, ParseResult, RawMatchGroup, RawMatchRow};

/// CSS selectors used to find tables, rows and cells.
///
/// The defaults match the Liquipedia match-list markup. Row selectors are
/// evaluated within a table, cell selectors within a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSelectors {
    /// Selects each match-list table (one match group per table).
    pub table: String,
    /// Selects each match row inside a table.
    pub row: String,
    /// Selects the player-name cells inside a row.
    pub name: String,
    /// Selects the score cells inside a row.
    pub score: String,
}

impl Default for BracketSelectors {
    fn default() -> Self {
        Self {
            table: ".brkts-matchlist".to_string(),
            row: ".brkts-matchlist-match".to_string(),
            name: ".brkts-matchlist-cell .name".to_string(),
            score: ".brkts-matchlist-score .brkts-matchlist-cell-content".to_string(),
        }
    }
}

/// Compiled form of [`BracketSelectors`].
struct Compiled {
    table: Selector,
    row: Selector,
    name: Selector,
    score: Selector,
}

impl BracketSelectors {
    fn compile(&self) -> ParseResult<Compiled> {
        Ok(Compiled {
            table: compile_selector(&self.table)?,
            row: compile_selector(&self.row)?,
            name: compile_selector(&self.name)?,
            score: compile_selector(&self.score)?,
        })
    }
}

fn compile_selector(selector: &str) -> ParseResult<Selector> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Parses an HTML file into raw match groups.
///
/// ```ignore
/// use std::path::Path;
/// use matchgraph::parser::bracket_html::{parse_file, BracketSelectors};
///
/// let groups = parse_file(Path::new("snapshot.html"), &BracketSelectors::default())?;
/// println!("Found {} match tables", groups.len());
/// ```
pub fn parse_file(path: &Path, selectors: &BracketSelectors) -> ParseResult<Vec<RawMatchGroup>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content, selectors)
}

/// Parses an HTML document into raw match groups.
///
/// Every table matched by `selectors.table` becomes one group, in document
/// order, even when it holds no rows. A document without tables yields an
/// empty vector.
///
/// # Example
///
/// ```
/// use matchgraph::parser::bracket_html::{parse_str, BracketSelectors};
///
/// let html = r#"
/// <div class="brkts-matchlist">
///   <div class="brkts-matchlist-match">
///     <div class="brkts-matchlist-cell"><span class="name">Alice</span></div>
///     <div class="brkts-matchlist-score"><div class="brkts-matchlist-cell-content">2</div></div>
///     <div class="brkts-matchlist-score"><div class="brkts-matchlist-cell-content">1</div></div>
///     <div class="brkts-matchlist-cell"><span class="name">Bob</span></div>
///   </div>
/// </div>"#;
///
/// let groups = parse_str(html, &BracketSelectors::default()).unwrap();
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0][0].names, vec!["Alice", "Bob"]);
/// assert_eq!(groups[0][0].scores, vec!["2", "1"]);
/// ```
pub fn parse_str(html: &str, selectors: &BracketSelectors) -> ParseResult<Vec<RawMatchGroup>> {
    let compiled = selectors.compile()?;
    let document = Html::parse_document(html);

    let groups: Vec<RawMatchGroup> = document
        .select(&compiled.table)
        .map(|table| {
            table
                .select(&compiled.row)
                .map(|row| RawMatchRow {
                    names: cell_texts(row, &compiled.name),
                    scores: cell_texts(row, &compiled.score),
                })
                .collect()
        })
        .collect();

    tracing::debug!(
        tables = groups.len(),
        rows = groups.iter().map(Vec::len).sum::<usize>(),
        "parsed match-list document"
    );
    Ok(groups)
}

fn cell_texts(row: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    row.select(selector).map(element_text).collect()
}

/// Decoded text content of an element, whitespace collapsed and trimmed.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_html(a: &str, b: &str, sa: &str, sb: &str) -> String {
        format!(
            r#"<div class="brkts-matchlist-match">
                 <div class="brkts-matchlist-cell"><span class="name">{a}</span></div>
                 <div class="brkts-matchlist-score"><div class="brkts-matchlist-cell-content">{sa}</div></div>
                 <div class="brkts-matchlist-score"><div class="brkts-matchlist-cell-content">{sb}</div></div>
                 <div class="brkts-matchlist-cell"><span class="name">{b}</span></div>
               </div>"#
        )
    }

    fn table_html(rows: &[String]) -> String {
        format!(r#"<div class="brkts-matchlist">{}</div>"#, rows.concat())
    }

    fn parse_default(html: &str) -> Vec<RawMatchGroup> {
        parse_str(html, &BracketSelectors::default()).unwrap()
    }

    #[test]
    fn test_parse_single_row() {
        let html = table_html(&[row_html("Alice", "Bob", "2", "1")]);
        let groups = parse_default(&html);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![RawMatchRow::new(["Alice", "Bob"], ["2", "1"])]);
    }

    #[test]
    fn test_parse_multiple_tables_in_order() {
        let html = format!(
            "<html><body>{}<p>between</p>{}</body></html>",
            table_html(&[
                row_html("A", "B", "1", "0"),
                row_html("C", "D", "0", "1"),
            ]),
            table_html(&[row_html("E", "F", "2", "2")]),
        );
        let groups = parse_default(&html);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][1].names, vec!["C", "D"]);
        assert_eq!(groups[1][0].names, vec!["E", "F"]);
    }

    #[test]
    fn test_parse_no_tables() {
        let groups = parse_default("<html><body><p>No brackets here</p></body></html>");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_parse_empty_table_is_kept() {
        let groups = parse_default(r#"<div class="brkts-matchlist"></div>"#);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_empty());
    }

    #[test]
    fn test_text_is_decoded_and_trimmed() {
        let html = table_html(&[row_html(
            "  <b>Tom</b> &amp;\n Jerry ",
            "Bob",
            " 2 (forfeit) ",
            "&mdash;",
        )]);
        let groups = parse_default(&html);
        let row = &groups[0][0];

        assert_eq!(row.names, vec!["Tom & Jerry", "Bob"]);
        assert_eq!(row.scores, vec!["2 (forfeit)", "—"]);
    }

    #[test]
    fn test_missing_cells_are_reported_as_found() {
        let html = r#"
            <div class="brkts-matchlist">
              <div class="brkts-matchlist-match">
                <div class="brkts-matchlist-cell"><span class="name">Solo</span></div>
                <div class="brkts-matchlist-score"><div class="brkts-matchlist-cell-content">1</div></div>
              </div>
            </div>"#;
        let groups = parse_default(html);

        assert_eq!(groups[0][0].names, vec!["Solo"]);
        assert_eq!(groups[0][0].scores, vec!["1"]);
        assert!(!groups[0][0].is_well_formed());
    }

    #[test]
    fn test_custom_selectors() {
        let html = r#"
            <table class="results">
              <tr class="game"><td class="p">X</td><td class="s">3</td><td class="s">1</td><td class="p">Y</td></tr>
            </table>"#;
        let selectors = BracketSelectors {
            table: "table.results".to_string(),
            row: "tr.game".to_string(),
            name: "td.p".to_string(),
            score: "td.s".to_string(),
        };
        let groups = parse_str(html, &selectors).unwrap();

        assert_eq!(groups, vec![vec![RawMatchRow::new(["X", "Y"], ["3", "1"])]]);
    }

    #[test]
    fn test_invalid_selector() {
        let selectors = BracketSelectors {
            table: "[[[".to_string(),
            ..BracketSelectors::default()
        };
        let result = parse_str("<div></div>", &selectors);

        assert!(matches!(
            result,
            Err(ParseError::Selector { ref selector, .. }) if selector == "[[["
        ));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(
            Path::new("/nonexistent/bracket.html"),
            &BracketSelectors::default(),
        );
        assert!(matches!(result, Err(ParseError::IoError(_))));
    }
}
