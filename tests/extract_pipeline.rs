use std::fs;

use matchgraph::export::{export_to_string, ExportFormat, ExportOptions};
use matchgraph::graph::{extract_rows, Edge, ExtractError, Player, RowIssue, RowPolicy};
use matchgraph::parser::{bracket_html, BracketSelectors, ScoreError, Side};
use matchgraph::source::{InputFormat, Loader, Source};
use tempfile::TempDir;

fn row(a: &str, b: &str, sa: &str, sb: &str) -> String {
    format!(
        r#"<div class="brkts-matchlist-match">
             <div class="brkts-matchlist-cell brkts-matchlist-opponent"><span class="name">{a}</span></div>
             <div class="brkts-matchlist-cell brkts-matchlist-score"><div class="brkts-matchlist-cell-content">{sa}</div></div>
             <div class="brkts-matchlist-cell brkts-matchlist-score"><div class="brkts-matchlist-cell-content">{sb}</div></div>
             <div class="brkts-matchlist-cell brkts-matchlist-opponent"><span class="name">{b}</span></div>
           </div>"#
    )
}

fn page(tables: &[Vec<String>]) -> String {
    let body: String = tables
        .iter()
        .map(|rows| {
            format!(
                r#"<div class="brkts-matchlist"><div class="brkts-matchlist-title">Group</div>{}</div>"#,
                rows.concat()
            )
        })
        .collect();
    format!("<!DOCTYPE html><html><body>{}</body></html>", body)
}

fn extract_page(html: &str, policy: RowPolicy) -> Result<matchgraph::graph::Extraction, ExtractError> {
    let groups = bracket_html::parse_str(html, &BracketSelectors::default()).unwrap();
    extract_rows(&groups, policy)
}

#[test]
fn scenario_single_match() {
    let html = page(&[vec![row("Alice", "Bob", "2", "1")]]);
    let extraction = extract_page(&html, RowPolicy::Lenient).unwrap();

    assert_eq!(
        extraction.graph.players,
        vec![Player::new("Alice", 0), Player::new("Bob", 1)]
    );
    assert_eq!(
        extraction.graph.edges,
        vec![Edge::new(0, 1), Edge::new(0, 1), Edge::new(1, 0)]
    );
}

#[test]
fn scenario_case_insensitive_reuse_across_tables() {
    let html = page(&[
        vec![row("Alice", "Bob", "1", "0")],
        vec![row("bob", "Alice", "0", "2")],
    ]);
    let extraction = extract_page(&html, RowPolicy::Lenient).unwrap();

    assert_eq!(
        extraction.graph.players,
        vec![Player::new("Alice", 0), Player::new("Bob", 1)]
    );
    assert_eq!(extraction.graph.edges, vec![Edge::new(0, 1); 3]);
}

#[test]
fn scenario_lenient_scores() {
    let html = page(&[vec![row("Alice", "Bob", "2 (forfeit)", "&mdash;")]]);
    let extraction = extract_page(&html, RowPolicy::Lenient).unwrap();

    assert_eq!(extraction.graph.edges, vec![Edge::new(0, 1); 2]);
    assert_eq!(extraction.warnings.len(), 1);
    assert_eq!(
        extraction.warnings[0].issue,
        RowIssue::Score {
            side: Side::Second,
            error: ScoreError::NotANumber("—".to_string()),
        }
    );

    let strict = extract_page(&html, RowPolicy::Strict);
    assert!(matches!(strict, Err(ExtractError::Rejected(_))));
}

#[test]
fn page_without_tables_is_empty_graph() {
    let extraction = extract_page("<html><body>TBD</body></html>", RowPolicy::Strict).unwrap();
    let json = export_to_string(ExportOptions::default(), &extraction.graph).unwrap();
    assert_eq!(json.trim_end(), r#"{"players":[],"edges":[]}"#);
}

#[test]
fn directory_of_snapshots_to_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("01-groups.html"),
        page(&[vec![row("Serral", "Reynor", "2", "1")]]),
    )
    .unwrap();
    fs::write(
        dir.path().join("02-playoffs.json"),
        r#"[[{"names": ["reynor", "Clem"], "scores": ["3", "0"]}]]"#,
    )
    .unwrap();

    let source = Source::from_arg(dir.path().to_str().unwrap()).unwrap();
    let groups = Loader::new(InputFormat::Auto).load_all(&[source]).unwrap();
    let extraction = extract_rows(&groups, RowPolicy::Strict).unwrap();

    let json = export_to_string(ExportOptions::default(), &extraction.graph).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["players"][1]["name"], "Reynor");
    assert_eq!(parsed["players"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["edges"].as_array().unwrap().len(), 6);
    assert_eq!(parsed["edges"][5]["winner_id"], 1);
    assert_eq!(parsed["edges"][5]["loser_id"], 2);
}

#[test]
fn csv_output_names_each_game() {
    let html = page(&[vec![row("Alice", "Bob", "0", "1")]]);
    let extraction = extract_page(&html, RowPolicy::Lenient).unwrap();

    let csv = export_to_string(
        ExportOptions {
            format: ExportFormat::Csv,
            pretty: false,
        },
        &extraction.graph,
    )
    .unwrap();
    assert_eq!(csv, "winner_id,winner,loser_id,loser\n1,Bob,0,Alice\n");
}

#[test]
fn dumped_rows_reproduce_the_graph() {
    let dir = TempDir::new().unwrap();
    let html = page(&[
        vec![row("Alice", "Bob", "2", "1"), row("bob", "Carol", "W", "1")],
        vec![row("Carol", "alice", "3", "0")],
    ]);
    let groups = bracket_html::parse_str(&html, &BracketSelectors::default()).unwrap();

    let dump = dir.path().join("rows.json");
    matchgraph::parser::fixture::write_file(&dump, &groups).unwrap();
    let reloaded = Loader::new(InputFormat::Auto).load_file(&dump).unwrap();

    assert_eq!(reloaded, groups);
    let from_html = extract_rows(&groups, RowPolicy::Lenient).unwrap();
    let from_dump = extract_rows(&reloaded, RowPolicy::Lenient).unwrap();
    assert_eq!(from_dump.graph, from_html.graph);
    assert_eq!(from_dump.warnings, from_html.warnings);
}
