//! CSV export implementation.
//!
//! Exports the edge list in CSV format, one row per game, with player names
//! alongside ids for spreadsheet use.

use super::Exporter;
use crate::graph::MatchGraph;
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or line breaks.
    fn escape_field(value: &str) -> String {
        if value.contains(&[',', '"', '\n', '\r'][..]) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, graph: &MatchGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "winner_id,winner,loser_id,loser")?;

        let name = |id: usize| graph.players.get(id).map_or("", |p| p.name.as_str());

        for edge in &graph.edges {
            writeln!(
                writer,
                "{},{},{},{}",
                edge.winner_id,
                Self::escape_field(name(edge.winner_id)),
                edge.loser_id,
                Self::escape_field(name(edge.loser_id)),
            )?;
        }

        Ok(())
    }
}
