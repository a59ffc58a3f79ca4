//! JSON export implementation.
//!
//! Writes the graph as `{"players": [...], "edges": [...]}` followed by a
//! newline. Compact by default so the payload is a single line.

use super::Exporter;
use crate::graph::MatchGraph;
use std::io::{self, Write};

/// JSON exporter implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    /// Indent the output for reading.
    pub pretty: bool,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, graph: &MatchGraph, writer: &mut W) -> io::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(graph)
        } else {
            serde_json::to_string(graph)
        }
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
