//! Export functionality for extracted match graphs.
//!
//! This module provides exporters for writing a [`MatchGraph`] in the
//! formats downstream tools consume: JSON (the primary contract) and a CSV
//! edge list.

pub mod csv;
pub mod json;

use crate::graph::MatchGraph;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - `{"players": [...], "edges": [...]}`
    #[default]
    Json,
    /// CSV format - one row per edge, spreadsheet-friendly
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Output options shared by all exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Indent JSON output. Ignored by CSV.
    pub pretty: bool,
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the graph to the given writer.
    fn export<W: Write>(&self, graph: &MatchGraph, writer: &mut W) -> io::Result<()>;
}

/// Export a graph with the given options.
pub fn export<W: Write>(
    options: ExportOptions,
    graph: &MatchGraph,
    writer: &mut W,
) -> io::Result<()> {
    match options.format {
        ExportFormat::Json => json::JsonExporter {
            pretty: options.pretty,
        }
        .export(graph, writer),
        ExportFormat::Csv => csv::CsvExporter.export(graph, writer),
    }
}

/// Export a graph to a string.
pub fn export_to_string(options: ExportOptions, graph: &MatchGraph) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(options, graph, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
