use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use matchgraph::export::{self, ExportFormat, ExportOptions};
use matchgraph::graph::{extract_rows, MatchGraph, RowPolicy};
use matchgraph::parser::{fixture, BracketSelectors};
use matchgraph::source::{InputFormat, Loader, Source};

#[derive(Parser)]
#[command(name = "matchgraph")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Extracts a per-game player win graph from bracket match-list tables", long_about = None)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the win graph from saved pages or row fixtures
    Extract(ExtractArgs),
    /// Validate a graph JSON file and print win/loss records
    Inspect {
        /// Graph JSON produced by `extract` ("-" for stdin)
        graph: String,

        /// Only show the N players with the most wins
        #[arg(short, long)]
        top: Option<usize>,
    },
}

#[derive(Args)]
struct ExtractArgs {
    /// Input files or directories ("-" for stdin)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// How to read the inputs: auto, html, json
    #[arg(short, long, default_value = "auto")]
    input_format: InputFormat,

    /// Output format: json, csv
    #[arg(short, long, default_value = "json")]
    format: ExportFormat,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on malformed rows or unreadable scores instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Also write the raw rows as a JSON fixture, for re-running without HTML
    #[arg(long, value_name = "FILE")]
    dump_rows: Option<PathBuf>,

    /// CSS selector for match-list tables
    #[arg(long, default_value_t = BracketSelectors::default().table)]
    table_selector: String,

    /// CSS selector for rows within a table
    #[arg(long, default_value_t = BracketSelectors::default().row)]
    row_selector: String,

    /// CSS selector for player-name cells within a row
    #[arg(long, default_value_t = BracketSelectors::default().name)]
    name_selector: String,

    /// CSS selector for score cells within a row
    #[arg(long, default_value_t = BracketSelectors::default().score)]
    score_selector: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Inspect { graph, top } => run_inspect(&graph, top),
    }
}

// Logs go to stderr; stdout is reserved for the graph payload.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let sources = args
        .inputs
        .iter()
        .map(|arg| Source::from_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let loader = Loader {
        format: args.input_format,
        selectors: BracketSelectors {
            table: args.table_selector,
            row: args.row_selector,
            name: args.name_selector,
            score: args.score_selector,
        },
    };
    let groups = loader.load_all(&sources)?;
    if groups.is_empty() {
        tracing::warn!("no match tables found");
    }
    if let Some(path) = &args.dump_rows {
        fixture::write_file(path, &groups)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote raw rows to {}", path.display());
    }

    let policy = if args.strict {
        RowPolicy::Strict
    } else {
        RowPolicy::Lenient
    };
    let extraction = extract_rows(&groups, policy)?;
    if extraction.has_warnings() {
        tracing::warn!(
            count = extraction.warnings.len(),
            "some rows were skipped or degraded"
        );
    }
    tracing::info!("{}", extraction.graph.summary());

    let options = ExportOptions {
        format: args.format,
        pretty: args.pretty,
    };
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(options, &extraction.graph, &mut writer)?;
            writer.flush()?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export::export(options, &extraction.graph, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn run_inspect(path: &str, top: Option<usize>) -> Result<()> {
    let graph = if path == "-" {
        MatchGraph::from_reader(io::stdin().lock())
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
        MatchGraph::from_reader(BufReader::new(file))
    }
    .with_context(|| format!("Invalid graph in {}", path))?;

    let mut records = graph.records();
    records.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses)));
    if let Some(n) = top {
        records.truncate(n);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", graph.summary())?;
    writeln!(out)?;
    writeln!(out, "{:>5}  {:<24} {:>6} {:>6} {:>7}", "id", "player", "wins", "losses", "win %")?;
    for record in &records {
        let rate = record
            .win_rate()
            .map_or_else(|| "-".to_string(), |r| format!("{:.1}", r * 100.0));
        writeln!(
            out,
            "{:>5}  {:<24} {:>6} {:>6} {:>7}",
            record.id, record.name, record.wins, record.losses, rate
        )?;
    }
    Ok(())
}
