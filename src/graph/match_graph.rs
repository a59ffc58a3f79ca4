//! Player win graph extraction.
//!
//! Builds a directed multigraph from match lines: one node per distinct
//! player (case-insensitive), one edge per individual game won, pointing
//! from winner to loser.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::score::{parse_wins, ScoreError};
use crate::parser::types::{MatchGroup, MatchLine, RawMatchGroup, RawMatchRow, Side};

/// A distinct player discovered during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Name as first encountered; later casings are ignored.
    pub name: String,
    /// Zero-based position in first-seen order.
    pub id: usize,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: impl Into<String>, id: usize) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    /// Key used to decide whether two names denote the same player.
    pub fn identity_key(name: &str) -> String {
        name.to_lowercase()
    }
}

/// One game won by `winner_id` against `loser_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub winner_id: usize,
    pub loser_id: usize,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(winner_id: usize, loser_id: usize) -> Self {
        Self {
            winner_id,
            loser_id,
        }
    }

    /// Returns true if a player is recorded as beating themselves.
    pub fn is_self_loop(&self) -> bool {
        self.winner_id == self.loser_id
    }
}

/// The extracted player registry and per-game edge list.
///
/// Serializes to exactly `{"players": [...], "edges": [...]}`.
///
/// # Example
///
/// ```rust
/// use matchgraph::graph::{extract, Edge};
/// use matchgraph::parser::MatchLine;
///
/// let graph = extract(&[vec![MatchLine::new("Alice", "Bob", 2, 1)]]);
///
/// assert_eq!(graph.player_count(), 2);
/// assert_eq!(
///     graph.edges,
///     vec![Edge::new(0, 1), Edge::new(0, 1), Edge::new(1, 0)]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGraph {
    /// Players in first-seen order; `players[i].id == i`.
    pub players: Vec<Player>,
    /// Edges in encounter order.
    pub edges: Vec<Edge>,
}

/// Accumulates players and edges for a single extraction.
#[derive(Debug, Default)]
struct GraphBuilder {
    players: Vec<Player>,
    /// Maps identity keys to player ids for O(1) lookup
    ids: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    fn resolve_or_create(&mut self, name: &str) -> usize {
        let key = Player::identity_key(name);
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }

        let id = self.players.len();
        self.players.push(Player::new(name, id));
        self.ids.insert(key, id);
        id
    }

    fn add_line(&mut self, line: &MatchLine) {
        let a = self.resolve_or_create(&line.name_a);
        let b = self.resolve_or_create(&line.name_b);
        self.add_games(a, b, line.wins_a, line.wins_b);
    }

    fn add_games(&mut self, a: usize, b: usize, wins_a: u32, wins_b: u32) {
        let a_wins = std::iter::repeat(Edge::new(a, b)).take(wins_a as usize);
        let b_wins = std::iter::repeat(Edge::new(b, a)).take(wins_b as usize);
        self.edges.extend(a_wins.chain(b_wins));
    }

    fn finish(self) -> MatchGraph {
        MatchGraph {
            players: self.players,
            edges: self.edges,
        }
    }
}

/// Extracts the win graph from already-parsed match groups.
///
/// Players are registered in encounter order; a name whose lowercase form
/// was seen before reuses the earlier player. Each line appends `wins_a`
/// edges from the first player to the second, then `wins_b` edges back.
/// Every call starts from an empty registry.
pub fn extract(groups: &[MatchGroup]) -> MatchGraph {
    let mut builder = GraphBuilder::default();
    for line in groups.iter().flatten() {
        builder.add_line(line);
    }
    builder.finish()
}

/// What to do when a raw row is malformed or a score is unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Skip malformed rows, count unreadable scores as zero, and report both.
    #[default]
    Lenient,
    /// Abort on the first malformed row or unreadable score.
    Strict,
}

/// The problem found in a raw row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowIssue {
    /// The row does not have exactly two names and two scores. It is skipped.
    #[error("expected 2 names and 2 scores, found {names} and {scores}")]
    Malformed { names: usize, scores: usize },

    /// A score cell could not be read. That side counts as zero wins.
    #[error("{side} score: {error}")]
    Score { side: Side, error: ScoreError },
}

/// A row-level problem with its location in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("table {group}, row {row}: {issue}")]
pub struct RowWarning {
    /// Zero-based index of the match group.
    pub group: usize,
    /// Zero-based index of the row within its group.
    pub row: usize,
    pub issue: RowIssue,
}

/// Errors that abort an extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A row was rejected under [`RowPolicy::Strict`].
    #[error("rejected row in {0}")]
    Rejected(RowWarning),
}

/// Result of extracting from raw rows.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub graph: MatchGraph,
    /// Every row problem encountered, in input order.
    pub warnings: Vec<RowWarning>,
}

impl Extraction {
    /// Returns true if any row was skipped or degraded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Checks a raw row's shape and reads its scores.
///
/// Returns `Err` only for malformed rows. Unreadable scores become zero and
/// are pushed onto `issues`.
fn read_row(row: &RawMatchRow, issues: &mut Vec<RowIssue>) -> Result<MatchLine, RowIssue> {
    if !row.is_well_formed() {
        return Err(RowIssue::Malformed {
            names: row.names.len(),
            scores: row.scores.len(),
        });
    }

    let mut wins = |side: Side, text: &str| {
        parse_wins(text).unwrap_or_else(|error| {
            issues.push(RowIssue::Score { side, error });
            0
        })
    };
    let wins_a = wins(Side::First, &row.scores[0]);
    let wins_b = wins(Side::Second, &row.scores[1]);

    Ok(MatchLine::new(
        row.names[0].clone(),
        row.names[1].clone(),
        wins_a,
        wins_b,
    ))
}

/// Extracts the win graph directly from raw rows.
///
/// Rows are checked with [`RowPolicy`]: under `Lenient` every problem is
/// logged and collected in [`Extraction::warnings`]; under `Strict` the first
/// one is returned as an error. An input without rows produces an empty
/// graph.
///
/// # Example
///
/// ```rust
/// use matchgraph::graph::{extract_rows, RowPolicy};
/// use matchgraph::parser::RawMatchRow;
///
/// let rows = vec![vec![RawMatchRow::new(["Alice", "Bob"], ["2 (forfeit)", "—"])]];
/// let extraction = extract_rows(&rows, RowPolicy::Lenient).unwrap();
///
/// assert_eq!(extraction.graph.edge_count(), 2);
/// assert_eq!(extraction.warnings.len(), 1);
/// ```
pub fn extract_rows(
    groups: &[RawMatchGroup],
    policy: RowPolicy,
) -> Result<Extraction, ExtractError> {
    let mut builder = GraphBuilder::default();
    let mut warnings = Vec::new();

    for (group_idx, group) in groups.iter().enumerate() {
        for (row_idx, row) in group.iter().enumerate() {
            let mut issues = Vec::new();
            let line = read_row(row, &mut issues);
            if let Err(issue) = &line {
                issues.push(issue.clone());
            }

            for issue in issues {
                let warning = RowWarning {
                    group: group_idx,
                    row: row_idx,
                    issue,
                };
                if policy == RowPolicy::Strict {
                    return Err(ExtractError::Rejected(warning));
                }
                tracing::warn!(group = group_idx, row = row_idx, "{}", warning.issue);
                warnings.push(warning);
            }

            if let Ok(line) = line {
                builder.add_line(&line);
            }
        }
    }

    Ok(Extraction {
        graph: builder.finish(),
        warnings,
    })
}

/// Errors raised when loading a serialized graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A player's id does not match its position in the list.
    #[error("player at position {index} has id {id}")]
    IdOutOfOrder { index: usize, id: usize },

    /// An edge points to a player that does not exist.
    #[error("edge {index} ({winner_id} -> {loser_id}) refers to an unknown player")]
    InvalidEdge {
        index: usize,
        winner_id: usize,
        loser_id: usize,
    },
}

/// Win/loss tally for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub id: usize,
    pub name: String,
    pub wins: usize,
    pub losses: usize,
}

impl PlayerRecord {
    /// Fraction of games won, or `None` for a player with no games.
    pub fn win_rate(&self) -> Option<f64> {
        let games = self.wins + self.losses;
        (games > 0).then(|| self.wins as f64 / games as f64)
    }
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.name, self.wins, self.losses)
    }
}

impl MatchGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of individual games (edges).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks a player up by name, ignoring case.
    pub fn find_player(&self, name: &str) -> Option<&Player> {
        let key = Player::identity_key(name);
        self.players
            .iter()
            .find(|p| Player::identity_key(&p.name) == key)
    }

    /// One-line human-readable summary of the graph size.
    pub fn summary(&self) -> String {
        format!(
            "Registered {} players and {} matches",
            self.player_count(),
            self.edge_count()
        )
    }

    /// Checks that ids are contiguous and every edge refers to a player.
    pub fn validate(&self) -> Result<(), GraphError> {
        if let Some((index, player)) = self
            .players
            .iter()
            .enumerate()
            .find(|(index, player)| player.id != *index)
        {
            return Err(GraphError::IdOutOfOrder {
                index,
                id: player.id,
            });
        }

        let count = self.players.len();
        if let Some((index, edge)) = self
            .edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.winner_id >= count || e.loser_id >= count)
        {
            return Err(GraphError::InvalidEdge {
                index,
                winner_id: edge.winner_id,
                loser_id: edge.loser_id,
            });
        }
        Ok(())
    }

    /// Deserializes and validates a graph from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let graph: MatchGraph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Deserializes and validates a graph from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        let graph: MatchGraph = serde_json::from_reader(reader)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Builds a petgraph view of the multigraph.
    ///
    /// Node `i` holds player `i`; each game becomes its own parallel edge.
    /// Edges whose endpoints are out of range are left out.
    pub fn to_digraph(&self) -> DiGraph<Player, ()> {
        let mut graph = DiGraph::with_capacity(self.players.len(), self.edges.len());
        for player in &self.players {
            graph.add_node(player.clone());
        }

        let count = self.players.len();
        for edge in &self.edges {
            if edge.winner_id < count && edge.loser_id < count {
                graph.add_edge(
                    NodeIndex::new(edge.winner_id),
                    NodeIndex::new(edge.loser_id),
                    (),
                );
            }
        }
        graph
    }

    /// Win/loss tally per player, in id order.
    ///
    /// A self-loop counts as both a win and a loss.
    pub fn records(&self) -> Vec<PlayerRecord> {
        let graph = self.to_digraph();
        graph
            .node_indices()
            .map(|idx| {
                let player = &graph[idx];
                PlayerRecord {
                    id: player.id,
                    name: player.name.clone(),
                    wins: graph.edges_directed(idx, Direction::Outgoing).count(),
                    losses: graph.edges_directed(idx, Direction::Incoming).count(),
                }
            })
            .collect()
    }
}
