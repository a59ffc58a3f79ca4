//! Input acquisition for the extractor.
//!
//! Resolves command-line inputs (stdin, single files, or directories of
//! saved pages) into raw match groups, in a deterministic order.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::parser::{bracket_html, fixture, BracketSelectors, ParseError, RawMatchGroup};

/// Errors that can occur while reading inputs.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: ParseError },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: String,
        source: walkdir::Error,
    },

    #[error("Input not found: {0}")]
    NotFound(String),
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// How to interpret an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Decide from the file extension; stdin is read as HTML.
    #[default]
    Auto,
    /// Rendered HTML containing match-list tables.
    Html,
    /// A JSON fixture of raw rows.
    Json,
}

impl InputFormat {
    /// Maps a file extension to a concrete format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(InputFormat::Html),
            "json" => Some(InputFormat::Json),
            _ => None,
        }
    }

    fn resolve(self, path: Option<&Path>) -> Self {
        match self {
            InputFormat::Auto => path
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .and_then(Self::from_extension)
                .unwrap_or(InputFormat::Html),
            other => other,
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "html" | "htm" => Ok(InputFormat::Html),
            "json" => Ok(InputFormat::Json),
            _ => Err(format!(
                "Unknown input format: '{}'. Valid formats: auto, html, json",
                s
            )),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Html => write!(f, "html"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

/// Where match rows are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    /// Every supported file beneath this directory.
    Dir(PathBuf),
}

impl Source {
    /// Classifies a command-line argument. `-` means stdin.
    pub fn from_arg(arg: &str) -> SourceResult<Self> {
        if arg == "-" {
            return Ok(Source::Stdin);
        }

        let path = PathBuf::from(arg);
        if path.is_dir() {
            Ok(Source::Dir(path))
        } else if path.is_file() {
            Ok(Source::File(path))
        } else {
            Err(SourceError::NotFound(arg.to_string()))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(p) | Source::Dir(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Reads raw match groups from inputs.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    pub format: InputFormat,
    pub selectors: BracketSelectors,
}

impl Loader {
    /// Creates a loader with the default selectors.
    pub fn new(format: InputFormat) -> Self {
        Self {
            format,
            selectors: BracketSelectors::default(),
        }
    }

    /// Loads every source in order and concatenates their groups.
    pub fn load_all(&self, sources: &[Source]) -> SourceResult<Vec<RawMatchGroup>> {
        let mut groups = Vec::new();
        for source in sources {
            groups.extend(self.load(source)?);
        }
        Ok(groups)
    }

    /// Loads one source.
    pub fn load(&self, source: &Source) -> SourceResult<Vec<RawMatchGroup>> {
        match source {
            Source::Stdin => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .map_err(|e| SourceError::Read {
                        path: source.to_string(),
                        source: e.into(),
                    })?;
                self.parse_content(&content, None)
                    .map_err(|e| SourceError::Read {
                        path: source.to_string(),
                        source: e,
                    })
            }
            Source::File(path) => self.load_file(path),
            Source::Dir(root) => self.load_dir(root),
        }
    }

    /// Loads a single file.
    pub fn load_file(&self, path: &Path) -> SourceResult<Vec<RawMatchGroup>> {
        let read = || -> Result<Vec<RawMatchGroup>, ParseError> {
            let content = std::fs::read_to_string(path)?;
            self.parse_content(&content, Some(path))
        };

        let groups = read().map_err(|e| SourceError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), groups = groups.len(), "loaded input");
        Ok(groups)
    }

    /// Loads every `.html`, `.htm` and `.json` file beneath `root`, sorted by path.
    pub fn load_dir(&self, root: &Path) -> SourceResult<Vec<RawMatchGroup>> {
        let mut groups = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| SourceError::Walk {
                path: root.display().to_string(),
                source: e,
            })?;
            let path = entry.path();

            // Skip directories
            if !entry.file_type().is_file() {
                continue;
            }

            // Check if it's a supported file type
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if InputFormat::from_extension(ext).is_none() {
                continue;
            }

            groups.extend(self.load_file(path)?);
        }

        Ok(groups)
    }

    fn parse_content(
        &self,
        content: &str,
        path: Option<&Path>,
    ) -> Result<Vec<RawMatchGroup>, ParseError> {
        match self.format.resolve(path) {
            InputFormat::Json => fixture::parse_str(content),
            _ => bracket_html::parse_str(content, &self.selectors),
        }
    }
}
