use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};

/// A single violation found while matching a directory against the schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Discrepancy {
    /// A directory to check is missing, usually the repository root.
    DirectoryNotFound { path: PathBuf },
    /// A matched directory exists but could not be listed.
    Unreadable { path: PathBuf, reason: String },
    MissingDirectory { pattern: String },
    MissingFile { pattern: String },
    ExcessFile { path: PathBuf },
    ExcessDirectory { path: PathBuf },
}

impl Discrepancy {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DirectoryNotFound { .. } => "directory_not_found",
            Self::Unreadable { .. } => "unreadable",
            Self::MissingDirectory { .. } => "missing_directory",
            Self::MissingFile { .. } => "missing_file",
            Self::ExcessFile { .. } => "excess_file",
            Self::ExcessDirectory { .. } => "excess_directory",
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "{}: directory does not exist", path.display())
            }
            Self::Unreadable { path, reason } => {
                write!(f, "{}: cannot read directory ({reason})", path.display())
            }
            Self::MissingDirectory { pattern } => write!(f, "Missing directory: {pattern}"),
            Self::MissingFile { pattern } => write!(f, "Missing file: {pattern}"),
            Self::ExcessFile { path } => write!(f, "Excess file: {}", path.display()),
            Self::ExcessDirectory { path } => write!(f, "Excess directory: {}", path.display()),
        }
    }
}

/// Outcome of matching one schema node against one directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchResult {
    pub ok: bool,
    pub discrepancies: Vec<Discrepancy>,
}

impl Default for MatchResult {
    fn default() -> Self {
        Self {
            ok: true,
            discrepancies: Vec::new(),
        }
    }
}

impl MatchResult {
    pub fn failed(discrepancy: Discrepancy) -> Self {
        Self {
            ok: false,
            discrepancies: vec![discrepancy],
        }
    }

    /// Record a violation at this level.
    pub fn push(&mut self, discrepancy: Discrepancy) {
        self.ok = false;
        self.discrepancies.push(discrepancy);
    }

    /// Fold a child result into this one, keeping document order.
    pub fn merge(&mut self, other: MatchResult) {
        self.ok &= other.ok;
        self.discrepancies.extend(other.discrepancies);
    }

    pub fn messages(&self) -> Vec<String> {
        self.discrepancies.iter().map(ToString::to_string).collect()
    }
}

/// The verdict for one repository root.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    pub repository: String,
    pub root: PathBuf,
    pub checked_at: DateTime<Local>,
    pub ok: bool,
    pub discrepancies: Vec<Discrepancy>,
}

impl ValidationReport {
    pub fn new(repository: impl Into<String>, root: PathBuf, result: MatchResult) -> Self {
        Self {
            repository: repository.into(),
            root,
            checked_at: Local::now(),
            ok: result.ok,
            discrepancies: result.discrepancies,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.discrepancies.iter().map(ToString::to_string).collect()
    }
}
