use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::core::CaseSensitivity;

/// Default structure definition file, looked up under the repositories root.
pub const DEFAULT_SCHEMA_FILE: &str = "structure.xml";

#[derive(Parser, Debug)]
#[command(name = "repostruct", version)]
#[command(
    about = "Check that repository directories match an XML structure definition",
    long_about = None
)]
pub struct Cli {
    /// Repository names, resolved under --root. An empty name ends the list
    pub repositories: Vec<String>,

    /// Directory containing the repositories
    #[arg(long, env = "REPOSTRUCT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Structure definition (defaults to <ROOT>/structure.xml)
    #[arg(long, env = "REPOSTRUCT_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// File with one repository name per line (`-` for stdin); stops at the first blank line
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// How names in the structure definition are compared
    #[arg(long, value_enum, default_value_t = CaseMode::Host)]
    pub case: CaseMode,

    /// Maximum number of repositories checked concurrently
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn schema_path(&self) -> PathBuf {
        self.schema
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_SCHEMA_FILE))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CaseMode {
    /// Follow the platform's usual filesystem convention
    Host,
    Sensitive,
    Insensitive,
}

impl From<CaseMode> for CaseSensitivity {
    fn from(mode: CaseMode) -> Self {
        match mode {
            CaseMode::Host => CaseSensitivity::host(),
            CaseMode::Sensitive => CaseSensitivity::Sensitive,
            CaseMode::Insensitive => CaseSensitivity::Insensitive,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
