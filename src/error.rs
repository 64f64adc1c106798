use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that make the structure definition unusable. Any of these aborts
/// the whole run before a single repository is checked.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("cannot read structure definition {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("structure definition is empty")]
    Empty,

    #[error("structure definition is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("root element must be <repoRoot>, found <{found}>")]
    WrongRoot { found: String },

    #[error("<{element}> on line {line} has no `name` attribute")]
    MissingName { element: String, line: u32 },

    #[error("<file name=\"{name}\"> on line {line} cannot contain child elements")]
    FileWithChildren { name: String, line: u32 },

    #[error("invalid name pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failures of the directory lister.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("{}: directory does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
