pub mod cli;
pub mod core;
pub mod error;
pub mod fs;
pub mod models;

pub use crate::core::{
    BatchSummary, CaseSensitivity, Matcher, NamePattern, RepositoryList, check_repositories,
    check_repository, load_schema, parse_schema,
};
pub use crate::error::{ListError, SchemaError};
pub use crate::fs::{DirectoryLister, RealFileSystem};
pub use crate::models::{Discrepancy, MatchResult, NodeKind, SchemaNode, ValidationReport};
