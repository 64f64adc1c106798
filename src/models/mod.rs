mod entry;
mod report;
mod schema;

pub use entry::{EntryKind, FsEntry};
pub use report::{Discrepancy, MatchResult, ValidationReport};
pub use schema::{NodeKind, SchemaNode};
