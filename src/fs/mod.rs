mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use std::path::Path;

use crate::core::NamePattern;
use crate::error::ListError;
use crate::models::{EntryKind, FsEntry};

/// Read access to immediate directory contents.
///
/// Implementors only provide `read_dir`; the pattern-filtered listings are
/// derived from it and always come back sorted by name.
pub trait DirectoryLister: Send + Sync {
    /// Fails with [`ListError::PathNotFound`] when `dir` is absent or not a
    /// directory.
    fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>, ListError>;

    fn list_files(&self, dir: &Path, pattern: &NamePattern) -> Result<Vec<String>, ListError> {
        Ok(list_matching(self.read_dir(dir)?, EntryKind::File, pattern))
    }

    fn list_directories(
        &self,
        dir: &Path,
        pattern: &NamePattern,
    ) -> Result<Vec<String>, ListError> {
        Ok(list_matching(
            self.read_dir(dir)?,
            EntryKind::Directory,
            pattern,
        ))
    }
}

fn list_matching(entries: Vec<FsEntry>, kind: EntryKind, pattern: &NamePattern) -> Vec<String> {
    let mut names: Vec<String> = entries
        .into_iter()
        .filter(|entry| entry.kind == kind && pattern.matches(&entry.name))
        .map(|entry| entry.name)
        .collect();
    names.sort();
    names
}
