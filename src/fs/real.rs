use std::io;
use std::path::Path;

use crate::error::ListError;
use crate::models::{EntryKind, FsEntry};

use super::DirectoryLister;

/// Lister backed by `std::fs`. Symlinks are classified by their target.
pub struct RealFileSystem;

impl DirectoryLister for RealFileSystem {
    fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>, ListError> {
        if !dir.is_dir() {
            return Err(ListError::PathNotFound(dir.to_path_buf()));
        }

        let read_dir = std::fs::read_dir(dir).map_err(|source| io_error(dir, source))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| io_error(dir, source))?;
            // `Path::is_dir` follows links; a dangling link counts as a file.
            let kind = if entry.path().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            entries.push(FsEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }
}

fn io_error(dir: &Path, source: io::Error) -> ListError {
    if source.kind() == io::ErrorKind::NotFound {
        ListError::PathNotFound(dir.to_path_buf())
    } else {
        ListError::Io {
            path: dir.to_path_buf(),
            source,
        }
    }
}
