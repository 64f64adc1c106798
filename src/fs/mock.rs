use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::ListError;
use crate::models::{EntryKind, FsEntry};

use super::DirectoryLister;

#[derive(Clone, Debug)]
enum Response {
    Ok(Vec<FsEntry>),
    Err(String),
}

/// In-memory lister. Unregistered paths behave as missing directories.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    responses: HashMap<PathBuf, Response>,
    calls: Vec<PathBuf>,
}

impl MockFileSystem {
    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, entries: Vec<FsEntry>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.responses.insert(dir.into(), Response::Ok(entries));
    }

    /// Register `dir` with the given immediate files and subdirectories.
    /// Subdirectories are registered as empty unless already present.
    pub fn add_dir(&self, dir: &str, files: &[&str], dirs: &[&str]) {
        let dir = PathBuf::from(dir);
        let files = files.iter().map(|name| (*name, EntryKind::File));
        let subdirs = dirs.iter().map(|name| (*name, EntryKind::Directory));
        let entries = files
            .chain(subdirs)
            .map(|(name, kind)| FsEntry {
                name: name.to_owned(),
                kind,
            })
            .collect();

        {
            let mut inner = self.inner.lock().expect("mock fs lock");
            for name in dirs {
                inner
                    .responses
                    .entry(dir.join(name))
                    .or_insert_with(|| Response::Ok(Vec::new()));
            }
        }
        self.set_dir_entries(dir, entries);
    }

    pub fn set_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .responses
            .insert(dir.into(), Response::Err(message.into()));
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }
}

impl DirectoryLister for MockFileSystem {
    fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>, ListError> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());

        match inner.responses.get(dir) {
            Some(Response::Ok(entries)) => Ok(entries.clone()),
            Some(Response::Err(message)) => Err(ListError::Io {
                path: dir.to_path_buf(),
                source: io::Error::other(message.clone()),
            }),
            None => Err(ListError::PathNotFound(dir.to_path_buf())),
        }
    }
}
