use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task;

use crate::core::Matcher;
use crate::fs::DirectoryLister;
use crate::models::{SchemaNode, ValidationReport};

/// Ordered repository identifiers. Reading stops at the first empty entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RepositoryList {
    names: Vec<String>,
}

impl RepositoryList {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|name| name.into().trim().to_owned())
            .take_while(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// One identifier per line.
    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut names = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
            let name = line.trim();
            if name.is_empty() {
                break;
            }
            names.push(name.to_owned());
        }
        Ok(Self { names })
    }

    pub fn extend(&mut self, other: RepositoryList) {
        self.names.extend(other.names);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Check one repository. Repository roots are always closed: only the
/// top-level entries declared by the schema may exist.
pub fn check_repository<L: DirectoryLister + ?Sized>(
    schema: &SchemaNode,
    lister: &L,
    repositories_root: &Path,
    name: &str,
) -> ValidationReport {
    let root = repositories_root.join(name);
    let result = Matcher::new(lister).match_directory(schema, &root, false, true);

    if result.ok {
        tracing::info!(repository = name, "repository ok");
    } else {
        tracing::info!(
            repository = name,
            discrepancies = result.discrepancies.len(),
            "repository not ok"
        );
    }

    ValidationReport::new(name, root, result)
}

/// Check every repository on the blocking pool, at most `jobs` at a time.
/// Reports come back in list order.
pub async fn check_repositories<L>(
    schema: Arc<SchemaNode>,
    lister: Arc<L>,
    repositories_root: PathBuf,
    repositories: &RepositoryList,
    jobs: usize,
) -> anyhow::Result<Vec<ValidationReport>>
where
    L: DirectoryLister + 'static,
{
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut handles = Vec::with_capacity(repositories.names().len());

    for name in repositories.names() {
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .context("repository check pool closed")?;
        let schema = schema.clone();
        let lister = lister.clone();
        let root = repositories_root.clone();
        let name = name.clone();

        handles.push(task::spawn_blocking(move || {
            let report = check_repository(&schema, lister.as_ref(), &root, &name);
            drop(permit);
            report
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await.context("repository check panicked")?);
    }
    Ok(reports)
}

/// Aggregate verdict for a batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BatchSummary {
    pub passed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_reports(reports: &[ValidationReport]) -> Self {
        let failed = reports.iter().filter(|report| !report.ok).count();
        Self {
            passed: reports.len() - failed,
            failed,
        }
    }

    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}
