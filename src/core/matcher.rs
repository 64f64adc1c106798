use std::collections::BTreeSet;
use std::path::Path;

use crate::core::NamePattern;
use crate::error::ListError;
use crate::fs::DirectoryLister;
use crate::models::{Discrepancy, MatchResult, NodeKind, SchemaNode};

/// Walks a schema tree against real directories through a [`DirectoryLister`].
///
/// The matcher holds no state between calls; every level builds its own
/// leftover sets and returns its own [`MatchResult`].
pub struct Matcher<'a, L: DirectoryLister + ?Sized> {
    lister: &'a L,
}

impl<'a, L: DirectoryLister + ?Sized> Matcher<'a, L> {
    pub fn new(lister: &'a L) -> Self {
        Self { lister }
    }

    /// Check that `path` satisfies the children of `node`.
    ///
    /// `allow_other_entries` governs this level only; each child directory is
    /// checked with its own flag. Missing and excess entries are recorded and
    /// matching continues, so the result lists every discrepancy found.
    pub fn match_directory(
        &self,
        node: &SchemaNode,
        path: &Path,
        allow_other_entries: bool,
        is_root: bool,
    ) -> MatchResult {
        tracing::debug!(path = %path.display(), allow_other_entries, is_root, "matching directory");

        let any = NamePattern::any();
        let (mut leftover_files, mut leftover_dirs) = match self.enumerate(path, &any) {
            Ok(sets) => sets,
            Err(err) => return MatchResult::failed(list_failure(path, err)),
        };

        let mut result = MatchResult::default();

        for child in node.children() {
            let pattern = child.pattern();
            match child.kind() {
                NodeKind::Directory => {
                    let dirs = match self.lister.list_directories(path, pattern) {
                        Ok(dirs) => dirs,
                        Err(err) => {
                            result.push(list_failure(path, err));
                            continue;
                        }
                    };

                    if dirs.is_empty() {
                        result.push(Discrepancy::MissingDirectory {
                            pattern: pattern.as_str().to_owned(),
                        });
                        continue;
                    }

                    for dir in dirs {
                        let sub = self.match_directory(
                            child,
                            &path.join(&dir),
                            child.allow_other_entries(),
                            false,
                        );
                        result.merge(sub);
                        if !allow_other_entries {
                            leftover_dirs.remove(&dir);
                        }
                    }
                }
                NodeKind::File => {
                    let files = match self.lister.list_files(path, pattern) {
                        Ok(files) => files,
                        Err(err) => {
                            result.push(list_failure(path, err));
                            continue;
                        }
                    };

                    if files.is_empty() {
                        result.push(Discrepancy::MissingFile {
                            pattern: pattern.as_str().to_owned(),
                        });
                    } else if !allow_other_entries {
                        // Every match is consumed: "Description.*" may
                        // legitimately cover several files.
                        for file in &files {
                            leftover_files.remove(file);
                        }
                    }
                }
            }
        }

        if !allow_other_entries {
            for file in leftover_files {
                result.push(Discrepancy::ExcessFile {
                    path: path.join(file),
                });
            }
            for dir in leftover_dirs {
                result.push(Discrepancy::ExcessDirectory {
                    path: path.join(dir),
                });
            }
        }

        result
    }

    fn enumerate(
        &self,
        path: &Path,
        any: &NamePattern,
    ) -> Result<(BTreeSet<String>, BTreeSet<String>), ListError> {
        let files = self.lister.list_files(path, any)?;
        let dirs = self.lister.list_directories(path, any)?;
        Ok((files.into_iter().collect(), dirs.into_iter().collect()))
    }
}

fn list_failure(path: &Path, err: ListError) -> Discrepancy {
    match err {
        ListError::PathNotFound(_) => Discrepancy::DirectoryNotFound {
            path: path.to_path_buf(),
        },
        ListError::Io { source, .. } => Discrepancy::Unreadable {
            path: path.to_path_buf(),
            reason: source.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CaseSensitivity, parse_schema};
    use crate::fs::MockFileSystem;
    use crate::models::{EntryKind, FsEntry};
    use std::path::PathBuf;

    const COURSE_SCHEMA: &str = r#"
        <repoRoot>
            <directory name="Module description" allowotherfiles="no">
                <file name="Description.*" />
                <file name="Readme.txt" />
            </directory>
            <directory name="Exercises">
                <directory name="Solutions" />
                <directory name="Data" />
            </directory>
        </repoRoot>
    "#;

    fn schema(source: &str) -> SchemaNode {
        parse_schema(source, CaseSensitivity::Sensitive).unwrap()
    }

    fn check(fs: &MockFileSystem, schema: &SchemaNode, root: &str) -> MatchResult {
        Matcher::new(fs).match_directory(schema, Path::new(root), false, true)
    }

    fn compliant_course(fs: &MockFileSystem) {
        fs.add_dir("/repo", &[], &["Module description", "Exercises"]);
        fs.add_dir(
            "/repo/Module description",
            &["Readme.txt", "Description.docx", "Description.pdf"],
            &[],
        );
        fs.add_dir("/repo/Exercises", &[], &["Solutions", "Data"]);
    }

    #[test]
    fn closed_directory_with_exact_contents_passes() {
        let fs = MockFileSystem::default();
        compliant_course(&fs);

        let result = check(&fs, &schema(COURSE_SCHEMA), "/repo");
        assert!(result.ok, "{:?}", result.messages());
        assert!(result.discrepancies.is_empty());
    }

    #[test]
    fn extra_file_in_closed_directory_is_reported() {
        let fs = MockFileSystem::default();
        compliant_course(&fs);
        fs.add_dir(
            "/repo/Module description",
            &["Readme.txt", "Description.docx", "Description.pdf", "extra.txt"],
            &[],
        );

        let result = check(&fs, &schema(COURSE_SCHEMA), "/repo");
        assert!(!result.ok);
        assert_eq!(
            result.discrepancies,
            vec![Discrepancy::ExcessFile {
                path: PathBuf::from("/repo/Module description/extra.txt"),
            }]
        );
    }

    #[test]
    fn open_directory_tolerates_extras() {
        let fs = MockFileSystem::default();
        compliant_course(&fs);
        fs.add_dir("/repo/Exercises", &["notes.md"], &["Solutions", "Data", "Notes"]);

        let result = check(&fs, &schema(COURSE_SCHEMA), "/repo");
        assert!(result.ok, "{:?}", result.messages());
    }

    #[test]
    fn missing_directory_is_reported_by_pattern() {
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["Module description"]);
        fs.add_dir(
            "/repo/Module description",
            &["Readme.txt", "Description.pdf"],
            &[],
        );

        let result = check(&fs, &schema(COURSE_SCHEMA), "/repo");
        assert!(!result.ok);
        assert_eq!(result.messages(), vec!["Missing directory: Exercises".to_owned()]);
    }

    #[test]
    fn missing_root_stops_immediately() {
        let fs = MockFileSystem::default();

        let result = check(&fs, &schema(COURSE_SCHEMA), "/absent");
        assert!(!result.ok);
        assert_eq!(
            result.discrepancies,
            vec![Discrepancy::DirectoryNotFound {
                path: PathBuf::from("/absent"),
            }]
        );
        assert!(fs.calls().iter().all(|call| call == Path::new("/absent")));
    }

    #[test]
    fn missing_file_is_reported_once_per_node() {
        let fs = MockFileSystem::default();
        compliant_course(&fs);
        fs.add_dir("/repo/Module description", &["Readme.txt"], &[]);

        let result = check(&fs, &schema(COURSE_SCHEMA), "/repo");
        assert_eq!(result.messages(), vec!["Missing file: Description.*".to_owned()]);
    }

    #[test]
    fn root_is_closed_to_undeclared_entries() {
        let fs = MockFileSystem::default();
        compliant_course(&fs);
        fs.add_dir(
            "/repo",
            &["stray.txt"],
            &["Module description", "Exercises", "Old"],
        );

        let result = check(&fs, &schema(COURSE_SCHEMA), "/repo");
        assert!(!result.ok);
        assert_eq!(
            result.messages(),
            vec![
                "Excess file: /repo/stray.txt".to_owned(),
                "Excess directory: /repo/Old".to_owned(),
            ]
        );
    }

    #[test]
    fn wildcard_directory_checks_every_match() {
        let source = r#"
            <repoRoot>
                <directory name="Week *">
                    <file name="slides.pdf" />
                </directory>
            </repoRoot>
        "#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["Week 1", "Week 2", "Week 3"]);
        fs.add_dir("/repo/Week 1", &["slides.pdf"], &[]);
        fs.add_dir("/repo/Week 3", &["slides.pdf"], &[]);

        let result = check(&fs, &schema(source), "/repo");
        assert!(!result.ok);
        // Week 2 is consumed from the root leftovers even though it failed.
        assert_eq!(result.messages(), vec!["Missing file: slides.pdf".to_owned()]);
    }

    #[test]
    fn closed_flag_does_not_leak_into_descendants() {
        let source = r#"
            <repoRoot>
                <directory name="outer" allowotherfiles="no">
                    <directory name="inner" />
                </directory>
            </repoRoot>
        "#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["outer"]);
        fs.add_dir("/repo/outer", &[], &["inner"]);
        fs.add_dir("/repo/outer/inner", &["anything.bin"], &["whatever"]);

        let result = check(&fs, &schema(source), "/repo");
        assert!(result.ok, "{:?}", result.messages());
    }

    #[test]
    fn open_parent_does_not_open_closed_child() {
        let source = r#"
            <repoRoot>
                <directory name="outer">
                    <directory name="inner" allowotherfiles="no" />
                </directory>
            </repoRoot>
        "#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["outer"]);
        fs.add_dir("/repo/outer", &["free.txt"], &["inner"]);
        fs.add_dir("/repo/outer/inner", &["stowaway.txt"], &[]);

        let result = check(&fs, &schema(source), "/repo");
        assert_eq!(
            result.messages(),
            vec!["Excess file: /repo/outer/inner/stowaway.txt".to_owned()]
        );
    }

    #[test]
    fn childless_open_directory_accepts_any_contents() {
        let source = r#"<repoRoot><directory name="free" /></repoRoot>"#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["free"]);
        fs.add_dir("/repo/free", &["a", "b"], &["c"]);

        assert!(check(&fs, &schema(source), "/repo").ok);
    }

    #[test]
    fn childless_closed_directory_must_be_empty() {
        let source = r#"<repoRoot><directory name="empty" allowotherfiles="no" /></repoRoot>"#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["empty"]);
        fs.add_dir("/repo/empty", &["a"], &["b"]);

        let result = check(&fs, &schema(source), "/repo");
        assert_eq!(
            result.messages(),
            vec![
                "Excess file: /repo/empty/a".to_owned(),
                "Excess directory: /repo/empty/b".to_owned(),
            ]
        );
    }

    #[test]
    fn every_file_matched_by_a_pattern_is_consumed() {
        let source = r#"<repoRoot><file name="*.log" /></repoRoot>"#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &["a.log", "b.log", "c.log"], &[]);

        let result = check(&fs, &schema(source), "/repo");
        assert!(result.ok, "{:?}", result.messages());
    }

    #[test]
    fn overlapping_patterns_are_evaluated_independently() {
        let source = r#"
            <repoRoot>
                <file name="*.txt" />
                <file name="Readme.txt" />
                <file name="Readme.*" />
            </repoRoot>
        "#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &["Readme.txt", "notes.txt"], &[]);

        let result = check(&fs, &schema(source), "/repo");
        assert!(result.ok, "{:?}", result.messages());
    }

    #[test]
    fn unreadable_subdirectory_is_a_single_discrepancy() {
        let source = r#"
            <repoRoot>
                <directory name="locked"><file name="x" /></directory>
                <file name="after.txt" />
            </repoRoot>
        "#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["locked"]);
        fs.set_error("/repo/locked", "Permission denied");

        let result = check(&fs, &schema(source), "/repo");
        assert!(!result.ok);
        assert_eq!(
            result.messages(),
            vec![
                "/repo/locked: cannot read directory (Permission denied)".to_owned(),
                "Missing file: after.txt".to_owned(),
            ]
        );
    }

    #[test]
    fn subdirectory_gone_before_listing_is_reported_as_missing_path() {
        let source = r#"<repoRoot><directory name="vanished"><file name="x" /></directory></repoRoot>"#;
        let fs = MockFileSystem::default();
        fs.set_dir_entries(
            "/repo",
            vec![FsEntry {
                name: "vanished".to_owned(),
                kind: EntryKind::Directory,
            }],
        );

        let result = check(&fs, &schema(source), "/repo");
        assert!(!result.ok);
        assert_eq!(
            result.discrepancies,
            vec![Discrepancy::DirectoryNotFound {
                path: PathBuf::from("/repo/vanished"),
            }]
        );
        assert_eq!(
            result.messages(),
            vec!["/repo/vanished: directory does not exist".to_owned()]
        );
    }

    #[test]
    fn discrepancies_follow_schema_document_order() {
        let source = r#"
            <repoRoot>
                <file name="first" />
                <directory name="nested">
                    <file name="second" />
                </directory>
                <directory name="third" />
            </repoRoot>
        "#;
        let fs = MockFileSystem::default();
        fs.add_dir("/repo", &[], &["nested"]);

        let result = check(&fs, &schema(source), "/repo");
        assert_eq!(
            result.messages(),
            vec![
                "Missing file: first".to_owned(),
                "Missing file: second".to_owned(),
                "Missing directory: third".to_owned(),
            ]
        );
    }

    #[test]
    fn repeated_checks_are_identical() {
        let fs = MockFileSystem::default();
        compliant_course(&fs);
        fs.add_dir("/repo", &["z.txt", "a.txt"], &["Module description", "Exercises"]);
        let schema = schema(COURSE_SCHEMA);

        let first = check(&fs, &schema, "/repo");
        let second = check(&fs, &schema, "/repo");
        assert_eq!(first, second);
        assert_eq!(
            first.messages(),
            vec![
                "Excess file: /repo/a.txt".to_owned(),
                "Excess file: /repo/z.txt".to_owned(),
            ]
        );
    }
}
