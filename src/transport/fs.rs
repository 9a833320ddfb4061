use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::constants::files::EXTENSIONS;
use crate::errors::TransformError;

/// How far below the root directory release files are discovered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Only files directly inside the root.
    #[default]
    TopLevel,
    /// Every file below the root.
    Recursive,
}

/// Filesystem discovery of release files under a root path.
pub struct ReleaseFiles {
    root: PathBuf,
    traversal: Traversal,
    follow_links: bool,
}

impl ReleaseFiles {
    /// Discover under `root`, which may be a directory or a single file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            traversal: Traversal::TopLevel,
            follow_links: false,
        }
    }

    /// Set discovery depth.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Descend through symlinked directories and return symlinked files.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Release files in sorted path order.
    ///
    /// A root that is itself a file is returned as-is when its extension
    /// qualifies. Unreadable directory entries are logged and skipped.
    pub fn discover(&self) -> Result<Vec<PathBuf>, TransformError> {
        let metadata = std::fs::metadata(&self.root).map_err(|source| TransformError::Io {
            path: self.root.clone(),
            source,
        })?;
        if metadata.is_file() {
            return Ok(if is_release_file(&self.root) {
                vec![self.root.clone()]
            } else {
                Vec::new()
            });
        }

        let mut walker = WalkDir::new(&self.root).min_depth(1);
        if self.traversal == Traversal::TopLevel {
            walker = walker.max_depth(1);
        }
        if self.follow_links {
            walker = walker.follow_links(true);
        }
        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        root = %self.root.display(),
                        error = %err,
                        "[rf2:discover] skipping unreadable entry"
                    );
                    continue;
                }
            };
            if entry.file_type().is_file() && is_release_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// True if the path has a `.txt` or `.tsv` extension (case-insensitive).
pub fn is_release_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn layout() -> tempfile::TempDir {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Snapshot/Terminology")).unwrap();
        fs::write(root.join("b_Concept.txt"), "").unwrap();
        fs::write(root.join("a_Description.TSV"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();
        fs::write(root.join("Snapshot/Terminology/sct2_Concept.txt"), "").unwrap();
        temp
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|path| path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn top_level_discovery_ignores_subdirectories() {
        let temp = layout();
        let files = ReleaseFiles::new(temp.path()).discover().unwrap();
        assert_eq!(names(temp.path(), &files), vec!["a_Description.TSV", "b_Concept.txt"]);
    }

    #[test]
    fn recursive_discovery_is_sorted() {
        let temp = layout();
        let files = ReleaseFiles::new(temp.path())
            .with_traversal(Traversal::Recursive)
            .discover()
            .unwrap();
        assert_eq!(
            names(temp.path(), &files),
            vec![
                "Snapshot/Terminology/sct2_Concept.txt",
                "a_Description.TSV",
                "b_Concept.txt"
            ]
        );
    }

    #[test]
    fn a_single_file_root_is_returned_directly() {
        let temp = layout();
        let file = temp.path().join("b_Concept.txt");
        assert_eq!(ReleaseFiles::new(&file).discover().unwrap(), vec![file]);
        let other = temp.path().join("notes.md");
        assert!(ReleaseFiles::new(other).discover().unwrap().is_empty());
        assert!(ReleaseFiles::new(temp.path().join("missing")).discover().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_release_directories_need_follow_links() {
        let temp = layout();
        let linked = tempdir().unwrap();
        fs::write(linked.path().join("sct2_Identifier.txt"), "").unwrap();
        std::os::unix::fs::symlink(linked.path(), temp.path().join("Linked")).unwrap();

        let plain = ReleaseFiles::new(temp.path())
            .with_traversal(Traversal::Recursive)
            .discover()
            .unwrap();
        assert!(!names(temp.path(), &plain).contains(&"Linked/sct2_Identifier.txt".to_string()));

        let followed = ReleaseFiles::new(temp.path())
            .with_traversal(Traversal::Recursive)
            .with_follow_links(true)
            .discover()
            .unwrap();
        assert!(names(temp.path(), &followed).contains(&"Linked/sct2_Identifier.txt".to_string()));
    }
}
