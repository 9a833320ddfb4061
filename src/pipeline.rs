//! Run driver: discovery, per-file dispatch, failure policy and the single
//! final commit.
//!
//! Every discovered file is classified by name and transformed through one
//! shared [`Composer`]. Files succeed or fail independently. The commit runs
//! once after every file finished, and only when at least one file succeeded.
//! The store's load phase is ended on every exit path, including panics.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::config::TransformConfig;
use crate::errors::TransformError;
use crate::identity::IdentityResolver;
use crate::stamp::StampAssembler;
use crate::starter::{StarterConcepts, compose_starter_data};
use crate::store::{CommitSummary, Composer, VersionedStore};
use crate::transform::{FileKind, FileOptions, FileStats, transform_file};
use crate::transport::fs::ReleaseFiles;
use crate::types::EpochSeconds;
use crate::vocabulary::Vocabulary;

/// How one discovered file ended.
#[derive(Debug)]
pub enum FileOutcome {
    /// Transformed; counts for the file.
    Succeeded(FileStats),
    /// Transformation stopped at this error.
    Failed(TransformError),
    /// File name matched no known row schema.
    Skipped,
    /// Not started because a strict run was already aborting.
    Cancelled,
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Succeeded(stats) => write!(
                f,
                "ok ({} rows, {} groups, {} sessions, {} facts)",
                stats.rows, stats.groups, stats.sessions, stats.facts
            ),
            FileOutcome::Failed(err) => write!(f, "failed: {err}"),
            FileOutcome::Skipped => f.write_str("skipped (unsupported file)"),
            FileOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Outcome of one discovered file.
#[derive(Debug)]
pub struct FileReport {
    /// Discovered path.
    pub path: PathBuf,
    /// Schema chosen from the file name.
    pub kind: Option<FileKind>,
    /// How the file ended.
    pub outcome: FileOutcome,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// One entry per discovered file, in processing order.
    pub files: Vec<FileReport>,
    /// `None` when no file succeeded and nothing was committed.
    pub commit: Option<CommitSummary>,
    /// Distinct stamps registered during the run.
    pub distinct_stamps: usize,
    /// Starter concept ids, when requested.
    pub starter: Option<StarterConcepts>,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|report| pred(&report.outcome)).count()
    }

    /// Files transformed without error.
    pub fn succeeded(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Succeeded(_)))
    }

    /// Files that failed.
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Failed(_)))
    }

    /// Files with no known schema.
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Skipped))
    }
}

/// Ends the store's load phase when dropped.
struct LoadPhase<'s> {
    store: &'s dyn VersionedStore,
}

impl<'s> LoadPhase<'s> {
    fn begin(store: &'s dyn VersionedStore) -> Result<Self, TransformError> {
        store.begin_load_phase()?;
        Ok(Self { store })
    }
}

impl Drop for LoadPhase<'_> {
    fn drop(&mut self) {
        self.store.end_load_phase();
    }
}

/// Transformation run against one store.
pub struct Pipeline<'s> {
    store: &'s dyn VersionedStore,
    config: TransformConfig,
    starter_time: Option<EpochSeconds>,
}

impl<'s> Pipeline<'s> {
    /// Run against `store` with `config`.
    pub fn new(store: &'s dyn VersionedStore, config: TransformConfig) -> Self {
        Self {
            store,
            config,
            starter_time: None,
        }
    }

    /// Compose the starter concepts, stamped at `time`, before the first file.
    pub fn with_starter_data(mut self, time: EpochSeconds) -> Self {
        self.starter_time = Some(time);
        self
    }

    /// Transform every release file under `root` (a directory or one file).
    pub fn run(&self, root: &Path) -> Result<RunReport, TransformError> {
        let files = ReleaseFiles::new(root)
            .with_traversal(self.config.traversal)
            .with_follow_links(self.config.follow_links)
            .discover()?;
        info!(
            root = %root.display(),
            files = files.len(),
            "[rf2:pipeline] discovered release files"
        );

        let resolver = IdentityResolver::new(self.config.namespace)
            .with_overrides(self.config.overrides.clone());
        let author = resolver.resolve_text(&self.config.author_name);
        let composer = Composer::new(
            self.store,
            StampAssembler::new(author, Vocabulary::DevelopmentPath.id()),
            resolver,
        );

        let _load_phase = LoadPhase::begin(self.store)?;
        let starter = match self.starter_time {
            Some(time) => Some(compose_starter_data(&composer, time)?),
            None => None,
        };

        let options = FileOptions {
            validate_group_order: self.config.validate_group_order,
        };
        let cancel = AtomicBool::new(false);
        let mut reports: Vec<FileReport> = if self.config.parallel {
            files
                .par_iter()
                .map(|path| self.process_file(path, &composer, options, &cancel))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.process_file(path, &composer, options, &cancel))
                .collect()
        };

        let attempted = reports
            .iter()
            .filter(|report| !matches!(report.outcome, FileOutcome::Skipped))
            .count();
        let succeeded = reports
            .iter()
            .filter(|report| matches!(report.outcome, FileOutcome::Succeeded(_)))
            .count();

        if self.config.strict
            && let Some(idx) = reports
                .iter()
                .position(|report| matches!(report.outcome, FileOutcome::Failed(_)))
            && let FileOutcome::Failed(err) = reports.swap_remove(idx).outcome
        {
            error!(error = %err, "[rf2:pipeline] strict run aborted; nothing committed");
            return Err(err);
        }

        if succeeded == 0 && attempted > 0 {
            error!(
                attempted,
                "[rf2:pipeline] every release file failed; nothing committed"
            );
            return Err(TransformError::AllFilesFailed(attempted));
        }
        // Starter data alone is committed when no release file was attempted.
        if succeeded == 0 && starter.is_none() {
            warn!(root = %root.display(), "[rf2:pipeline] no release files to transform");
            return Ok(RunReport {
                files: reports,
                commit: None,
                distinct_stamps: composer.stamps().len(),
                starter,
            });
        }

        let summary = composer.commit()?;
        info!(
            sessions = summary.sessions,
            facts = summary.facts,
            stamps = summary.stamps,
            "[rf2:pipeline] committed"
        );
        Ok(RunReport {
            files: reports,
            commit: Some(summary),
            distinct_stamps: composer.stamps().len(),
            starter,
        })
    }

    fn process_file(
        &self,
        path: &Path,
        composer: &Composer<'_>,
        options: FileOptions,
        cancel: &AtomicBool,
    ) -> FileReport {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let Some(kind) = FileKind::from_file_name(&name) else {
            info!(path = %path.display(), "[rf2:pipeline] skipping unsupported file");
            return FileReport {
                path: path.to_path_buf(),
                kind: None,
                outcome: FileOutcome::Skipped,
            };
        };
        if cancel.load(Ordering::Acquire) {
            return FileReport {
                path: path.to_path_buf(),
                kind: Some(kind),
                outcome: FileOutcome::Cancelled,
            };
        }

        info!(path = %path.display(), kind = kind.label(), "[rf2:pipeline] transforming file");
        let outcome = match transform_file(kind, path, composer, options) {
            Ok(stats) => {
                info!(
                    path = %path.display(),
                    rows = stats.rows,
                    facts = stats.facts,
                    "[rf2:pipeline] file transformed"
                );
                FileOutcome::Succeeded(stats)
            }
            Err(err) => {
                if self.config.strict {
                    cancel.store(true, Ordering::Release);
                    error!(path = %path.display(), error = %err, "[rf2:pipeline] file failed");
                } else {
                    warn!(path = %path.display(), error = %err, "[rf2:pipeline] file failed; continuing");
                }
                FileOutcome::Failed(err)
            }
        };
        FileReport {
            path: path.to_path_buf(),
            kind: Some(kind),
            outcome,
        }
    }
}
