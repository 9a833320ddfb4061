use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::debug;

use crate::constants::store::{FACTS_FILE, STAGING_SUFFIX, STAMPS_FILE};
use crate::data::{Fact, FactLine};
use crate::errors::StoreError;
use crate::stamp::{Stamp, StampRecord};
use crate::store::{CommitSummary, VersionedStore};
use crate::types::{EntityId, SessionId};

struct Staging {
    facts: BufWriter<File>,
    stamps: BufWriter<File>,
}

struct JsonlState {
    staging: Option<Staging>,
    /// Stamp id per opened session, indexed by session id.
    sessions: Vec<EntityId>,
    facts_written: usize,
    stamps_written: usize,
}

/// Directory store writing one JSON object per line.
///
/// Facts go to `facts.jsonl` and distinct stamps to `stamps.jsonl`. Both are
/// written to `.partial` siblings while the run is in progress and renamed
/// into place by the commit, so an aborted run leaves no committed output.
pub struct JsonLinesStore {
    dir: PathBuf,
    state: Mutex<JsonlState>,
}

impl JsonLinesStore {
    /// Create `dir` if needed and open fresh staging files inside it.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let staging = Staging {
            facts: BufWriter::new(File::create(staging_path(&dir, FACTS_FILE))?),
            stamps: BufWriter::new(File::create(staging_path(&dir, STAMPS_FILE))?),
        };
        Ok(Self {
            dir,
            state: Mutex::new(JsonlState {
                staging: Some(staging),
                sessions: Vec::new(),
                facts_written: 0,
                stamps_written: 0,
            }),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Committed fact log.
    pub fn facts_path(&self) -> PathBuf {
        self.dir.join(FACTS_FILE)
    }

    /// Committed stamp records.
    pub fn stamps_path(&self) -> PathBuf {
        self.dir.join(STAMPS_FILE)
    }

    fn lock(&self) -> MutexGuard<'_, JsonlState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn staging_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{STAGING_SUFFIX}"))
}

fn write_line<T: Serialize>(writer: &mut BufWriter<File>, value: &T) -> Result<(), StoreError> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}

impl VersionedStore for JsonLinesStore {
    fn open_session(&self, stamp: &Stamp) -> Result<SessionId, StoreError> {
        let mut state = self.lock();
        if state.staging.is_none() {
            return Err(StoreError::AlreadyCommitted);
        }
        state.sessions.push(stamp.id());
        Ok((state.sessions.len() - 1) as SessionId)
    }

    fn compose(&self, session: SessionId, fact: Fact) -> Result<(), StoreError> {
        let mut state = self.lock();
        let stamp_id = *state
            .sessions
            .get(session as usize)
            .ok_or(StoreError::UnknownSession(session))?;
        let staging = state.staging.as_mut().ok_or(StoreError::AlreadyCommitted)?;
        write_line(&mut staging.facts, &FactLine { stamp_id, fact })?;
        state.facts_written += 1;
        Ok(())
    }

    fn put_raw_record(&self, record: &StampRecord) -> Result<(), StoreError> {
        let mut state = self.lock();
        let staging = state.staging.as_mut().ok_or(StoreError::AlreadyCommitted)?;
        write_line(&mut staging.stamps, record)?;
        state.stamps_written += 1;
        Ok(())
    }

    fn commit_all_sessions(&self) -> Result<CommitSummary, StoreError> {
        let mut state = self.lock();
        let mut staging = state.staging.take().ok_or(StoreError::AlreadyCommitted)?;
        staging.facts.flush()?;
        staging.stamps.flush()?;
        staging.facts.get_ref().sync_all()?;
        staging.stamps.get_ref().sync_all()?;
        drop(staging);

        fs::rename(staging_path(&self.dir, FACTS_FILE), self.facts_path())?;
        fs::rename(staging_path(&self.dir, STAMPS_FILE), self.stamps_path())?;
        debug!(
            dir = %self.dir.display(),
            facts = state.facts_written,
            stamps = state.stamps_written,
            "[rf2:store] committed json-lines output"
        );
        Ok(CommitSummary {
            sessions: state.sessions.len(),
            facts: state.facts_written,
            stamps: state.stamps_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Status;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn stamp() -> Stamp {
        Stamp {
            status: Status::Inactive,
            time: 1_012_435_200,
            author: Uuid::from_u128(1),
            module: Uuid::from_u128(2),
            path: Uuid::from_u128(3),
        }
    }

    #[test]
    fn output_appears_only_after_commit() {
        let temp = tempdir().unwrap();
        let store = JsonLinesStore::create(temp.path().join("out")).unwrap();
        let session = store.open_session(&stamp()).unwrap();
        store
            .compose(session, Fact::concept(Uuid::from_u128(9)))
            .unwrap();
        store.put_raw_record(&stamp().record()).unwrap();
        assert!(!store.facts_path().exists());
        assert!(staging_path(store.dir(), FACTS_FILE).exists());

        let summary = store.commit_all_sessions().unwrap();
        assert_eq!(summary.facts, 1);
        assert_eq!(summary.stamps, 1);
        assert!(!staging_path(store.dir(), FACTS_FILE).exists());

        let facts = fs::read_to_string(store.facts_path()).unwrap();
        let line: FactLine = serde_json::from_str(facts.trim_end()).unwrap();
        assert_eq!(line.stamp_id, stamp().id());
        assert_eq!(line.fact, Fact::concept(Uuid::from_u128(9)));

        let stamps = fs::read_to_string(store.stamps_path()).unwrap();
        let record: StampRecord = serde_json::from_str(stamps.trim_end()).unwrap();
        assert_eq!(record.stamp, stamp());
        assert_eq!(record.status_concept, Status::Inactive.concept().id());
    }

    #[test]
    fn second_commit_is_rejected() {
        let temp = tempdir().unwrap();
        let store = JsonLinesStore::create(temp.path()).unwrap();
        store.commit_all_sessions().unwrap();
        assert!(matches!(
            store.commit_all_sessions(),
            Err(StoreError::AlreadyCommitted)
        ));
        assert!(matches!(
            store.open_session(&stamp()),
            Err(StoreError::AlreadyCommitted)
        ));
    }
}
