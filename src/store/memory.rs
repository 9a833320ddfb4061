use std::sync::{Mutex, MutexGuard};

use crate::data::{Fact, VersionedFact};
use crate::errors::StoreError;
use crate::stamp::{Stamp, StampRecord};
use crate::store::{CommitSummary, VersionedStore};
use crate::types::SessionId;

#[derive(Default)]
struct MemoryState {
    sessions: Vec<(Stamp, Vec<Fact>)>,
    raw_records: Vec<StampRecord>,
    committed: Vec<VersionedFact>,
    commit_count: usize,
    load_phase_open: bool,
    load_phases_ended: usize,
}

/// Store that keeps everything in process memory.
///
/// Accessors expose what was staged and committed so callers can assert on it.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Facts made durable by the commit, in session order.
    pub fn committed_facts(&self) -> Vec<VersionedFact> {
        self.lock().committed.clone()
    }

    /// Facts composed but not yet committed.
    pub fn pending_facts(&self) -> usize {
        let state = self.lock();
        if state.commit_count > 0 {
            return 0;
        }
        state.sessions.iter().map(|(_, facts)| facts.len()).sum()
    }

    /// Stamp records handed over by the commit.
    pub fn raw_records(&self) -> Vec<StampRecord> {
        self.lock().raw_records.clone()
    }

    /// Sessions opened so far.
    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    /// Commits performed.
    pub fn commit_count(&self) -> usize {
        self.lock().commit_count
    }

    /// True between begin and end of the load phase.
    pub fn is_load_phase_open(&self) -> bool {
        self.lock().load_phase_open
    }

    /// Number of times the load phase was ended.
    pub fn load_phases_ended(&self) -> usize {
        self.lock().load_phases_ended
    }
}

impl VersionedStore for InMemoryStore {
    fn begin_load_phase(&self) -> Result<(), StoreError> {
        self.lock().load_phase_open = true;
        Ok(())
    }

    fn open_session(&self, stamp: &Stamp) -> Result<SessionId, StoreError> {
        let mut state = self.lock();
        if state.commit_count > 0 {
            return Err(StoreError::AlreadyCommitted);
        }
        state.sessions.push((*stamp, Vec::new()));
        Ok((state.sessions.len() - 1) as SessionId)
    }

    fn compose(&self, session: SessionId, fact: Fact) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.commit_count > 0 {
            return Err(StoreError::AlreadyCommitted);
        }
        let (_, facts) = state
            .sessions
            .get_mut(session as usize)
            .ok_or(StoreError::UnknownSession(session))?;
        facts.push(fact);
        Ok(())
    }

    fn put_raw_record(&self, record: &StampRecord) -> Result<(), StoreError> {
        self.lock().raw_records.push(record.clone());
        Ok(())
    }

    fn commit_all_sessions(&self) -> Result<CommitSummary, StoreError> {
        let mut state = self.lock();
        if state.commit_count > 0 {
            return Err(StoreError::AlreadyCommitted);
        }
        let committed: Vec<VersionedFact> = state
            .sessions
            .iter()
            .flat_map(|(stamp, facts)| {
                facts.iter().map(move |fact| VersionedFact {
                    stamp: *stamp,
                    fact: fact.clone(),
                })
            })
            .collect();
        let summary = CommitSummary {
            sessions: state.sessions.len(),
            facts: committed.len(),
            stamps: state.raw_records.len(),
        };
        state.committed = committed;
        state.commit_count += 1;
        Ok(summary)
    }

    fn end_load_phase(&self) {
        let mut state = self.lock();
        state.load_phase_open = false;
        state.load_phases_ended += 1;
    }
}
