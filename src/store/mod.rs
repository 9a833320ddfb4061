//! Versioned store collaborator interface and the composer that drives it.
//!
//! Ownership model:
//! - `VersionedStore` is the persistence seam. The transformation core only
//!   opens sessions, composes facts into them, hands over raw stamp records and
//!   asks for one commit.
//! - `Composer` is what transformers see: it assembles stamps, registers them in
//!   the run-wide distinct set, and opens one session per row.

use crate::data::Fact;
use crate::errors::StoreError;
use crate::identity::IdentityResolver;
use crate::stamp::{Stamp, StampAssembler, StampRecord};
use crate::types::SessionId;

/// In-memory store for tests and embedding.
pub mod memory;
/// JSON-lines directory store.
pub mod jsonl;

pub use jsonl::JsonLinesStore;
pub use memory::InMemoryStore;

/// Counts reported by a commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Sessions committed.
    pub sessions: usize,
    /// Facts committed.
    pub facts: usize,
    /// Stamp records persisted.
    pub stamps: usize,
}

/// Persistence collaborator for transformed facts.
///
/// Implementations must be safe to share across file tasks.
pub trait VersionedStore: Send + Sync {
    /// Called once before the first file is transformed.
    fn begin_load_phase(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Open a session whose facts all carry `stamp`.
    fn open_session(&self, stamp: &Stamp) -> Result<SessionId, StoreError>;

    /// Append `fact` to an open session.
    fn compose(&self, session: SessionId, fact: Fact) -> Result<(), StoreError>;

    /// Persist one distinct stamp.
    fn put_raw_record(&self, record: &StampRecord) -> Result<(), StoreError>;

    /// Durably persist every fact composed across every open session.
    fn commit_all_sessions(&self) -> Result<CommitSummary, StoreError>;

    /// Called exactly once when the run ends, on every exit path.
    fn end_load_phase(&self) {}
}

/// Session handle bound to one stamp.
pub struct Session<'c> {
    store: &'c dyn VersionedStore,
    id: SessionId,
    stamp: Stamp,
}

impl Session<'_> {
    /// Store-assigned session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Stamp carried by every fact of the session.
    pub fn stamp(&self) -> &Stamp {
        &self.stamp
    }

    /// Add `fact` to this session.
    pub fn compose(&self, fact: Fact) -> Result<(), StoreError> {
        self.store.compose(self.id, fact)
    }
}

/// Session factory handed to transformers.
pub struct Composer<'s> {
    store: &'s dyn VersionedStore,
    stamps: StampAssembler,
    resolver: IdentityResolver,
}

impl<'s> Composer<'s> {
    /// Composer over `store`.
    pub fn new(store: &'s dyn VersionedStore, stamps: StampAssembler, resolver: IdentityResolver) -> Self {
        Self {
            store,
            stamps,
            resolver,
        }
    }

    /// Identity resolver for the run.
    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Run-wide stamp assembler and distinct set.
    pub fn stamps(&self) -> &StampAssembler {
        &self.stamps
    }

    /// Open a session for `stamp`, registering it in the distinct set.
    pub fn open(&self, stamp: Stamp) -> Result<Session<'s>, StoreError> {
        self.stamps.register(stamp);
        let id = self.store.open_session(&stamp)?;
        Ok(Session {
            store: self.store,
            id,
            stamp,
        })
    }

    /// Hand every distinct stamp to the store, then commit all sessions.
    pub fn commit(&self) -> Result<CommitSummary, StoreError> {
        for stamp in self.stamps.distinct() {
            self.store.put_raw_record(&stamp.record())?;
        }
        self.store.commit_all_sessions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Vocabulary;
    use uuid::Uuid;

    #[test]
    fn commit_persists_each_distinct_stamp_once() {
        let store = InMemoryStore::new();
        let resolver = IdentityResolver::new(Uuid::nil());
        let composer = Composer::new(
            &store,
            StampAssembler::new(Uuid::from_u128(9), Vocabulary::DevelopmentPath.id()),
            resolver,
        );
        let stamp = composer
            .stamps()
            .assemble("1", "20020131", "900000000000207008", composer.resolver())
            .unwrap();

        let first = composer.open(stamp).unwrap();
        first.compose(Fact::concept(Uuid::from_u128(1))).unwrap();
        let second = composer.open(stamp).unwrap();
        second.compose(Fact::concept(Uuid::from_u128(2))).unwrap();
        assert_ne!(first.id(), second.id());

        let summary = composer.commit().unwrap();
        assert_eq!(summary.stamps, 1);
        assert_eq!(summary.facts, 2);
        assert_eq!(store.raw_records().len(), 1);
        let committed = store.committed_facts();
        assert!(committed.iter().all(|fact| fact.stamp == stamp));
    }
}
