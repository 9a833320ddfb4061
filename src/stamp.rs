//! STAMP (status, time, author, module, path) assembly and deduplication.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

use crate::constants::codes::ACTIVE_FLAG;
use crate::constants::identity::STAMP_NAMESPACE;
use crate::errors::RowError;
use crate::identity::{IdentityResolver, derive_from_text};
use crate::types::{EntityId, EpochSeconds};
use crate::vocabulary::Vocabulary;

/// Lifecycle status of a fact version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Current version.
    Active,
    /// Retired version.
    Inactive,
}

impl Status {
    /// `"1"` is active; every other flag is inactive.
    pub fn from_flag(flag: &str) -> Self {
        if flag == ACTIVE_FLAG {
            Status::Active
        } else {
            Status::Inactive
        }
    }

    /// Target vocabulary concept for this status.
    pub fn concept(self) -> Vocabulary {
        match self {
            Status::Active => Vocabulary::ActiveState,
            Status::Inactive => Vocabulary::InactiveState,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => f.write_str("active"),
            Status::Inactive => f.write_str("inactive"),
        }
    }
}

/// Provenance tuple carried by every versioned fact.
///
/// Equality is full field equality; equal tuples are one tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    /// Lifecycle status.
    pub status: Status,
    /// Effective time, seconds since the Unix epoch (UTC).
    pub time: EpochSeconds,
    /// Authoring agent.
    pub author: EntityId,
    /// Owning module.
    pub module: EntityId,
    /// Development path.
    pub path: EntityId,
}

impl Stamp {
    /// Content-addressed id of this tuple.
    pub fn id(&self) -> EntityId {
        let canonical = format!(
            "{}|{}|{}|{}|{}",
            self.status, self.time, self.author, self.module, self.path
        );
        derive_from_text(&STAMP_NAMESPACE, &canonical)
    }

    /// Persisted form of this tuple.
    pub fn record(&self) -> StampRecord {
        StampRecord {
            id: self.id(),
            status_concept: self.status.concept().id(),
            stamp: *self,
        }
    }
}

/// Raw persisted form of a stamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampRecord {
    /// Content-addressed stamp id.
    pub id: EntityId,
    /// Vocabulary concept of the status.
    pub status_concept: EntityId,
    /// The tuple itself.
    #[serde(flatten)]
    pub stamp: Stamp,
}

/// Parse a release effective time (`YYYYMMDD`, exactly eight digits) to UTC midnight.
///
/// Returns `None` for any other shape or an impossible calendar date.
pub fn parse_effective_time(value: &str) -> Option<EpochSeconds> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

/// Builds stamps from row fields and keeps the run-wide distinct set.
///
/// Safe to share across file tasks; the set is mutex-guarded and keeps first
/// insertion order so persisted output is stable for sequential runs.
pub struct StampAssembler {
    author: EntityId,
    path: EntityId,
    seen: Mutex<IndexSet<Stamp>>,
}

impl StampAssembler {
    /// Assembler for stamps by `author` on `path`.
    pub fn new(author: EntityId, path: EntityId) -> Self {
        Self {
            author,
            path,
            seen: Mutex::new(IndexSet::new()),
        }
    }

    /// Author of every assembled stamp.
    pub fn author(&self) -> EntityId {
        self.author
    }

    /// Path of every assembled stamp.
    pub fn path(&self) -> EntityId {
        self.path
    }

    /// Build a stamp from raw row fields. Pure; does not register the stamp.
    pub(crate) fn assemble(
        &self,
        status_flag: &str,
        effective_time: &str,
        module_code: &str,
        resolver: &IdentityResolver,
    ) -> Result<Stamp, RowError> {
        let time = parse_effective_time(effective_time)
            .ok_or_else(|| RowError::MalformedDate(effective_time.to_string()))?;
        Ok(Stamp {
            status: Status::from_flag(status_flag),
            time,
            author: self.author,
            module: resolver.resolve_code(module_code)?,
            path: self.path,
        })
    }

    /// Record `stamp` as used. Returns `true` the first time a tuple is seen.
    pub fn register(&self, stamp: Stamp) -> bool {
        self.lock().insert(stamp)
    }

    /// Distinct stamps registered so far, in first-seen order.
    pub fn distinct(&self) -> Vec<Stamp> {
        self.lock().iter().copied().collect()
    }

    /// Distinct stamps registered so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True before the first registration.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexSet<Stamp>> {
        // A poisoned set still holds valid stamps; keep using it.
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
