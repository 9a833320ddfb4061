/// Legacy identifier token exactly as it appears in a release row.
/// Examples: `609096000`, `40316-2`, `8f1d...-...` (refset member UUID)
pub type LegacyCode = String;
/// Target-space identifier for every graph entity and stamp.
/// Example: `051fbfed-3c40-3130-8c09-889cb7b7b5b6`
pub type EntityId = uuid::Uuid;
/// Opaque handle for a session opened on a versioned store.
pub type SessionId = u64;
/// Seconds since the Unix epoch, UTC.
/// Example: `1012435200` (2002-01-31)
pub type EpochSeconds = i64;
/// Group key taken from the legacy row id column.
/// Example: `609096000`
pub type GroupKey = String;
/// Free text carried by description and axiom facts.
/// Example: `SubClassOf(:<uuid> :<uuid>)`
pub type Term = String;
