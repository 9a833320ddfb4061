#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner behind the `rf2-transform` binary.
pub mod app;
/// Run configuration.
pub mod config;
/// Release codes and column layouts.
pub mod constants;
/// Fact payloads and their persisted forms.
pub mod data;
mod hash;
/// Deterministic identifier derivation and code overrides.
pub mod identity;
/// Closed code tables.
pub mod lookup;
/// Run driver and reports.
pub mod pipeline;
/// Embedded reference rewriting for axiom text.
pub mod rewrite;
/// Provenance tuples.
pub mod stamp;
/// Bootstrap concepts.
pub mod starter;
/// Versioned store seam and implementations.
pub mod store;
/// Per-file row transformation.
pub mod transform;
/// Input discovery (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Target vocabulary terms.
pub mod vocabulary;

mod errors;

pub use config::TransformConfig;
pub use data::{DescriptionFields, Fact, FactLine, FactPayload, VersionedFact};
pub use errors::{IdentityError, LookupError, StoreError, TransformError};
pub use identity::{IdentityResolver, derive_from_code, derive_from_text, load_overrides};
pub use pipeline::{FileOutcome, FileReport, Pipeline, RunReport};
pub use rewrite::rewrite_references;
pub use stamp::{Stamp, StampAssembler, StampRecord, Status};
pub use starter::{StarterConcepts, compose_starter_data};
pub use store::{CommitSummary, Composer, InMemoryStore, JsonLinesStore, Session, VersionedStore};
pub use transform::{FileKind, FileOptions, FileStats, transform_file, transform_reader};
pub use transport::fs::{ReleaseFiles, Traversal};
pub use types::{EntityId, EpochSeconds, GroupKey, LegacyCode, SessionId, Term};
pub use vocabulary::Vocabulary;
