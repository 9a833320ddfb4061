//! Deterministic identifier derivation.
//!
//! Two schemes, never mixed for one logical entity:
//!
//! - content-addressed from a legacy code: RFC 4122 version 3 built from the
//!   MD5 digest of `"org.snomed." + code` (primary numeric codes and refset
//!   member UUIDs) or `"org.loinc." + code` (dash-extended secondary codes).
//!   No namespace bytes are hashed, which matches the name-based construction
//!   existing terminology tooling already uses for SNOMED CT ids.
//! - namespace-seeded from text: RFC 4122 version 5 over the namespace bytes and
//!   the UTF-8 text.
//!
//! Both render as canonical lowercase hyphenated hex.

use md5::{Digest, Md5};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use uuid::{Builder, Uuid};

use crate::constants::identity::{PRIMARY_CODE_PREFIX, SECONDARY_CODE_PREFIX};
use crate::constants::files::DELIMITER;
use crate::errors::{IdentityError, TransformError};
use crate::types::{EntityId, LegacyCode};

/// Grammar classes of a legacy code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeForm {
    /// One or more ASCII digits (SNOMED CT id).
    Primary,
    /// Digits followed by one or more `-digits` groups (LOINC code).
    Secondary,
    /// Canonical hyphenated UUID (refset member id).
    Member,
}

impl CodeForm {
    /// Classify `code`, or `None` when it is outside the grammar.
    pub fn classify(code: &str) -> Option<Self> {
        if is_digits(code) {
            return Some(CodeForm::Primary);
        }
        let mut groups = code.split('-');
        let head_is_digits = groups.next().is_some_and(is_digits);
        if head_is_digits && code.contains('-') && groups.all(is_digits) {
            return Some(CodeForm::Secondary);
        }
        if code.len() == 36 && Uuid::try_parse(code).is_ok() {
            return Some(CodeForm::Member);
        }
        None
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn name_based_md5(prefix: &str, code: &str) -> EntityId {
    let mut hasher = Md5::new();
    hasher.update(prefix.as_bytes());
    hasher.update(code.as_bytes());
    Builder::from_md5_bytes(hasher.finalize().into()).into_uuid()
}

/// Content-addressed identifier for a legacy code.
pub fn derive_from_code(code: &str) -> Result<EntityId, IdentityError> {
    match CodeForm::classify(code) {
        Some(CodeForm::Primary | CodeForm::Member) => Ok(name_based_md5(PRIMARY_CODE_PREFIX, code)),
        Some(CodeForm::Secondary) => Ok(name_based_md5(SECONDARY_CODE_PREFIX, code)),
        None => Err(IdentityError::UnrecognizedCodeForm(code.to_string())),
    }
}

/// Namespace-seeded identifier for free text.
pub fn derive_from_text(namespace: &Uuid, text: &str) -> EntityId {
    Uuid::new_v5(namespace, text.as_bytes())
}

/// Code resolution with an externally supplied override table.
///
/// Overrides force specific legacy codes onto existing target entities (for
/// example a release root concept onto a bootstrap concept). The table is
/// never populated implicitly.
#[derive(Clone, Debug)]
pub struct IdentityResolver {
    namespace: Uuid,
    overrides: HashMap<LegacyCode, EntityId>,
}

impl IdentityResolver {
    /// Resolver for an origin `namespace` with no overrides.
    pub fn new(namespace: Uuid) -> Self {
        Self {
            namespace,
            overrides: HashMap::new(),
        }
    }

    /// Add one override.
    pub fn with_override(mut self, code: impl Into<LegacyCode>, target: EntityId) -> Self {
        self.overrides.insert(code.into(), target);
        self
    }

    /// Add every override from `overrides`, replacing existing entries.
    pub fn with_overrides(mut self, overrides: HashMap<LegacyCode, EntityId>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Identifier for a legacy code, honouring overrides.
    pub fn resolve_code(&self, code: &str) -> Result<EntityId, IdentityError> {
        match self.overrides.get(code) {
            Some(target) => Ok(*target),
            None => derive_from_code(code),
        }
    }

    /// Identifier for free text under the origin namespace.
    pub fn resolve_text(&self, text: &str) -> EntityId {
        derive_from_text(&self.namespace, text)
    }
}

/// Load a two-column `legacy code<TAB>uuid` override table.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn load_overrides(path: &Path) -> Result<HashMap<LegacyCode, EntityId>, TransformError> {
    let raw = fs::read_to_string(path).map_err(|source| TransformError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut overrides = HashMap::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((code, target)) = line.split_once(DELIMITER) else {
            return Err(TransformError::Configuration(format!(
                "{}:{}: expected 'code<TAB>uuid'",
                path.display(),
                idx + 1
            )));
        };
        let target = Uuid::try_parse(target.trim()).map_err(|err| {
            TransformError::Configuration(format!(
                "{}:{}: invalid override target: {err}",
                path.display(),
                idx + 1
            ))
        })?;
        overrides.insert(code.trim().to_string(), target);
    }
    Ok(overrides)
}
