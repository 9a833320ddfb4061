use std::collections::HashMap;
use uuid::Uuid;

use crate::constants::starter::AUTHOR_NAME;
use crate::transport::fs::Traversal;
use crate::types::{EntityId, LegacyCode};

/// Settings for one transformation run.
#[derive(Clone, Debug)]
pub struct TransformConfig {
    /// Origin namespace seeding every text-derived id (author, starter concepts).
    pub namespace: Uuid,
    /// Name of the authoring agent; its id is text-derived under `namespace`.
    pub author_name: String,
    /// Discovery depth below the input directory.
    pub traversal: Traversal,
    /// Follow symlinks while discovering release files.
    pub follow_links: bool,
    /// Abort the whole run on the first failed file.
    pub strict: bool,
    /// Transform files on the rayon pool.
    pub parallel: bool,
    /// Reject grouped files whose ids are not contiguous.
    pub validate_group_order: bool,
    /// Legacy codes forced onto existing target ids.
    pub overrides: HashMap<LegacyCode, EntityId>,
}

impl TransformConfig {
    /// Lenient sequential run under `namespace`.
    pub fn new(namespace: Uuid) -> Self {
        Self {
            namespace,
            author_name: AUTHOR_NAME.to_string(),
            traversal: Traversal::TopLevel,
            follow_links: false,
            strict: false,
            parallel: false,
            validate_group_order: true,
            overrides: HashMap::new(),
        }
    }

    /// Name the authoring agent.
    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = author_name.into();
        self
    }

    /// Set discovery depth.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Follow symlinks during discovery.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Abort on the first failed file.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Transform files concurrently.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Toggle the sorted-group check.
    pub fn with_validate_group_order(mut self, validate: bool) -> Self {
        self.validate_group_order = validate;
        self
    }

    /// Add one override, replacing an existing entry for `code`.
    pub fn with_override(mut self, code: impl Into<LegacyCode>, target: EntityId) -> Self {
        self.overrides.insert(code.into(), target);
        self
    }

    /// Add every override from `overrides`.
    pub fn with_overrides(mut self, overrides: HashMap<LegacyCode, EntityId>) -> Self {
        self.overrides.extend(overrides);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_sequential_and_validating() {
        let config = TransformConfig::new(Uuid::nil());
        assert_eq!(config.author_name, AUTHOR_NAME);
        assert_eq!(config.traversal, Traversal::TopLevel);
        assert!(!config.follow_links);
        assert!(!config.strict);
        assert!(!config.parallel);
        assert!(config.validate_group_order);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn builders_override_defaults() {
        let target = Uuid::from_u128(3);
        let config = TransformConfig::new(Uuid::nil())
            .with_traversal(Traversal::Recursive)
            .with_follow_links(true)
            .with_strict(true)
            .with_parallel(true)
            .with_validate_group_order(false)
            .with_override("138875005", target);
        assert_eq!(config.traversal, Traversal::Recursive);
        assert!(config.follow_links);
        assert!(config.strict && config.parallel);
        assert!(!config.validate_group_order);
        assert_eq!(config.overrides["138875005"], target);
    }
}
