//! Target-side concepts and patterns that transformed facts point at.
//!
//! Each term's identifier is UUID v5 over [`VOCABULARY_NAMESPACE`] and the
//! term's canonical name, so the ids are fixed for every run and every
//! implementation that uses the same namespace and names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::identity::VOCABULARY_NAMESPACE;
use crate::identity::derive_from_text;
use crate::types::EntityId;

/// Closed set of target vocabulary terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vocabulary {
    /// Status of active versions.
    ActiveState,
    /// Status of inactive versions.
    InactiveState,
    /// English.
    EnglishLanguage,
    /// Spanish.
    SpanishLanguage,
    /// Case may be ignored.
    DescriptionNotCaseSensitive,
    /// Case is significant.
    DescriptionCaseSensitive,
    /// Only the first character's case is significant.
    DescriptionInitialCharacterCaseSensitive,
    /// Text definition.
    DefinitionDescriptionType,
    /// Fully qualified name.
    FullyQualifiedNameDescriptionType,
    /// Synonym.
    RegularNameDescriptionType,
    /// US English acceptability.
    UsDialectPattern,
    /// GB English acceptability.
    GbDialectPattern,
    /// Preferred in a dialect.
    Preferred,
    /// Acceptable in a dialect.
    Acceptable,
    /// Path of every transformed stamp.
    DevelopmentPath,
    /// Root path.
    PrimordialPath,
    /// Root module.
    PrimordialModule,
    /// Generic user.
    User,
    /// Parent of identifier sources.
    IdentifierSource,
    /// UUID identifier source.
    UniversallyUniqueIdentifier,
}

impl Vocabulary {
    /// Canonical name hashed into the term's identifier.
    pub fn name(self) -> &'static str {
        match self {
            Vocabulary::ActiveState => "Active state",
            Vocabulary::InactiveState => "Inactive state",
            Vocabulary::EnglishLanguage => "English language",
            Vocabulary::SpanishLanguage => "Spanish language",
            Vocabulary::DescriptionNotCaseSensitive => "Description not case sensitive",
            Vocabulary::DescriptionCaseSensitive => "Description case sensitive",
            Vocabulary::DescriptionInitialCharacterCaseSensitive => {
                "Description initial character case sensitive"
            }
            Vocabulary::DefinitionDescriptionType => "Definition description type",
            Vocabulary::FullyQualifiedNameDescriptionType => "Fully qualified name description type",
            Vocabulary::RegularNameDescriptionType => "Regular name description type",
            Vocabulary::UsDialectPattern => "US Dialect Pattern",
            Vocabulary::GbDialectPattern => "GB Dialect Pattern",
            Vocabulary::Preferred => "Preferred",
            Vocabulary::Acceptable => "Acceptable",
            Vocabulary::DevelopmentPath => "Development path",
            Vocabulary::PrimordialPath => "Primordial path",
            Vocabulary::PrimordialModule => "Primordial module",
            Vocabulary::User => "User",
            Vocabulary::IdentifierSource => "Identifier Source",
            Vocabulary::UniversallyUniqueIdentifier => "Universally Unique Identifier",
        }
    }

    /// Identifier of this term.
    pub fn id(self) -> EntityId {
        derive_from_text(&VOCABULARY_NAMESPACE, self.name())
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [Vocabulary; 20] = [
        Vocabulary::ActiveState,
        Vocabulary::InactiveState,
        Vocabulary::EnglishLanguage,
        Vocabulary::SpanishLanguage,
        Vocabulary::DescriptionNotCaseSensitive,
        Vocabulary::DescriptionCaseSensitive,
        Vocabulary::DescriptionInitialCharacterCaseSensitive,
        Vocabulary::DefinitionDescriptionType,
        Vocabulary::FullyQualifiedNameDescriptionType,
        Vocabulary::RegularNameDescriptionType,
        Vocabulary::UsDialectPattern,
        Vocabulary::GbDialectPattern,
        Vocabulary::Preferred,
        Vocabulary::Acceptable,
        Vocabulary::DevelopmentPath,
        Vocabulary::PrimordialPath,
        Vocabulary::PrimordialModule,
        Vocabulary::User,
        Vocabulary::IdentifierSource,
        Vocabulary::UniversallyUniqueIdentifier,
    ];

    #[test]
    fn every_term_has_a_distinct_id() {
        let ids: HashSet<EntityId> = ALL.iter().map(|term| term.id()).collect();
        assert_eq!(ids.len(), ALL.len());
    }

    #[test]
    fn ids_are_name_based_v5() {
        let id = Vocabulary::DevelopmentPath.id();
        assert_eq!(id.get_version_num(), 5);
        assert_eq!(id, Vocabulary::DevelopmentPath.id());
    }
}
