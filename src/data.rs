use serde::{Deserialize, Serialize};

use crate::stamp::Stamp;
use crate::vocabulary::Vocabulary;

pub use crate::types::{EntityId, Term};

/// Fact body. Every concept-valued field holds a derived identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactPayload {
    /// The entity exists as a concept.
    Concept,
    /// Description (or text definition) of `concept`.
    Description {
        /// Described concept.
        concept: EntityId,
        /// Language concept.
        language: EntityId,
        /// Description text.
        text: Term,
        /// Case significance concept.
        case_significance: EntityId,
        /// Description type concept.
        description_type: EntityId,
    },
    /// Identifier assertion on the entity.
    Identifier {
        /// Identifier source concept.
        source: EntityId,
        /// Identifier as written by the source.
        value: String,
    },
    /// Logical definition axiom of `concept`, references already rewritten.
    Axiom {
        /// Axiom subject.
        concept: EntityId,
        /// OWL functional syntax.
        text: Term,
    },
    /// Dialect acceptability of `description`.
    Dialect {
        /// Description the acceptability applies to.
        description: EntityId,
        /// Dialect pattern.
        pattern: EntityId,
        /// Preferred or acceptable.
        acceptability: EntityId,
    },
}

/// A fact as composed into a session; the session supplies the stamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Entity the fact is about.
    pub entity: EntityId,
    /// Fact body.
    #[serde(flatten)]
    pub payload: FactPayload,
}

impl Fact {
    /// Concept existence fact.
    pub fn concept(entity: EntityId) -> Self {
        Self {
            entity,
            payload: FactPayload::Concept,
        }
    }

    /// Identifier assertion from `source`.
    pub fn identifier(entity: EntityId, source: EntityId, value: impl Into<String>) -> Self {
        Self {
            entity,
            payload: FactPayload::Identifier {
                source,
                value: value.into(),
            },
        }
    }

    /// UUID identifier assertion carrying the entity's own canonical text.
    pub fn uuid_identifier(entity: EntityId) -> Self {
        Self::identifier(
            entity,
            Vocabulary::UniversallyUniqueIdentifier.id(),
            entity.to_string(),
        )
    }

    /// Description of `concept`.
    pub fn description(entity: EntityId, concept: EntityId, description: DescriptionFields) -> Self {
        Self {
            entity,
            payload: FactPayload::Description {
                concept,
                language: description.language.id(),
                text: description.text,
                case_significance: description.case_significance.id(),
                description_type: description.description_type.id(),
            },
        }
    }

    /// OWL axiom of `concept`.
    pub fn axiom(entity: EntityId, concept: EntityId, text: impl Into<Term>) -> Self {
        Self {
            entity,
            payload: FactPayload::Axiom {
                concept,
                text: text.into(),
            },
        }
    }

    /// Dialect acceptability of a description.
    pub fn dialect(
        entity: EntityId,
        description: EntityId,
        pattern: Vocabulary,
        acceptability: Vocabulary,
    ) -> Self {
        Self {
            entity,
            payload: FactPayload::Dialect {
                description,
                pattern: pattern.id(),
                acceptability: acceptability.id(),
            },
        }
    }

    /// Short kind label used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self.payload {
            FactPayload::Concept => "concept",
            FactPayload::Description { .. } => "description",
            FactPayload::Identifier { .. } => "identifier",
            FactPayload::Axiom { .. } => "axiom",
            FactPayload::Dialect { .. } => "dialect",
        }
    }
}

/// Resolved description fields before they become ids.
#[derive(Clone, Debug)]
pub struct DescriptionFields {
    /// Language term.
    pub language: Vocabulary,
    /// Description text.
    pub text: Term,
    /// Case significance term.
    pub case_significance: Vocabulary,
    /// Description type term.
    pub description_type: Vocabulary,
}

/// Committed fact: entity, provenance, payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedFact {
    /// Session stamp.
    pub stamp: Stamp,
    /// Composed fact.
    #[serde(flatten)]
    pub fact: Fact,
}

/// Persisted line of the JSON-lines fact log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactLine {
    /// Id of the persisted stamp record.
    pub stamp_id: EntityId,
    /// Composed fact.
    #[serde(flatten)]
    pub fact: Fact,
}
