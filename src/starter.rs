//! Bootstrap concepts the transformed release depends on.
//!
//! Two concepts are composed in one primordial session: the collaboration
//! author every transformed stamp names, and the LOINC Number identifier
//! source.

use crate::constants::starter::{
    AUTHOR_DEFINITION, AUTHOR_FQN, AUTHOR_NAME, LOINC_NUMBER_DEFINITION, LOINC_NUMBER_FQN,
    LOINC_NUMBER_SEED, LOINC_NUMBER_SYNONYM,
};
use crate::data::{DescriptionFields, Fact};
use crate::errors::StoreError;
use crate::identity::derive_from_text;
use crate::stamp::{Stamp, Status};
use crate::store::Composer;
use crate::types::{EntityId, EpochSeconds};
use crate::vocabulary::Vocabulary;

/// Ids of the composed starter concepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarterConcepts {
    /// Author concept.
    pub author: EntityId,
    /// LOINC Number identifier concept.
    pub loinc_number: EntityId,
}

struct StarterConcept<'a> {
    id: EntityId,
    fqn: &'a str,
    synonym: &'a str,
    definition: &'a str,
    parent: Vocabulary,
}

/// Compose the starter concepts into one session stamped at `time`.
///
/// The author concept reuses the composer's author id so transformed stamps
/// point at it.
pub fn compose_starter_data(
    composer: &Composer<'_>,
    time: EpochSeconds,
) -> Result<StarterConcepts, StoreError> {
    let ids = StarterConcepts {
        author: composer.stamps().author(),
        loinc_number: composer.resolver().resolve_text(LOINC_NUMBER_SEED),
    };
    let session = composer.open(Stamp {
        status: Status::Active,
        time,
        author: Vocabulary::User.id(),
        module: Vocabulary::PrimordialModule.id(),
        path: Vocabulary::PrimordialPath.id(),
    })?;

    let concepts = [
        StarterConcept {
            id: ids.author,
            fqn: AUTHOR_FQN,
            synonym: AUTHOR_NAME,
            definition: AUTHOR_DEFINITION,
            parent: Vocabulary::User,
        },
        StarterConcept {
            id: ids.loinc_number,
            fqn: LOINC_NUMBER_FQN,
            synonym: LOINC_NUMBER_SYNONYM,
            definition: LOINC_NUMBER_DEFINITION,
            parent: Vocabulary::IdentifierSource,
        },
    ];
    for concept in concepts {
        for fact in starter_facts(&concept) {
            session.compose(fact)?;
        }
    }
    Ok(ids)
}

fn starter_facts(concept: &StarterConcept<'_>) -> Vec<Fact> {
    let description = |text: &str, description_type: Vocabulary| {
        Fact::description(
            derive_from_text(&concept.id, text),
            concept.id,
            DescriptionFields {
                language: Vocabulary::EnglishLanguage,
                text: text.to_string(),
                case_significance: Vocabulary::DescriptionNotCaseSensitive,
                description_type,
            },
        )
    };
    vec![
        Fact::concept(concept.id),
        description(concept.fqn, Vocabulary::FullyQualifiedNameDescriptionType),
        description(concept.synonym, Vocabulary::RegularNameDescriptionType),
        description(concept.definition, Vocabulary::DefinitionDescriptionType),
        Fact::uuid_identifier(concept.id),
        Fact::axiom(
            derive_from_text(&concept.id, "SubClassOf"),
            concept.id,
            format!("SubClassOf(:{} :{})", concept.id, concept.parent.id()),
        ),
    ]
}
