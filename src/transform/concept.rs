use crate::constants::codes::SNOMED_INTEGER_ID_SCHEME;
use crate::constants::columns::concept::COUNT;
use crate::data::Fact;
use crate::errors::RowError;
use crate::identity::IdentityResolver;
use crate::transform::{Row, RowTransformer};
use crate::types::EntityId;

/// Concept group: the concept id and the integer id it was derived from.
pub struct ConceptGroup {
    concept: EntityId,
    integer_id_source: EntityId,
}

/// Composes one concept per concept id.
///
/// Later rows of the same id open their own sessions but add no facts.
pub struct ConceptTransformer;

impl RowTransformer for ConceptTransformer {
    type Group = ConceptGroup;

    const COLUMNS: usize = COUNT;
    const GROUPED: bool = true;

    fn open_group(&self, row: &Row<'_>, resolver: &IdentityResolver) -> Result<ConceptGroup, RowError> {
        Ok(ConceptGroup {
            concept: resolver.resolve_code(row.id())?,
            integer_id_source: resolver.resolve_code(SNOMED_INTEGER_ID_SCHEME)?,
        })
    }

    fn group_facts(&self, group: &ConceptGroup, row: &Row<'_>) -> Result<Vec<Fact>, RowError> {
        Ok(vec![
            Fact::concept(group.concept),
            Fact::uuid_identifier(group.concept),
            Fact::identifier(group.concept, group.integer_id_source, row.id()),
        ])
    }
}
