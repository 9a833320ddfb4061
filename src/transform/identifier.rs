use crate::constants::codes::ALTERNATE_ID_SCHEME;
use crate::constants::columns::identifier::{COUNT, REFERENCED_COMPONENT_ID};
use crate::data::Fact;
use crate::errors::RowError;
use crate::identity::IdentityResolver;
use crate::transform::{Row, RowTransformer};
use crate::types::EntityId;

/// Identifier group: the referenced concept and the alternate id source.
pub struct IdentifierGroup {
    concept: EntityId,
    source: EntityId,
}

/// Alternate identifiers, grouped by the alternate id in column 0.
///
/// Each group asserts the referenced concept and attaches the alternate id to
/// it; later rows of the group only contribute their sessions.
pub struct IdentifierTransformer;

impl RowTransformer for IdentifierTransformer {
    type Group = IdentifierGroup;

    const COLUMNS: usize = COUNT;
    const GROUPED: bool = true;

    fn open_group(&self, row: &Row<'_>, resolver: &IdentityResolver) -> Result<IdentifierGroup, RowError> {
        Ok(IdentifierGroup {
            concept: resolver.resolve_code(row.get(REFERENCED_COMPONENT_ID))?,
            source: resolver.resolve_code(ALTERNATE_ID_SCHEME)?,
        })
    }

    fn group_facts(&self, group: &IdentifierGroup, row: &Row<'_>) -> Result<Vec<Fact>, RowError> {
        Ok(vec![
            Fact::concept(group.concept),
            Fact::uuid_identifier(group.concept),
            Fact::identifier(group.concept, group.source, row.id()),
        ])
    }
}
