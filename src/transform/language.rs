use crate::constants::columns::language::{ACCEPTABILITY_ID, COUNT, REFERENCED_COMPONENT_ID, REFSET_ID};
use crate::data::Fact;
use crate::errors::RowError;
use crate::identity::IdentityResolver;
use crate::lookup;
use crate::transform::{Row, RowTransformer};
use crate::types::EntityId;

/// Language refset rows: one dialect acceptability fact each.
pub struct LanguageTransformer;

impl RowTransformer for LanguageTransformer {
    type Group = EntityId;

    const COLUMNS: usize = COUNT;
    const GROUPED: bool = false;

    fn open_group(&self, row: &Row<'_>, resolver: &IdentityResolver) -> Result<EntityId, RowError> {
        Ok(resolver.resolve_code(row.id())?)
    }

    fn row_facts(
        &self,
        member: &EntityId,
        row: &Row<'_>,
        resolver: &IdentityResolver,
    ) -> Result<Vec<Fact>, RowError> {
        let description = resolver.resolve_code(row.get(REFERENCED_COMPONENT_ID))?;
        Ok(vec![Fact::dialect(
            *member,
            description,
            lookup::dialect_pattern(row.get(REFSET_ID))?,
            lookup::acceptability(row.get(ACCEPTABILITY_ID))?,
        )])
    }
}
