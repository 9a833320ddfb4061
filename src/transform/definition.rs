use crate::constants::columns::description::COUNT;
use crate::data::Fact;
use crate::errors::RowError;
use crate::identity::IdentityResolver;
use crate::transform::description::{DescriptionIds, description_fields};
use crate::transform::{Row, RowTransformer};

/// Text definitions, grouped by definition id.
///
/// The first row of a group fixes the definition entity and the concept it
/// defines; every row of the group composes its own description fact.
pub struct DefinitionTransformer;

impl RowTransformer for DefinitionTransformer {
    type Group = DescriptionIds;

    const COLUMNS: usize = COUNT;
    const GROUPED: bool = true;

    fn open_group(&self, row: &Row<'_>, resolver: &IdentityResolver) -> Result<DescriptionIds, RowError> {
        DescriptionIds::from_row(row, resolver)
    }

    fn row_facts(
        &self,
        ids: &DescriptionIds,
        row: &Row<'_>,
        _resolver: &IdentityResolver,
    ) -> Result<Vec<Fact>, RowError> {
        Ok(vec![Fact::description(
            ids.description,
            ids.concept,
            description_fields(row)?,
        )])
    }
}
