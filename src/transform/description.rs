use crate::constants::columns::description::{
    CASE_SIGNIFICANCE_ID, CONCEPT_ID, COUNT, LANGUAGE_CODE, TERM, TYPE_ID,
};
use crate::data::{DescriptionFields, Fact};
use crate::errors::RowError;
use crate::identity::IdentityResolver;
use crate::lookup;
use crate::transform::{Row, RowTransformer};
use crate::types::EntityId;

/// Resolve the language, term, case significance and type columns of a
/// description-shaped row.
pub(crate) fn description_fields(row: &Row<'_>) -> Result<DescriptionFields, RowError> {
    Ok(DescriptionFields {
        language: lookup::language(row.get(LANGUAGE_CODE))?,
        text: row.get(TERM).to_string(),
        case_significance: lookup::case_significance(row.get(CASE_SIGNIFICANCE_ID))?,
        description_type: lookup::description_type(row.get(TYPE_ID))?,
    })
}

/// Description row ids: the description entity and the concept it describes.
pub struct DescriptionIds {
    pub(crate) description: EntityId,
    pub(crate) concept: EntityId,
}

impl DescriptionIds {
    pub(crate) fn from_row(row: &Row<'_>, resolver: &IdentityResolver) -> Result<Self, RowError> {
        Ok(Self {
            description: resolver.resolve_code(row.id())?,
            concept: resolver.resolve_code(row.get(CONCEPT_ID))?,
        })
    }
}

/// Composes one description fact per row.
pub struct DescriptionTransformer;

impl RowTransformer for DescriptionTransformer {
    type Group = DescriptionIds;

    const COLUMNS: usize = COUNT;
    const GROUPED: bool = false;

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
