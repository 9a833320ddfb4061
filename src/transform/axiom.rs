use crate::constants::columns::axiom::{COUNT, OWL_EXPRESSION, REFERENCED_COMPONENT_ID};
use crate::data::Fact;
use crate::errors::RowError;
use crate::identity::IdentityResolver;
use crate::rewrite::rewrite_references;
use crate::transform::{Row, RowTransformer};
use crate::types::EntityId;

/// OWL expression refset rows: one axiom fact each, references rewritten.
pub struct AxiomTransformer;

impl RowTransformer for AxiomTransformer {
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
        let concept = resolver.resolve_code(row.get(REFERENCED_COMPONENT_ID))?;
        let text = rewrite_references(row.get(OWL_EXPRESSION), resolver)?;
        Ok(vec![Fact::axiom(*member, concept, text.into_owned())])
    }
}

#[cfg(test)]
mod tests {
    use crate::data::FactPayload;
    use crate::identity::derive_from_code;
    use crate::store::InMemoryStore;
    use crate::transform::{FileKind, FileOptions, test_support, transform_reader};
    use std::path::Path;

    #[test]
    fn axiom_text_is_rewritten() {
        let member = "0b8e52d4-77a1-4c3f-8d26-e1f93a5bc408";
        let content = format!(
            "header\n{member}\t20190731\t1\t900000000000207008\t733073007\t609096000\tSubClassOf(:609096000 :410662002)\n"
        );
        let store = InMemoryStore::new();
        let composer = test_support::composer(&store);
        transform_reader(
            FileKind::Axiom,
            content.as_bytes(),
            Path::new("sct2_sRefset_OWLExpressionSnapshot.txt"),
            &composer,
            FileOptions::default(),
        )
        .unwrap();
        composer.commit().unwrap();

        let committed = store.committed_facts();
        assert_eq!(committed[0].fact.entity, derive_from_code(member).unwrap());
        assert_eq!(
            committed[0].fact.payload,
            FactPayload::Axiom {
                concept: derive_from_code("609096000").unwrap(),
                text: format!(
                    "SubClassOf(:{} :{})",
                    derive_from_code("609096000").unwrap(),
                    derive_from_code("410662002").unwrap()
                ),
            }
        );
    }
}
