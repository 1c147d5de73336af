use crate::ids::FieldId;
use crate::ids::NormalizedFieldId;
use crate::normalized::NormalizedField;
use crate::result::ResultNode;
use crate::StitchError;
use indexmap::IndexMap;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, StitchError>;

/// A read-only, schema-resolved view of the client's query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedQuery {
    by_field_id: HashMap<FieldId, Vec<NormalizedFieldId>>,
    fields: IndexMap<NormalizedFieldId, NormalizedField>,
}
impl NormalizedQuery {
    pub fn add_field(&mut self, field: NormalizedField) -> Result<()> {
        let id = field.id();
        if self.fields.contains_key(&id) {
            return Err(StitchError::DuplicateNormalizedField { id });
        }
        for field_id in field.field_ids() {
            self.by_field_id.entry(*field_id).or_default().push(id);
        }
        self.fields.insert(id, field);
        Ok(())
    }

    pub fn field(&self, id: NormalizedFieldId) -> Option<&NormalizedField> {
        self.fields.get(&id)
    }

    /// Resolves the normalized field a result node stands for.
    ///
    /// A field identifier alone is ambiguous under polymorphic fan-out, so
    /// the candidates for the node's first identifier are narrowed to the
    /// one with the node's declaring type and field definition.
    pub fn field_for_result_node(&self, node: &ResultNode) -> Result<&NormalizedField> {
        let not_found = || StitchError::NormalizedFieldNotFound {
            path: node.path().clone(),
        };
        let field_id = node.field_ids().first().ok_or_else(not_found)?;
        let field_def = node.field_definition().ok_or_else(not_found)?;

        self.fields_for_field_id(*field_id)
            .find(|field| {
                Some(field.object_type()) == node.object_type()
                    && field.field_definition() == field_def
            })
            .ok_or_else(not_found)
    }

    pub fn fields(&self) -> impl Iterator<Item = &NormalizedField> {
        self.fields.values()
    }

    pub fn fields_for_field_id(
        &self,
        field_id: FieldId,
    ) -> impl Iterator<Item = &NormalizedField> {
        self.by_field_id
            .get(&field_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.fields.get(id))
    }

    pub fn new() -> Self {
        Self::default()
    }
}
