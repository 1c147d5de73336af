use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::StitchError;
use crate::transformation::FieldTransformation;
use indexmap::IndexMap;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, StitchError>;

/// Every transformation of one query plan, by id, along with the field
/// identifier of the underlying field each one was applied to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformationRegistry {
    field_ids: HashMap<TransformationId, FieldId>,
    transformations: IndexMap<TransformationId, FieldTransformation>,
}
impl TransformationRegistry {
    /// The field identifier the transformation was registered against.
    pub fn field_id(&self, transformation_id: TransformationId) -> Option<FieldId> {
        self.field_ids.get(&transformation_id).copied()
    }

    pub fn get(&self, transformation_id: TransformationId) -> Option<&FieldTransformation> {
        self.transformations.get(&transformation_id)
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        transformation: impl Into<FieldTransformation>,
        field_id: FieldId,
    ) -> Result<()> {
        let transformation = transformation.into();
        let transformation_id = transformation.id();
        if self.transformations.contains_key(&transformation_id) {
            return Err(StitchError::DuplicateTransformation { transformation_id });
        }
        self.field_ids.insert(transformation_id, field_id);
        self.transformations.insert(transformation_id, transformation);
        Ok(())
    }

    /// Like [`TransformationRegistry::get()`], but a missing entry is an
    /// invariant violation.
    pub fn transformation(
        &self,
        transformation_id: TransformationId,
    ) -> Result<&FieldTransformation> {
        self.get(transformation_id)
            .ok_or(StitchError::UnknownTransformation { transformation_id })
    }

    pub fn transformations(&self) -> impl Iterator<Item = &FieldTransformation> {
        self.transformations.values()
    }
}
