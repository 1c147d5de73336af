use crate::ids::FieldId;
use crate::ids::NormalizedFieldId;
use crate::ids::TransformationId;
use crate::result::GraphQLError;
use std::collections::HashMap;

/// Ties one field identifier to one transformation.
///
/// A field selected by the planner *because of* a transformation (e.g. the
/// sub-selections of a renamed field, or a hydration source field) carries
/// that transformation with `root_of_transformation = false`. Only the field
/// the transformation was declared on carries it as the root.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldMetadata {
    pub transformation_id: TransformationId,
    pub root_of_transformation: bool,
}
impl FieldMetadata {
    pub fn new(transformation_id: TransformationId, root_of_transformation: bool) -> Self {
        Self {
            transformation_id,
            root_of_transformation,
        }
    }
}

/// A field the overall query expects under some parent but that the
/// underlying query never asked for (filtered or failed during planning).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RemovedField {
    pub normalized_field: NormalizedFieldId,
    pub error: GraphQLError,
}

/// Per-query-plan bookkeeping about which transformations apply to which
/// field identifiers, and which fields were removed under which parent.
///
/// Built once by the planner and only read during stitching.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformationMetadata {
    metadata_by_field_id: HashMap<FieldId, Vec<FieldMetadata>>,
    removed_fields: HashMap<NormalizedFieldId, Vec<RemovedField>>,
}
impl TransformationMetadata {
    pub fn add_field_metadata(&mut self, field_id: FieldId, metadata: FieldMetadata) {
        let entries = self.metadata_by_field_id.entry(field_id).or_default();
        if !entries.contains(&metadata) {
            entries.push(metadata);
        }
    }

    pub fn add_removed_field(
        &mut self,
        parent: NormalizedFieldId,
        removed_field: RemovedField,
    ) {
        self.removed_fields.entry(parent).or_default().push(removed_field);
    }

    pub fn field_metadata(&self, field_id: FieldId) -> &[FieldMetadata] {
        self.metadata_by_field_id
            .get(&field_id)
            .map(|entries| entries.as_slice())
            .unwrap_or_default()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed_fields_for_parent(&self, parent: NormalizedFieldId) -> &[RemovedField] {
        self.removed_fields
            .get(&parent)
            .map(|removed| removed.as_slice())
            .unwrap_or_default()
    }

    /// The transformations declared directly on `field_id`.
    pub fn root_transformation_ids(&self, field_id: FieldId) -> Vec<TransformationId> {
        self.field_metadata(field_id)
            .iter()
            .filter(|metadata| metadata.root_of_transformation)
            .map(|metadata| metadata.transformation_id)
            .collect()
    }

    /// Every transformation `field_id` takes part in, root or not.
    pub fn transformation_ids(&self, field_id: FieldId) -> Vec<TransformationId> {
        self.field_metadata(field_id)
            .iter()
            .map(|metadata| metadata.transformation_id)
            .collect()
    }
}
