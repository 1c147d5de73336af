use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::FieldIds;
use crate::result::ResultNode;
use crate::schema::FieldCoordinate;
use crate::schema::FieldDefinition;
use crate::StitchError;
use crate::transformation::HydrationTransformation;
use crate::transformation::RenameTransformation;
use crate::transformation::UnapplyEnvironment;
use crate::transformation::UnapplyResult;
use std::sync::Arc;

type Result<T> = std::result::Result<T, StitchError>;

/// Behavior shared by every kind of [`FieldTransformation`].
pub(crate) trait FieldTransformationTrait {
    /// The overall-schema field this transformation was declared on.
    /// Transformations with the same definition are unapplied as one group.
    fn definition(&self) -> &FieldCoordinate;
    fn id(&self) -> TransformationId;

    /// The field identifiers of the client query selections this
    /// transformation was created for.
    fn original_field_ids(&self) -> &[FieldId];

    /// The response key (alias or field name) of the client's selection.
    fn result_key(&self) -> &str;

    /// Turns an underlying-shaped node back into the overall-shaped node.
    ///
    /// `group` holds every transformation sharing this one's definition
    /// (including this one).
    fn unapply(
        &self,
        node: &ResultNode,
        group: &[&FieldTransformation],
        env: &UnapplyEnvironment<'_>,
    ) -> Result<UnapplyResult>;
}

/// A field-level transformation applied when the client query was
/// translated into an underlying service's query.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldTransformation {
    Rename(RenameTransformation),
    Hydration(HydrationTransformation),
}
impl FieldTransformation {
    pub fn as_hydration(&self) -> Option<&HydrationTransformation> {
        if let Self::Hydration(hydration) = self {
            Some(hydration)
        } else {
            None
        }
    }

    pub fn as_rename(&self) -> Option<&RenameTransformation> {
        if let Self::Rename(rename) = self {
            Some(rename)
        } else {
            None
        }
    }

    pub fn definition(&self) -> &FieldCoordinate {
        match self {
            Self::Hydration(t) => t.definition(),
            Self::Rename(t) => t.definition(),
        }
    }

    pub fn id(&self) -> TransformationId {
        match self {
            Self::Hydration(t) => t.id(),
            Self::Rename(t) => t.id(),
        }
    }

    pub fn is_hydration(&self) -> bool {
        matches!(self, Self::Hydration(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Hydration(_) => "hydration",
            Self::Rename(_) => "rename",
        }
    }

    pub fn original_field_ids(&self) -> &[FieldId] {
        match self {
            Self::Hydration(t) => t.original_field_ids(),
            Self::Rename(t) => t.original_field_ids(),
        }
    }

    pub fn result_key(&self) -> &str {
        match self {
            Self::Hydration(t) => t.result_key(),
            Self::Rename(t) => t.result_key(),
        }
    }

    pub fn unapply(
        &self,
        node: &ResultNode,
        group: &[&FieldTransformation],
        env: &UnapplyEnvironment<'_>,
    ) -> Result<UnapplyResult> {
        match self {
            Self::Hydration(t) => t.unapply(node, group, env),
            Self::Rename(t) => t.unapply(node, group, env),
        }
    }
}
impl std::convert::From<HydrationTransformation> for FieldTransformation {
    fn from(value: HydrationTransformation) -> Self {
        Self::Hydration(value)
    }
}
impl std::convert::From<RenameTransformation> for FieldTransformation {
    fn from(value: RenameTransformation) -> Self {
        Self::Rename(value)
    }
}

/// The alias an unapplied node is reported under: none when the client
/// selected the field under its own name.
pub(crate) fn alias_for_result_key(
    result_key: &str,
    field_def: &FieldDefinition,
) -> Option<String> {
    if result_key == field_def.name() {
        None
    } else {
        Some(result_key.to_string())
    }
}

/// The union of the original field identifiers of a transformation group,
/// in first-seen order.
pub(crate) fn group_field_ids(group: &[&FieldTransformation]) -> FieldIds {
    let mut field_ids = FieldIds::new();
    for transformation in group {
        for field_id in transformation.original_field_ids() {
            if !field_ids.contains(field_id) {
                field_ids.push(*field_id);
            }
        }
    }
    field_ids
}

pub(crate) fn overall_field_definition(
    env: &UnapplyEnvironment<'_>,
    coordinate: &FieldCoordinate,
) -> Result<Arc<FieldDefinition>> {
    env.overall_schema
        .field(coordinate)
        .cloned()
        .ok_or_else(|| StitchError::UnknownOverallField {
            coordinate: coordinate.clone(),
        })
}
