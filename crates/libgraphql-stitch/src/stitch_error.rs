use crate::ids::NormalizedFieldId;
use crate::ids::TransformationId;
use crate::result::GraphQLError;
use crate::result::ResultPath;
use crate::schema::FieldCoordinate;
use thiserror::Error;

/// An invariant violation detected while stitching.
///
/// These indicate that the query plan and the underlying result disagree in
/// a way a correctly-built plan never produces. They abort the conversion
/// of the whole tree; callers surface them with
/// [`StitchError::to_graphql_error()`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StitchError {
    #[error("Normalized field `{id}` was added to the normalized query more than once")]
    DuplicateNormalizedField {
        id: NormalizedFieldId,
    },

    #[error("Transformation `{transformation_id}` was registered more than once")]
    DuplicateTransformation {
        transformation_id: TransformationId,
    },

    #[error(
        "Transformations declared on `{coordinate}` matched no result nodes \
        next to `{path}`"
    )]
    EmptyTransformationGroup {
        coordinate: FieldCoordinate,
        path: ResultPath,
    },

    #[error(
        "Expected hydration source `{source_key}` at `{path}` to return \
        {expected_shape}"
    )]
    HydrationSourceShapeMismatch {
        expected_shape: String,
        path: ResultPath,
        source_key: String,
    },

    #[error("Result node at `{path}` has no field definition")]
    MissingFieldDefinition {
        path: ResultPath,
    },

    #[error("No normalized field matches the result node at `{path}`")]
    NormalizedFieldNotFound {
        path: ResultPath,
    },

    #[error("The root of a result tree cannot be deleted")]
    RootDeleted,

    #[error("The root of a result tree cannot produce sibling nodes")]
    RootSiblings,

    #[error(
        "Expected exactly one group of hydration source nodes at `{path}` \
        but found {count}"
    )]
    UnexpectedHydrationSourceGroups {
        count: usize,
        path: ResultPath,
    },

    #[error("A removed-field record references unknown normalized field `{id}`")]
    UnknownNormalizedField {
        id: NormalizedFieldId,
    },

    #[error("The overall schema defines no field `{coordinate}`")]
    UnknownOverallField {
        coordinate: FieldCoordinate,
    },

    #[error("Transformation `{transformation_id}` is referenced but was never registered")]
    UnknownTransformation {
        transformation_id: TransformationId,
    },
}
impl StitchError {
    /// The internal-error result surfaced to a caller for this violation.
    pub fn to_graphql_error(&self) -> GraphQLError {
        GraphQLError::new(self.to_string())
            .with_extension("classification", "InternalError")
    }
}
