use crate::engine::ServiceResultStitcher;
use crate::engine::StitchContext;
use crate::ids::FieldId;
use crate::ids::NormalizedFieldId;
use crate::ids::TransformationId;
use crate::normalized::NormalizedField;
use crate::normalized::NormalizedQuery;
use crate::result::GraphQLError;
use crate::result::ResultNode;
use crate::result::ResultPath;
use crate::schema::FieldCoordinate;
use crate::schema::Schema;
use crate::StitchError;
use crate::stitch_case::RawNode;
use crate::stitch_case::StitchCaseError;
use crate::transformation::FieldMetadata;
use crate::transformation::FieldTransformation;
use crate::transformation::RemovedField;
use crate::transformation::TransformationMetadata;
use crate::transformation::TransformationRegistry;
use crate::transformation::TypeRenames;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, StitchCaseError>;

/// Everything one stitching run needs, described as a JSON document.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct StitchCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artificial_field_marker: Option<String>,

    /// When present the tree is converted with `convert_children` rather
    /// than `convert`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_children: Option<ConvertChildrenSpec>,

    #[serde(default)]
    pub field_metadata: Vec<FieldMetadataEntry>,

    #[serde(default)]
    pub normalized_fields: Vec<NormalizedFieldSpec>,

    pub overall_schema: String,

    #[serde(default)]
    pub removed_fields: Vec<RemovedFieldEntry>,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default)]
    pub transformations: Vec<RegisteredTransformation>,

    pub tree: RawNode,

    /// Overall type name to underlying type name.
    #[serde(default)]
    pub type_renames: IndexMap<String, String>,

    pub underlying_schema: String,
}

fn default_service_name() -> String {
    "service".to_string()
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ConvertChildrenSpec {
    #[serde(default)]
    pub batched: bool,

    #[serde(default)]
    pub correct_root_path: ResultPath,

    #[serde(default)]
    pub is_hydration_transformation: bool,

    #[serde(default)]
    pub normalized_root_field: Option<NormalizedFieldId>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldMetadataEntry {
    pub field_id: FieldId,

    #[serde(default = "default_root")]
    pub root: bool,
    pub transformation_id: TransformationId,
}

fn default_root() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NormalizedFieldSpec {
    #[serde(default)]
    pub alias: Option<String>,

    /// Name of the field in the overall schema.
    pub field: String,

    #[serde(default)]
    pub field_ids: Vec<FieldId>,
    pub id: NormalizedFieldId,

    /// Declaring type of `field` in the overall schema.
    pub object_type: String,

    #[serde(default)]
    pub parent: Option<NormalizedFieldId>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RegisteredTransformation {
    /// The underlying field the transformation was applied to.
    pub field_id: FieldId,
    pub transformation: FieldTransformation,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RemovedFieldEntry {
    pub error: GraphQLError,
    pub normalized_field: NormalizedFieldId,
    pub parent: NormalizedFieldId,
}

impl StitchCase {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = std::fs::read_to_string(file_path)
            .map_err(|err| StitchCaseError::FileReadError {
                file: file_path.to_path_buf(),
                err: err.to_string(),
            })?;
        Self::from_json_str(content.as_str())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|err| StitchCaseError::ParseError { err: err.to_string() })
    }

    /// Builds every collaborator described by this case.
    pub fn prepare(&self) -> Result<PreparedStitchCase> {
        let overall_schema = build_schema(&self.overall_schema, "overall")?;
        let underlying_schema = build_schema(&self.underlying_schema, "underlying")?;

        let type_renames = self.type_renames.iter().collect::<TypeRenames>();

        let mut registry = TransformationRegistry::new();
        for registered in &self.transformations {
            registry.register(registered.transformation.clone(), registered.field_id)?;
        }

        let mut metadata = TransformationMetadata::new();
        for entry in &self.field_metadata {
            metadata.add_field_metadata(
                entry.field_id,
                FieldMetadata::new(entry.transformation_id, entry.root),
            );
        }
        for entry in &self.removed_fields {
            metadata.add_removed_field(entry.parent, RemovedField {
                normalized_field: entry.normalized_field,
                error: entry.error.clone(),
            });
        }

        let mut normalized_query = NormalizedQuery::new();
        for spec in &self.normalized_fields {
            let field_def = overall_schema
                .field_by_name(&spec.object_type, &spec.field)
                .ok_or_else(|| StitchCaseError::UnknownOverallField {
                    coordinate: FieldCoordinate::new(&spec.object_type, &spec.field),
                })?;
            let mut field = NormalizedField::new(spec.id, &spec.object_type, field_def.clone())
                .with_alias(spec.alias.clone())
                .with_field_ids(spec.field_ids.iter().copied());
            if let Some(parent) = spec.parent {
                field = field.with_parent(parent);
            }
            normalized_query.add_field(field)?;
        }

        let mut context = StitchContext::builder().normalized_query(normalized_query);
        if let Some(marker) = &self.artificial_field_marker {
            context = context.artificial_field_marker(marker);
        }

        let tree = self.tree.to_result_node(&underlying_schema)?;

        Ok(PreparedStitchCase {
            context: context.build(),
            convert_children: self.convert_children.clone(),
            metadata,
            overall_schema,
            registry,
            service_name: self.service_name.to_string(),
            tree,
            type_renames,
        })
    }
}

fn build_schema(sdl: &str, schema_role: &'static str) -> Result<Schema> {
    Schema::builder()
        .load_str(Some(PathBuf::from(format!("{schema_role}.graphql"))), sdl)
        .and_then(|builder| builder.build())
        .map_err(|err| StitchCaseError::SchemaBuildError { err, schema_role })
}

/// A [`StitchCase`] with all of its collaborators built.
#[derive(Clone, Debug)]
pub struct PreparedStitchCase {
    context: StitchContext,
    convert_children: Option<ConvertChildrenSpec>,
    metadata: TransformationMetadata,
    overall_schema: Schema,
    registry: TransformationRegistry,
    service_name: String,
    tree: ResultNode,
    type_renames: TypeRenames,
}
impl PreparedStitchCase {
    pub fn context(&self) -> &StitchContext {
        &self.context
    }

    pub fn overall_schema(&self) -> &Schema {
        &self.overall_schema
    }

    pub fn registry(&self) -> &TransformationRegistry {
        &self.registry
    }

    /// Stitches the raw tree.
    pub fn run(&self) -> std::result::Result<ResultNode, StitchError> {
        let stitcher = self.stitcher();
        match &self.convert_children {
            Some(spec) => {
                let normalized_root_field = match spec.normalized_root_field {
                    Some(id) => Some(
                        self.context
                            .normalized_query()
                            .field(id)
                            .ok_or(StitchError::UnknownNormalizedField { id })?,
                    ),
                    None => None,
                };
                let correct_root = ResultNode::object()
                    .path(spec.correct_root_path.clone())
                    .build();
                stitcher.convert_children(
                    &self.tree,
                    normalized_root_field,
                    &correct_root,
                    spec.is_hydration_transformation,
                    spec.batched,
                )
            },

            None => stitcher.convert(&self.tree, &ResultNode::root().build()),
        }
    }

    pub fn service_name(&self) -> &str {
        self.service_name.as_str()
    }

    pub fn stitcher(&self) -> ServiceResultStitcher<'_> {
        ServiceResultStitcher::new(
            &self.overall_schema,
            &self.registry,
            &self.metadata,
            &self.type_renames,
            &self.context,
        )
    }

    pub fn tree(&self) -> &ResultNode {
        &self.tree
    }
}
