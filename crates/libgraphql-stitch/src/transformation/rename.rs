use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::FieldIds;
use crate::result::GraphQLError;
use crate::result::ResultNode;
use crate::result::ResultPath;
use crate::schema::FieldCoordinate;
use crate::schema::FieldDefinition;
use crate::StitchError;
use crate::transformation::field_transformation::alias_for_result_key;
use crate::transformation::field_transformation::group_field_ids;
use crate::transformation::field_transformation::overall_field_definition;
use crate::transformation::FieldTransformation;
use crate::transformation::FieldTransformationTrait;
use crate::transformation::TraversalControl;
use crate::transformation::UnapplyEnvironment;
use crate::transformation::UnapplyResult;
use inherent::inherent;
use std::sync::Arc;

type Result<T> = std::result::Result<T, StitchError>;

/// An overall field backed by a differently-named (and possibly nested)
/// underlying field, e.g. `title: String @renamed(from: "details.name")`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RenameTransformation {
    pub(crate) definition: FieldCoordinate,
    pub(crate) id: TransformationId,

    #[serde(default)]
    pub(crate) original_field_ids: FieldIds,
    pub(crate) result_key: String,

    /// The underlying field names from the overall field's parent down to
    /// the field that actually holds the value.
    pub(crate) underlying_path: Vec<String>,
}
impl RenameTransformation {
    /// `underlying_path` is dot-separated, e.g. `"details.name"`.
    pub fn new(
        id: TransformationId,
        definition: FieldCoordinate,
        underlying_path: &str,
    ) -> Self {
        Self {
            result_key: definition.field_name.to_string(),
            definition,
            id,
            original_field_ids: FieldIds::new(),
            underlying_path: underlying_path.split('.').map(str::to_string).collect(),
        }
    }

    pub fn underlying_path(&self) -> &[String] {
        self.underlying_path.as_slice()
    }

    pub fn with_original_field_ids(
        mut self,
        field_ids: impl IntoIterator<Item = FieldId>,
    ) -> Self {
        self.original_field_ids = field_ids.into_iter().collect();
        self
    }

    pub fn with_result_key(mut self, result_key: impl AsRef<str>) -> Self {
        self.result_key = result_key.as_ref().to_string();
        self
    }
}

#[inherent]
impl FieldTransformationTrait for RenameTransformation {
    pub fn definition(&self) -> &FieldCoordinate {
        &self.definition
    }

    pub fn id(&self) -> TransformationId {
        self.id
    }

    pub fn original_field_ids(&self) -> &[FieldId] {
        self.original_field_ids.as_slice()
    }

    pub fn result_key(&self) -> &str {
        self.result_key.as_str()
    }

    /// Follows the underlying path down from `node` and reports the node
    /// found there under the overall field.
    ///
    /// The walk stops early at a null, in which case the null is what gets
    /// reported. Errors met along the way are kept.
    pub fn unapply(
        &self,
        node: &ResultNode,
        group: &[&FieldTransformation],
        env: &UnapplyEnvironment<'_>,
    ) -> Result<UnapplyResult> {
        let field_def = overall_field_definition(env, &self.definition)?;

        let mut errors = vec![];
        let mut reached = node;
        for _ in 1..self.underlying_path.len() {
            if reached.is_null() || !reached.is_object() {
                break;
            }
            let Some(child) = reached.children().first() else {
                break;
            };
            errors.extend(reached.errors().iter().cloned());
            reached = child;
        }
        errors.extend(reached.errors().iter().cloned());

        log::trace!(
            "unapplied rename `{}` onto `{}` ({} underlying level(s))",
            self.id,
            self.definition,
            self.underlying_path.len(),
        );

        let path = env.parent_path().segment(&self.result_key);
        let alias = alias_for_result_key(&self.result_key, &field_def);
        let node = rewrite_to_overall_field(
            reached,
            path,
            alias,
            &field_def,
            &group_field_ids(group),
            errors,
        );

        Ok(UnapplyResult {
            node,
            traversal: TraversalControl::Continue,
        })
    }
}

/// Rebinds `node` to the overall field definition. Elements of a list are
/// rebound too, since they carry the same field as their list.
fn rewrite_to_overall_field(
    node: &ResultNode,
    path: ResultPath,
    alias: Option<String>,
    field_def: &Arc<FieldDefinition>,
    field_ids: &FieldIds,
    errors: Vec<GraphQLError>,
) -> ResultNode {
    let mut builder = node.to_builder();
    if node.is_list() {
        let elements = node.children()
            .iter()
            .enumerate()
            .map(|(idx, element)| rewrite_to_overall_field(
                element,
                path.index(idx),
                alias.clone(),
                field_def,
                field_ids,
                element.errors().to_vec(),
            ))
            .collect();
        builder = builder.children(elements);
    }

    builder
        .path(path)
        .alias(alias)
        .object_type(field_def.parent_type_name())
        .field_definition(field_def.clone())
        .field_ids(field_ids.iter().copied())
        .errors(errors)
        .build()
}
