use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::FieldIds;
use crate::result::ResultNode;
use crate::result::ResultNodeVariant;
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
use indexmap::IndexMap;
use inherent::inherent;
use std::sync::Arc;

type Result<T> = std::result::Result<T, StitchError>;

/// One argument of a hydration call, fed from the source field whose
/// response key is `value_key`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HydrationArgument {
    pub name: String,
    pub value_key: String,
}
impl HydrationArgument {
    pub fn new(name: impl AsRef<str>, value_key: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            value_key: value_key.as_ref().to_string(),
        }
    }
}

/// An overall field whose value comes from a separate call to another
/// service, with arguments taken from sibling "source" fields of the
/// underlying result.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HydrationTransformation {
    #[serde(default)]
    pub(crate) arguments: Vec<HydrationArgument>,
    pub(crate) definition: FieldCoordinate,
    pub(crate) id: TransformationId,

    #[serde(default)]
    pub(crate) original_field_ids: FieldIds,
    pub(crate) result_key: String,
    pub(crate) service_name: String,
    pub(crate) top_level_field: String,
}
impl HydrationTransformation {
    pub fn arguments(&self) -> &[HydrationArgument] {
        self.arguments.as_slice()
    }

    /// Maps the merged value of a hydration input onto the arguments of the
    /// hydration call. Missing source values become `null`.
    pub fn arguments_for(&self, input: &ResultNode) -> IndexMap<String, serde_json::Value> {
        let values = input.completed_value().and_then(|value| value.as_object());
        self.arguments
            .iter()
            .map(|arg| {
                let value = values
                    .and_then(|values| values.get(&arg.value_key))
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                (arg.name.to_string(), value)
            })
            .collect()
    }

    pub fn new(
        id: TransformationId,
        definition: FieldCoordinate,
        service_name: impl AsRef<str>,
        top_level_field: impl AsRef<str>,
    ) -> Self {
        Self {
            arguments: vec![],
            result_key: definition.field_name.to_string(),
            definition,
            id,
            original_field_ids: FieldIds::new(),
            service_name: service_name.as_ref().to_string(),
            top_level_field: top_level_field.as_ref().to_string(),
        }
    }

    pub fn service_name(&self) -> &str {
        self.service_name.as_str()
    }

    pub fn top_level_field(&self) -> &str {
        self.top_level_field.as_str()
    }

    pub fn with_argument(mut self, argument: HydrationArgument) -> Self {
        self.arguments.push(argument);
        self
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

    fn input_node(
        &self,
        merged: &ResultNode,
        path: ResultPath,
        alias: Option<String>,
        field_def: &Arc<FieldDefinition>,
        field_ids: &FieldIds,
        batched: bool,
    ) -> ResultNode {
        let mut errors = vec![];
        let mut leaf = merged;
        while leaf.is_object() && !leaf.is_null() {
            let Some(child) = leaf.children().first() else {
                break;
            };
            errors.extend(leaf.errors().iter().cloned());
            leaf = child;
        }
        errors.extend(leaf.errors().iter().cloned());

        let builder =
            if leaf.is_null() || !leaf.is_leaf() {
                ResultNode::leaf()
                    .completed_value(serde_json::Value::Null)
                    .is_null(true)
            } else {
                ResultNode::hydration_input(self.id, batched)
                    .completed_value(
                        leaf.completed_value()
                            .cloned()
                            .unwrap_or(serde_json::Value::Null),
                    )
            };

        builder
            .path(path)
            .alias(alias)
            .object_type(field_def.parent_type_name())
            .field_definition(field_def.clone())
            .field_ids(field_ids.iter().copied())
            .errors(errors)
            .build()
    }
}

#[inherent]
impl FieldTransformationTrait for HydrationTransformation {
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

    /// Turns a node whose value was already merged from its sources into
    /// the input(s) of the hydration call: one input for a scalar-sourced
    /// hydration, a list of inputs for a list-sourced one. A null source
    /// yields a null leaf instead of an input.
    pub fn unapply(
        &self,
        node: &ResultNode,
        group: &[&FieldTransformation],
        env: &UnapplyEnvironment<'_>,
    ) -> Result<UnapplyResult> {
        let field_def = overall_field_definition(env, &self.definition)?;
        let path = env.parent_path().segment(&self.result_key);
        let alias = alias_for_result_key(&self.result_key, &field_def);
        let field_ids = group_field_ids(group);

        let node =
            if node.is_list() {
                let elements = node.children()
                    .iter()
                    .enumerate()
                    .map(|(idx, element)| self.input_node(
                        element,
                        path.index(idx),
                        alias.clone(),
                        &field_def,
                        &field_ids,
                        env.batched,
                    ))
                    .collect();
                node.to_builder()
                    .variant(ResultNodeVariant::List)
                    .path(path)
                    .alias(alias)
                    .object_type(field_def.parent_type_name())
                    .field_definition(field_def.clone())
                    .field_ids(field_ids.iter().copied())
                    .children(elements)
                    .build()
            } else {
                self.input_node(node, path, alias, &field_def, &field_ids, env.batched)
            };

        Ok(UnapplyResult {
            node,
            traversal: TraversalControl::Abort,
        })
    }
}
