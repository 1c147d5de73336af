use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::GraphQLError;
use crate::result::ResultNode;
use crate::result::ResultNodeKind;
use crate::result::ResultNodeVariant;
use crate::result::ResultPath;
use crate::result::RootInfo;
use crate::schema::FieldCoordinate;
use crate::schema::FieldDefinition;
use crate::schema::Schema;
use crate::stitch_case::StitchCaseError;
use std::sync::Arc;

type Result<T> = std::result::Result<T, StitchCaseError>;

/// A serde description of one node of a raw (underlying) result tree.
///
/// `path` may be omitted: it then defaults to the parent's path plus the
/// node's response key (or index, for list elements). List elements that
/// name no field take the field, declaring type and field ids of their list.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RawNode {
    pub kind: ResultNodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default)]
    pub batched: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,

    /// Name of the field in the underlying schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_ids: Vec<FieldId>,

    #[serde(default)]
    pub is_null: bool,

    /// Declaring type of `field` in the underlying schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<ResultPath>,

    /// Only meaningful for `hydration_input` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation_id: Option<TransformationId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// What a list element inherits from its list.
struct ElementDefaults<'n> {
    alias: Option<&'n str>,
    field_definition: Option<&'n Arc<FieldDefinition>>,
    field_ids: &'n [FieldId],
    object_type: Option<&'n str>,
}

impl RawNode {
    /// Resolves this description against the underlying schema.
    pub fn to_result_node(&self, underlying_schema: &Schema) -> Result<ResultNode> {
        self.build(underlying_schema, &ResultPath::root(), None, None)
    }

    fn build(
        &self,
        schema: &Schema,
        parent_path: &ResultPath,
        element_index: Option<usize>,
        element_defaults: Option<&ElementDefaults<'_>>,
    ) -> Result<ResultNode> {
        let inherited = element_defaults.filter(|_| self.field.is_none());

        let alias = self.alias.as_deref().or(inherited.and_then(|d| d.alias));
        let path = match (&self.path, element_index) {
            (Some(path), _) => path.clone(),
            _ if self.kind == ResultNodeKind::Root => ResultPath::root(),
            (None, Some(idx)) => parent_path.index(idx),
            (None, None) => {
                let key = alias.or(self.field.as_deref()).unwrap_or_default();
                parent_path.segment(key)
            },
        };

        let invalid = |reason: &str| StitchCaseError::InvalidNode {
            kind: self.kind,
            path: path.clone(),
            reason: reason.to_string(),
        };

        let (object_type, field_definition) = match (&self.object_type, &self.field) {
            (Some(object_type), Some(field)) => {
                let field_def = schema
                    .field_by_name(object_type, field)
                    .ok_or_else(|| StitchCaseError::UnknownUnderlyingField {
                        coordinate: FieldCoordinate::new(object_type, field),
                    })?;
                (Some(object_type.to_string()), Some(field_def.clone()))
            },
            (None, Some(_)) => return Err(invalid("`field` requires `object_type`")),
            (_, None) => (
                inherited.and_then(|d| d.object_type).map(str::to_string),
                inherited.and_then(|d| d.field_definition).cloned(),
            ),
        };

        let field_ids: Vec<FieldId> =
            if self.field_ids.is_empty() {
                inherited.map(|d| d.field_ids.to_vec()).unwrap_or_default()
            } else {
                self.field_ids.clone()
            };
        if self.kind != ResultNodeKind::Root && field_ids.is_empty() {
            return Err(invalid("non-root nodes need at least one field id"));
        }

        let variant = match self.kind {
            ResultNodeKind::Root => ResultNodeVariant::Root(RootInfo::default()),
            ResultNodeKind::Object => ResultNodeVariant::Object,
            ResultNodeKind::List => ResultNodeVariant::List,
            ResultNodeKind::Leaf => ResultNodeVariant::Leaf,
            ResultNodeKind::HydrationInput => ResultNodeVariant::HydrationInput {
                batched: self.batched,
                transformation_id: self.transformation_id
                    .ok_or_else(|| invalid("`transformation_id` is required"))?,
            },
        };

        let is_value_node = matches!(
            self.kind,
            ResultNodeKind::Leaf | ResultNodeKind::HydrationInput,
        );
        if !is_value_node && !self.children.is_empty() && self.is_null {
            return Err(invalid("null nodes cannot have children"));
        }
        if is_value_node && !self.children.is_empty() {
            return Err(invalid("value nodes cannot have children"));
        }

        let mut children = Vec::with_capacity(self.children.len());
        for (idx, child) in self.children.iter().enumerate() {
            let child =
                if self.kind == ResultNodeKind::List {
                    child.build(schema, &path, Some(idx), Some(&ElementDefaults {
                        alias,
                        field_definition: field_definition.as_ref(),
                        field_ids: field_ids.as_slice(),
                        object_type: object_type.as_deref(),
                    }))?
                } else {
                    child.build(schema, &path, None, None)?
                };
            children.push(child);
        }

        let mut builder = ResultNode::builder(variant)
            .path(path.clone())
            .alias(alias.map(str::to_string))
            .field_ids(field_ids)
            .errors(self.errors.clone())
            .children(children);
        if let Some(object_type) = object_type {
            builder = builder.object_type(object_type);
        }
        if let Some(field_definition) = field_definition {
            builder = builder.field_definition(field_definition);
        }
        if is_value_node {
            let value = self.value.clone().unwrap_or(serde_json::Value::Null);
            builder = builder.is_null(self.is_null || value.is_null()).completed_value(value);
        } else {
            builder = builder.is_null(self.is_null);
        }

        Ok(builder.build())
    }
}
