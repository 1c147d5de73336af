use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::GraphQLError;
use crate::result::ResultCounters;
use crate::result::ResultPath;
use crate::schema::FieldDefinition;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::Duration;

pub type FieldIds = SmallVec<[FieldId; 1]>;

/// Data carried only by the top-level node of a result tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootInfo {
    pub elapsed: Option<Duration>,
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// The variant-specific part of a [`ResultNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum ResultNodeVariant {
    Root(RootInfo),
    Object,
    List,
    Leaf,

    /// The input to a not-yet-executed hydration call. Its completed value is
    /// the merged `value-key -> value` mapping the call's arguments are
    /// derived from.
    HydrationInput {
        batched: bool,
        transformation_id: TransformationId,
    },
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResultNodeKind {
    Root,
    Object,
    List,
    Leaf,
    HydrationInput,
}
impl std::fmt::Display for ResultNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Object => "object",
            Self::List => "list",
            Self::Leaf => "leaf",
            Self::HydrationInput => "hydration_input",
        })
    }
}

/// One node of a (partial) execution result.
///
/// Nodes are never mutated in place once built: every rewrite produces a new
/// node (see [`ResultNode::to_builder()`] and the `with_*` methods), and every
/// such rewrite recomputes [`ResultCounters`] from the node's children.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultNode {
    pub(crate) alias: Option<String>,
    pub(crate) children: Vec<ResultNode>,
    pub(crate) completed_value: Option<serde_json::Value>,
    pub(crate) counters: ResultCounters,
    pub(crate) errors: Vec<GraphQLError>,
    pub(crate) field_definition: Option<Arc<FieldDefinition>>,
    pub(crate) field_ids: FieldIds,
    pub(crate) is_null: bool,
    pub(crate) object_type: Option<String>,
    pub(crate) path: ResultPath,
    pub(crate) variant: ResultNodeVariant,
}
impl ResultNode {
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn builder(variant: ResultNodeVariant) -> ResultNodeBuilder {
        ResultNodeBuilder::new(variant)
    }

    pub fn children(&self) -> &[ResultNode] {
        self.children.as_slice()
    }

    pub fn completed_value(&self) -> Option<&serde_json::Value> {
        self.completed_value.as_ref()
    }

    pub fn counters(&self) -> ResultCounters {
        self.counters
    }

    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_slice()
    }

    pub fn field_definition(&self) -> Option<&Arc<FieldDefinition>> {
        self.field_definition.as_ref()
    }

    pub fn field_ids(&self) -> &[FieldId] {
        self.field_ids.as_slice()
    }

    pub fn hydration_input(
        transformation_id: TransformationId,
        batched: bool,
    ) -> ResultNodeBuilder {
        ResultNodeBuilder::new(ResultNodeVariant::HydrationInput {
            batched,
            transformation_id,
        })
    }

    pub fn is_hydration_input(&self) -> bool {
        matches!(self.variant, ResultNodeVariant::HydrationInput { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.variant, ResultNodeVariant::Leaf)
    }

    pub fn is_list(&self) -> bool {
        matches!(self.variant, ResultNodeVariant::List)
    }

    pub fn is_null(&self) -> bool {
        self.is_null
    }

    pub fn is_object(&self) -> bool {
        matches!(self.variant, ResultNodeVariant::Object)
    }

    pub fn is_root(&self) -> bool {
        matches!(self.variant, ResultNodeVariant::Root(_))
    }

    pub fn kind(&self) -> ResultNodeKind {
        match &self.variant {
            ResultNodeVariant::Root(_) => ResultNodeKind::Root,
            ResultNodeVariant::Object => ResultNodeKind::Object,
            ResultNodeVariant::List => ResultNodeKind::List,
            ResultNodeVariant::Leaf => ResultNodeKind::Leaf,
            ResultNodeVariant::HydrationInput { .. } => ResultNodeKind::HydrationInput,
        }
    }

    pub fn leaf() -> ResultNodeBuilder {
        ResultNodeBuilder::new(ResultNodeVariant::Leaf)
    }

    pub fn list() -> ResultNodeBuilder {
        ResultNodeBuilder::new(ResultNodeVariant::List)
    }

    pub fn object() -> ResultNodeBuilder {
        ResultNodeBuilder::new(ResultNodeVariant::Object)
    }

    /// The declaring type this node was resolved against, if resolved.
    pub fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    pub fn path(&self) -> &ResultPath {
        &self.path
    }

    /// All nodes of this subtree in pre-order, starting with `self`.
    pub fn pre_order(&self) -> Vec<&ResultNode> {
        let mut nodes = vec![];
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev());
        }
        nodes
    }

    /// The key this node is reported under in a response: its alias if it
    /// has one, else the name of its field.
    pub fn result_key(&self) -> Option<&str> {
        if let Some(alias) = &self.alias {
            return Some(alias.as_str());
        }
        if let Some(field_def) = &self.field_definition {
            return Some(field_def.name());
        }
        self.path.last_segment().and_then(|segment| segment.as_field_name())
    }

    pub fn root() -> ResultNodeBuilder {
        ResultNodeBuilder::new(ResultNodeVariant::Root(RootInfo::default()))
    }

    /// Builds the result surfaced to a caller when a conversion failed: an
    /// empty root carrying only the given error.
    pub fn root_from_error(error: GraphQLError) -> Self {
        Self::root().error(error).build()
    }

    pub fn root_info(&self) -> Option<&RootInfo> {
        if let ResultNodeVariant::Root(root_info) = &self.variant {
            Some(root_info)
        } else {
            None
        }
    }

    /// The value a hydration source contributes when it is merged into its
    /// primary node.
    ///
    /// Objects yield the value found by following their first child down to
    /// a leaf, lists yield an array of their elements' source values.
    pub fn source_value(&self) -> serde_json::Value {
        match &self.variant {
            ResultNodeVariant::Root(_) => serde_json::Value::Null,
            ResultNodeVariant::Object => match self.children.first() {
                Some(child) if !self.is_null => child.source_value(),
                _ => serde_json::Value::Null,
            },
            ResultNodeVariant::List => serde_json::Value::Array(
                self.children.iter().map(|child| child.source_value()).collect(),
            ),
            ResultNodeVariant::Leaf
            | ResultNodeVariant::HydrationInput { .. } =>
                self.completed_value.clone().unwrap_or(serde_json::Value::Null),
        }
    }

    pub fn to_builder(&self) -> ResultNodeBuilder {
        ResultNodeBuilder {
            alias: self.alias.clone(),
            children: self.children.clone(),
            completed_value: self.completed_value.clone(),
            errors: self.errors.clone(),
            field_definition: self.field_definition.clone(),
            field_ids: self.field_ids.clone(),
            is_null: self.is_null,
            object_type: self.object_type.clone(),
            path: self.path.clone(),
            variant: self.variant.clone(),
        }
    }

    /// Projects this subtree onto the `data` shape of a GraphQL response.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.variant {
            ResultNodeVariant::Root(_) | ResultNodeVariant::Object => {
                if self.is_null {
                    return serde_json::Value::Null;
                }
                let mut map = serde_json::Map::new();
                for child in &self.children {
                    let key = child.result_key().unwrap_or_default().to_string();
                    map.insert(key, child.to_json());
                }
                serde_json::Value::Object(map)
            },
            ResultNodeVariant::List => {
                if self.is_null {
                    return serde_json::Value::Null;
                }
                serde_json::Value::Array(
                    self.children.iter().map(|child| child.to_json()).collect(),
                )
            },
            ResultNodeVariant::Leaf
            | ResultNodeVariant::HydrationInput { .. } =>
                self.completed_value.clone().unwrap_or(serde_json::Value::Null),
        }
    }

    pub fn total_field_rename_count(&self) -> usize {
        self.counters.field_rename_count
    }

    pub fn total_node_count(&self) -> usize {
        self.counters.node_count
    }

    pub fn total_type_rename_count(&self) -> i64 {
        self.counters.type_rename_count
    }

    /// The key a hydration source is merged under; always the source's
    /// result key.
    pub fn value_key(&self) -> &str {
        self.result_key().unwrap_or_default()
    }

    pub fn variant(&self) -> &ResultNodeVariant {
        &self.variant
    }

    pub fn with_added_children(
        &self,
        new_children: impl IntoIterator<Item = ResultNode>,
    ) -> Self {
        let mut builder = self.to_builder();
        builder.children.extend(new_children);
        builder.build()
    }

    pub fn with_children(&self, children: Vec<ResultNode>) -> Self {
        self.to_builder().children(children).build()
    }

    pub fn with_completed_value(&self, value: serde_json::Value) -> Self {
        self.to_builder().completed_value(value).build()
    }

    /// Overwrites this node's counters with externally-accumulated totals.
    ///
    /// Used to stamp the top node of a conversion call with the totals of
    /// the shared counter of that call.
    pub fn with_counters(mut self, counters: ResultCounters) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_field_ids(&self, field_ids: impl IntoIterator<Item = FieldId>) -> Self {
        self.to_builder().field_ids(field_ids).build()
    }
}

#[derive(Clone, Debug)]
pub struct ResultNodeBuilder {
    alias: Option<String>,
    children: Vec<ResultNode>,
    completed_value: Option<serde_json::Value>,
    errors: Vec<GraphQLError>,
    field_definition: Option<Arc<FieldDefinition>>,
    field_ids: FieldIds,
    is_null: bool,
    object_type: Option<String>,
    path: ResultPath,
    variant: ResultNodeVariant,
}
impl ResultNodeBuilder {
    pub fn add_child(mut self, child: ResultNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn build(self) -> ResultNode {
        let child_counters: ResultCounters =
            self.children.iter().map(|child| child.counters).sum();
        ResultNode {
            alias: self.alias,
            counters: ResultCounters {
                node_count: 1 + child_counters.node_count,
                ..child_counters
            },
            children: self.children,
            completed_value: self.completed_value,
            errors: self.errors,
            field_definition: self.field_definition,
            field_ids: self.field_ids,
            is_null: self.is_null,
            object_type: self.object_type,
            path: self.path,
            variant: self.variant,
        }
    }

    pub fn children(mut self, children: Vec<ResultNode>) -> Self {
        self.children = children;
        self
    }

    pub fn completed_value(mut self, value: serde_json::Value) -> Self {
        self.completed_value = Some(value);
        self
    }

    pub fn error(mut self, error: GraphQLError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn errors(mut self, errors: Vec<GraphQLError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn extension(
        mut self,
        key: impl AsRef<str>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        if let ResultNodeVariant::Root(root_info) = &mut self.variant {
            root_info.extensions.insert(key.as_ref().to_string(), value.into());
        }
        self
    }

    pub fn elapsed(mut self, elapsed: Option<Duration>) -> Self {
        if let ResultNodeVariant::Root(root_info) = &mut self.variant {
            root_info.elapsed = elapsed;
        }
        self
    }

    pub fn field_definition(mut self, field_definition: Arc<FieldDefinition>) -> Self {
        self.field_definition = Some(field_definition);
        self
    }

    pub fn field_id(self, field_id: FieldId) -> Self {
        self.field_ids([field_id])
    }

    pub fn field_ids(mut self, field_ids: impl IntoIterator<Item = FieldId>) -> Self {
        self.field_ids = field_ids.into_iter().collect();
        self
    }

    pub fn is_null(mut self, is_null: bool) -> Self {
        self.is_null = is_null;
        self
    }

    pub fn new(variant: ResultNodeVariant) -> Self {
        Self {
            alias: None,
            children: vec![],
            completed_value: None,
            errors: vec![],
            field_definition: None,
            field_ids: SmallVec::new(),
            is_null: false,
            object_type: None,
            path: ResultPath::root(),
            variant,
        }
    }

    pub fn object_type(mut self, object_type: impl AsRef<str>) -> Self {
        self.object_type = Some(object_type.as_ref().to_string());
        self
    }

    pub fn path(mut self, path: ResultPath) -> Self {
        self.path = path;
        self
    }

    /// Changes the node's variant while keeping every other attribute.
    pub fn variant(mut self, variant: ResultNodeVariant) -> Self {
        self.variant = variant;
        self
    }
}
