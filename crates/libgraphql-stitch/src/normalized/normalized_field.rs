use crate::ids::FieldId;
use crate::ids::NormalizedFieldId;
use crate::result::FieldIds;
use crate::schema::FieldDefinition;
use std::sync::Arc;

/// One field of the client's query, resolved against the overall schema
/// for one concrete declaring type.
///
/// A selection on an interface-typed field fans out into one normalized
/// field per possible declaring type, all sharing the selection's field
/// identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedField {
    pub(crate) alias: Option<String>,
    pub(crate) field_definition: Arc<FieldDefinition>,
    pub(crate) field_ids: FieldIds,
    pub(crate) id: NormalizedFieldId,
    pub(crate) object_type: String,
    pub(crate) parent: Option<NormalizedFieldId>,
}
impl NormalizedField {
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn field_definition(&self) -> &Arc<FieldDefinition> {
        &self.field_definition
    }

    pub fn field_ids(&self) -> &[FieldId] {
        self.field_ids.as_slice()
    }

    pub fn id(&self) -> NormalizedFieldId {
        self.id
    }

    pub fn new(
        id: NormalizedFieldId,
        object_type: impl AsRef<str>,
        field_definition: Arc<FieldDefinition>,
    ) -> Self {
        Self {
            alias: None,
            field_definition,
            field_ids: FieldIds::new(),
            id,
            object_type: object_type.as_ref().to_string(),
            parent: None,
        }
    }

    pub fn object_type(&self) -> &str {
        self.object_type.as_str()
    }

    pub fn parent(&self) -> Option<NormalizedFieldId> {
        self.parent
    }

    pub fn result_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.field_definition.name())
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_field_ids(mut self, field_ids: impl IntoIterator<Item = FieldId>) -> Self {
        self.field_ids = field_ids.into_iter().collect();
        self
    }

    pub fn with_parent(mut self, parent: NormalizedFieldId) -> Self {
        self.parent = Some(parent);
        self
    }
}
