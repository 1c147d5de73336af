use crate::schema::FieldCoordinate;
use crate::schema::FieldDefinition;
use crate::schema::SchemaBuilder;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// An immutable view of the field-bearing types of a GraphQL schema.
///
/// Only object and interface types (and the fields they declare) are tracked:
/// those are the only types a result node can be "declared on", and the only
/// information the stitching engine needs when it rewrites a node from an
/// underlying service's terms into the overall schema's terms.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) query_type: String,
    pub(crate) types: HashMap<String, ObjectType>,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Look up the definition named by a [`FieldCoordinate`].
    pub fn field(&self, coordinate: &FieldCoordinate) -> Option<&Arc<FieldDefinition>> {
        self.field_by_name(&coordinate.type_name, &coordinate.field_name)
    }

    pub fn field_by_name(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Option<&Arc<FieldDefinition>> {
        self.types.get(type_name)?.field(field_name)
    }

    pub fn object_type(&self, type_name: &str) -> Option<&ObjectType> {
        self.types.get(type_name)
    }

    /// Returns this [`Schema`]'s Query root operation type.
    ///
    /// The builder guarantees this type is present.
    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }

    pub fn types(&self) -> &HashMap<String, ObjectType> {
        &self.types
    }
}

/// An object or interface type and its ordered field definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub(crate) fields: IndexMap<String, Arc<FieldDefinition>>,
    pub(crate) is_interface: bool,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn field(&self, field_name: &str) -> Option<&Arc<FieldDefinition>> {
        self.fields.get(field_name)
    }

    pub fn fields(&self) -> &IndexMap<String, Arc<FieldDefinition>> {
        &self.fields
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
