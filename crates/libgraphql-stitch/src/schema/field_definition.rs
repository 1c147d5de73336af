use crate::schema::TypeAnnotation;

/// A field defined on an object or interface type of some
/// [`Schema`](crate::schema::Schema).
///
/// Result nodes hold these behind an `Arc` so that a node rewritten from
/// underlying-schema terms into overall-schema terms only swaps a pointer.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldDefinition {
    pub(crate) name: String,
    pub(crate) parent_type: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl FieldDefinition {
    pub fn new(
        parent_type: impl AsRef<str>,
        name: impl AsRef<str>,
        type_annotation: impl Into<TypeAnnotation>,
    ) -> Self {
        Self {
            name: name.as_ref().to_string(),
            parent_type: parent_type.as_ref().to_string(),
            type_annotation: type_annotation.into(),
        }
    }

    pub fn coordinate(&self) -> FieldCoordinate {
        FieldCoordinate::new(&self.parent_type, &self.name)
    }

    pub fn is_list(&self) -> bool {
        self.type_annotation.is_list()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The name of the object or interface type that declares this field.
    pub fn parent_type_name(&self) -> &str {
        self.parent_type.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    /// Shorthand for [`TypeAnnotation::unwrapped_type_name()`].
    pub fn unwrapped_type_name(&self) -> &str {
        self.type_annotation.unwrapped_type_name()
    }
}

/// A `Type.field` pair naming one field definition.
///
/// Transformations use the coordinate of the overall-schema field they were
/// declared on as their definition identity: several occurrences of the same
/// declared field in one query funnel into one group.
#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct FieldCoordinate {
    pub type_name: String,
    pub field_name: String,
}
impl FieldCoordinate {
    pub fn new(type_name: impl AsRef<str>, field_name: impl AsRef<str>) -> Self {
        Self {
            type_name: type_name.as_ref().to_string(),
            field_name: field_name.as_ref().to_string(),
        }
    }
}
impl std::fmt::Display for FieldCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}
