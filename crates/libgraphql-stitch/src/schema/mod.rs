mod field_definition;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod type_annotation;

pub use field_definition::FieldCoordinate;
pub use field_definition::FieldDefinition;
pub use schema::ObjectType;
pub use schema::Schema;
pub use schema_builder::SchemaBuilder;
pub use schema_builder::SchemaBuildError;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;

#[cfg(test)]
mod tests;
