use crate::schema::FieldDefinition;
use crate::schema::NamedTypeAnnotation;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type AstField = graphql_parser::schema::Field<'static, String>;
type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
struct PendingExtension {
    fields: Vec<AstField>,
    file_path: PathBuf,
    line: usize,
    type_name: String,
}

/// Builds a [`Schema`] from one or more SDL documents.
///
/// Object types, interface types, object/interface type extensions, and a
/// `schema { query: ... }` block are honored. All other definitions are
/// accepted and ignored since they declare no fields.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    pending_extensions: Vec<PendingExtension>,
    query_type: Option<String>,
    str_load_counter: u16,
    types: HashMap<String, ObjectType>,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        for ext in std::mem::take(&mut self.pending_extensions) {
            let type_ = match self.types.get_mut(&ext.type_name) {
                Some(type_) => type_,
                None => return Err(SchemaBuildError::ExtensionOfUndefinedType {
                    file: ext.file_path,
                    line: ext.line,
                    type_name: ext.type_name,
                }),
            };
            add_fields(type_, &ext.file_path, &ext.fields)?;
        }

        let query_type = self.query_type.unwrap_or_else(|| "Query".to_string());
        if !self.types.contains_key(&query_type) {
            return Err(SchemaBuildError::NoQueryOperationTypeDefined {
                type_name: query_type,
            });
        }

        Ok(Schema {
            query_type,
            types: self.types,
        })
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = std::fs::read_to_string(file_path)
            .map_err(|err| SchemaBuildError::SchemaFileReadError {
                file: file_path.to_path_buf(),
                err: err.to_string(),
            })?;
        self.load_str(Some(file_path.to_path_buf()), content.as_str())
    }

    pub fn load_str(
        mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc =
            graphql_parser::schema::parse_schema::<String>(content)
                .map_err(|err| SchemaBuildError::ParseError {
                    file: file_path.to_owned(),
                    err: err.to_string(),
                })?.into_static();

        for def in ast_doc.definitions {
            self.visit_ast_def(file_path.as_path(), def)?;
        }

        Ok(self)
    }

    fn visit_ast_def(
        &mut self,
        file_path: &Path,
        def: graphql_parser::schema::Definition<'static, String>,
    ) -> Result<()> {
        use graphql_parser::schema::Definition;
        use graphql_parser::schema::TypeDefinition;
        use graphql_parser::schema::TypeExtension;

        match def {
            Definition::SchemaDefinition(schema_def) => {
                if let Some(query_type) = schema_def.query {
                    self.query_type = Some(query_type);
                }
                Ok(())
            },

            Definition::TypeDefinition(TypeDefinition::Object(obj_def)) =>
                self.add_type(
                    file_path,
                    obj_def.position.line,
                    obj_def.name,
                    false,
                    &obj_def.fields,
                ),

            Definition::TypeDefinition(TypeDefinition::Interface(iface_def)) =>
                self.add_type(
                    file_path,
                    iface_def.position.line,
                    iface_def.name,
                    true,
                    &iface_def.fields,
                ),

            Definition::TypeExtension(TypeExtension::Object(obj_ext)) => {
                self.pending_extensions.push(PendingExtension {
                    fields: obj_ext.fields,
                    file_path: file_path.to_path_buf(),
                    line: obj_ext.position.line,
                    type_name: obj_ext.name,
                });
                Ok(())
            },

            Definition::TypeExtension(TypeExtension::Interface(iface_ext)) => {
                self.pending_extensions.push(PendingExtension {
                    fields: iface_ext.fields,
                    file_path: file_path.to_path_buf(),
                    line: iface_ext.position.line,
                    type_name: iface_ext.name,
                });
                Ok(())
            },

            Definition::TypeDefinition(_)
            | Definition::TypeExtension(_)
            | Definition::DirectiveDefinition(_)
                => Ok(()),
        }
    }

    fn add_type(
        &mut self,
        file_path: &Path,
        line: usize,
        type_name: String,
        is_interface: bool,
        fields: &[AstField],
    ) -> Result<()> {
        if self.types.contains_key(&type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                file: file_path.to_path_buf(),
                line,
                type_name,
            });
        }

        let mut type_ = ObjectType {
            fields: IndexMap::from([
                ("__typename".to_string(), Arc::new(FieldDefinition {
                    name: "__typename".to_string(),
                    parent_type: type_name.to_string(),
                    type_annotation: TypeAnnotation::Named(
                        NamedTypeAnnotation::new("String", false),
                    ),
                })),
            ]),
            is_interface,
            name: type_name.to_string(),
        };
        add_fields(&mut type_, file_path, fields)?;
        self.types.insert(type_name, type_);
        Ok(())
    }
}

fn add_fields(
    type_: &mut ObjectType,
    file_path: &Path,
    fields: &[AstField],
) -> Result<()> {
    for field in fields {
        // https://spec.graphql.org/October2021/#sel-IAHZhCFDBDCAACCTl4L
        if field.name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedFieldName {
                file: file_path.to_path_buf(),
                line: field.position.line,
                field_name: field.name.to_string(),
                type_name: type_.name.to_string(),
            });
        }

        if type_.fields.contains_key(&field.name) {
            return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                file: file_path.to_path_buf(),
                line: field.position.line,
                field_name: field.name.to_string(),
                type_name: type_.name.to_string(),
            });
        }

        type_.fields.insert(field.name.to_string(), Arc::new(FieldDefinition {
            name: field.name.to_string(),
            parent_type: type_.name.to_string(),
            type_annotation: TypeAnnotation::from_ast_type(&field.field_type),
        }));
    }
    Ok(())
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("Multiple fields with the same name were defined on a single object type")]
    DuplicateFieldNameDefinition {
        file: PathBuf,
        line: usize,
        field_name: String,
        type_name: String,
    },

    #[error("Multiple GraphQL types with the same name were defined")]
    DuplicateTypeDefinition {
        file: PathBuf,
        line: usize,
        type_name: String,
    },

    #[error("Attempted to extend a type that is not defined elsewhere")]
    ExtensionOfUndefinedType {
        file: PathBuf,
        line: usize,
        type_name: String,
    },

    #[error("Field names must not start with `__`")]
    InvalidDunderPrefixedFieldName {
        file: PathBuf,
        line: usize,
        field_name: String,
        type_name: String,
    },

    #[error("Attempted to build a schema that has no `{type_name}` query type defined")]
    NoQueryOperationTypeDefined {
        type_name: String,
    },

    #[error("Error parsing schema string: {err}")]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error("Failure while trying to read a schema file from disk: {err}")]
    SchemaFileReadError {
        file: PathBuf,
        err: String,
    },
}
