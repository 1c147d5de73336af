use crate::schema::FieldCoordinate;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaBuildError;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod basics {
    use super::*;

    #[test]
    fn build_without_load() {
        let schema = SchemaBuilder::new().build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::NoQueryOperationTypeDefined {
            type_name: "Query".to_string(),
        });
    }

    #[test]
    fn load_object_and_interface_types() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, concat!(
                "interface Node { id: ID! }\n",
                "type Query { issue(id: ID!): Issue }\n",
                "type Issue implements Node { id: ID!, title: String, labels: [String!]! }",
            ))?
            .build()?;

        assert_eq!(schema.query_type_name(), "Query");
        assert_eq!(schema.types().len(), 3);

        let node_type = schema.object_type("Node").unwrap();
        assert!(node_type.is_interface());
        assert_eq!(node_type.name(), "Node");

        let issue_type = schema.object_type("Issue").unwrap();
        assert!(!issue_type.is_interface());
        assert_eq!(issue_type.fields().keys().collect::<Vec<_>>(), vec![
            "__typename",
            "id",
            "title",
            "labels",
        ]);

        let labels = schema.field_by_name("Issue", "labels").unwrap();
        assert_eq!(labels.parent_type_name(), "Issue");
        assert!(labels.is_list());
        assert_eq!(labels.unwrapped_type_name(), "String");
        assert!(!labels.type_annotation().nullable());

        let issue = schema.field(&FieldCoordinate::new("Query", "issue")).unwrap();
        assert_eq!(issue.unwrapped_type_name(), "Issue");
        assert!(issue.type_annotation().nullable());

        Ok(())
    }

    #[test]
    fn typename_is_injected_on_every_type() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Query { a: Int }\ntype Other { b: Int }")?
            .build()?;

        for type_name in ["Query", "Other"] {
            let typename = schema.field_by_name(type_name, "__typename").unwrap();
            assert_eq!(typename.unwrapped_type_name(), "String");
            assert!(!typename.type_annotation().nullable());
            assert_eq!(typename.parent_type_name(), type_name);
        }

        Ok(())
    }

    #[test]
    fn non_field_definitions_are_ignored() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, concat!(
                "scalar DateTime\n",
                "enum Status { OPEN CLOSED }\n",
                "input Filter { status: Status }\n",
                "union Anything = Query\n",
                "directive @renamed(from: String!) on FIELD_DEFINITION\n",
                "type Query { a: DateTime @renamed(from: \"b\") }",
            ))?
            .build()?;

        assert_eq!(schema.types().len(), 1);
        assert!(schema.field_by_name("Query", "a").is_some());

        Ok(())
    }
}

mod query_type {
    use super::*;

    #[test]
    fn schema_definition_overrides_query_type() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "schema { query: Root }\ntype Root { a: Int }")?
            .build()?;

        assert_eq!(schema.query_type_name(), "Root");

        Ok(())
    }

    #[test]
    fn missing_overridden_query_type_is_an_error() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "schema { query: Root }\ntype Query { a: Int }")?
            .build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::NoQueryOperationTypeDefined {
            type_name: "Root".to_string(),
        });

        Ok(())
    }
}

mod extensions {
    use super::*;

    #[test]
    fn extension_before_definition_is_applied() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "extend type Query { b: Int }")?
            .load_str(None, "type Query { a: Int }")?
            .build()?;

        let query_type = schema.object_type("Query").unwrap();
        assert_eq!(query_type.fields().keys().collect::<Vec<_>>(), vec![
            "__typename",
            "a",
            "b",
        ]);

        Ok(())
    }

    #[test]
    fn interface_extension_is_applied() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, concat!(
                "type Query { a: Int }\n",
                "interface Node { id: ID }\n",
                "extend interface Node { name: String }",
            ))?
            .build()?;

        assert!(schema.field_by_name("Node", "name").is_some());

        Ok(())
    }

    #[test]
    fn extension_of_undefined_type() -> Result<()> {
        let path = PathBuf::from("ext.graphql");
        let schema = SchemaBuilder::new()
            .load_str(None, "type Query { a: Int }")?
            .load_str(Some(path.clone()), "\nextend type Missing { b: Int }")?
            .build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::ExtensionOfUndefinedType {
            file: path,
            line: 2,
            type_name: "Missing".to_string(),
        });

        Ok(())
    }

    #[test]
    fn extension_redefining_a_field() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Query { a: Int }\nextend type Query { a: String }")?
            .build();

        assert!(matches!(
            schema.unwrap_err(),
            SchemaBuildError::DuplicateFieldNameDefinition { field_name, type_name, .. }
                if field_name == "a" && type_name == "Query",
        ));

        Ok(())
    }
}

mod errors {
    use super::*;

    #[test]
    fn duplicate_type_definition() {
        let err = SchemaBuilder::new()
            .load_str(None, "type Query { a: Int }")
            .and_then(|builder| builder.load_str(None, "\n\ntype Query { b: Int }"))
            .unwrap_err();

        assert_eq!(err, SchemaBuildError::DuplicateTypeDefinition {
            file: PathBuf::from("str://1"),
            line: 3,
            type_name: "Query".to_string(),
        });
    }

    #[test]
    fn duplicate_field_definition() {
        let err = SchemaBuilder::new()
            .load_str(None, "type Query {\n  a: Int\n  a: Int\n}")
            .unwrap_err();

        assert_eq!(err, SchemaBuildError::DuplicateFieldNameDefinition {
            file: PathBuf::from("str://0"),
            line: 3,
            field_name: "a".to_string(),
            type_name: "Query".to_string(),
        });
    }

    #[test]
    fn dunder_prefixed_field_name() {
        let err = SchemaBuilder::new()
            .load_str(None, "type Query { __secret: Int }")
            .unwrap_err();

        assert!(matches!(
            err,
            SchemaBuildError::InvalidDunderPrefixedFieldName { field_name, .. }
                if field_name == "__secret",
        ));
    }

    #[test]
    fn parse_error_names_the_file() {
        let path = PathBuf::from("broken.graphql");
        let err = SchemaBuilder::new()
            .load_str(Some(path.clone()), "type Query {")
            .unwrap_err();

        assert!(matches!(err, SchemaBuildError::ParseError { file, .. } if file == path));
    }

    #[test]
    fn missing_schema_file() {
        let err = SchemaBuilder::new()
            .load_file("/this/path/does/not/exist.graphql")
            .unwrap_err();

        assert!(matches!(err, SchemaBuildError::SchemaFileReadError { .. }));
    }
}
