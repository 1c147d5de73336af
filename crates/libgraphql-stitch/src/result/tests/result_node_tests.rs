use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::GraphQLError;
use crate::result::ResultCounters;
use crate::result::ResultNode;
use crate::result::ResultNodeKind;
use crate::result::ResultPath;
use crate::schema::FieldDefinition;
use crate::schema::NamedTypeAnnotation;
use std::sync::Arc;

fn leaf(path: ResultPath, value: serde_json::Value) -> ResultNode {
    ResultNode::leaf()
        .path(path)
        .field_id(FieldId::new(1))
        .completed_value(value)
        .build()
}

#[test]
fn build_counts_self_and_descendants() {
    let root_path = ResultPath::root().segment("issue");
    let node = ResultNode::object()
        .path(root_path.clone())
        .add_child(leaf(root_path.segment("id"), serde_json::json!("1")))
        .add_child(
            ResultNode::object()
                .path(root_path.segment("author"))
                .add_child(leaf(root_path.segment("author").segment("name"), "x".into()))
                .build(),
        )
        .build();

    assert_eq!(node.total_node_count(), 4);
    assert_eq!(node.pre_order().len(), 4);
}

#[test]
fn with_children_recomputes_counters() {
    let path = ResultPath::root().segment("issues");
    let list = ResultNode::list()
        .path(path.clone())
        .add_child(leaf(path.index(0), "a".into()))
        .build();
    assert_eq!(list.total_node_count(), 2);

    let renamed_child = leaf(path.index(1), "b".into()).with_counters(ResultCounters {
        node_count: 1,
        field_rename_count: 2,
        type_rename_count: -1,
    });
    let list = list.with_added_children([renamed_child]);

    assert_eq!(list.total_node_count(), 3);
    assert_eq!(list.total_field_rename_count(), 2);
    assert_eq!(list.total_type_rename_count(), -1);

    let list = list.with_children(vec![]);
    assert_eq!(list.counters(), ResultCounters {
        node_count: 1,
        field_rename_count: 0,
        type_rename_count: 0,
    });
}

#[test]
fn result_key_prefers_alias_over_field_name() {
    let field_def = Arc::new(FieldDefinition::new(
        "Issue",
        "title",
        NamedTypeAnnotation::new("String", true),
    ));
    let unaliased = ResultNode::leaf()
        .field_definition(field_def.clone())
        .build();
    let aliased = ResultNode::leaf()
        .field_definition(field_def)
        .alias(Some("heading".to_string()))
        .build();

    assert_eq!(unaliased.result_key(), Some("title"));
    assert_eq!(aliased.result_key(), Some("heading"));
    assert_eq!(aliased.value_key(), "heading");
}

#[test]
fn source_value_follows_object_leaf_chain() {
    let path = ResultPath::root().segment("issue");
    let object = ResultNode::object()
        .path(path.clone())
        .add_child(leaf(path.segment("authorId"), "U1".into()))
        .build();

    assert_eq!(object.source_value(), serde_json::json!("U1"));
}

#[test]
fn source_value_of_list_collects_elements() {
    let path = ResultPath::root().segment("ids");
    let list = ResultNode::list()
        .path(path.clone())
        .add_child(leaf(path.index(0), "A".into()))
        .add_child(
            ResultNode::leaf()
                .path(path.index(1))
                .is_null(true)
                .completed_value(serde_json::Value::Null)
                .build(),
        )
        .build();

    assert_eq!(list.source_value(), serde_json::json!(["A", null]));
}

#[test]
fn root_from_error_carries_only_the_error() {
    let root = ResultNode::root_from_error(
        GraphQLError::new("boom").with_extension("classification", "InternalError"),
    );

    assert_eq!(root.kind(), ResultNodeKind::Root);
    assert!(root.children().is_empty());
    assert_eq!(root.errors().len(), 1);
    assert_eq!(root.errors()[0].message, "boom");
    assert_eq!(root.total_node_count(), 1);
}

#[test]
fn to_json_projects_response_data() {
    let issue_path = ResultPath::root().segment("issue");
    let root = ResultNode::root()
        .add_child(
            ResultNode::object()
                .path(issue_path.clone())
                .alias(Some("issue".to_string()))
                .add_child(
                    ResultNode::leaf()
                        .path(issue_path.segment("id"))
                        .alias(Some("id".to_string()))
                        .completed_value("I1".into())
                        .build(),
                )
                .build(),
        )
        .build();

    assert_eq!(root.to_json(), serde_json::json!({"issue": {"id": "I1"}}));
}

#[test]
fn hydration_input_keeps_transformation_id() {
    let node = ResultNode::hydration_input(TransformationId::new(4), true)
        .completed_value(serde_json::json!({"id": "U1"}))
        .build();

    assert_eq!(node.kind(), ResultNodeKind::HydrationInput);
    assert!(node.is_hydration_input());
    assert_eq!(node.source_value(), serde_json::json!({"id": "U1"}));
}
