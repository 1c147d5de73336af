use crate::engine::merge_hydration_nodes;
use crate::result::ResultNode;
use crate::result::ResultPath;
use crate::StitchError;
use crate::test::fixture::fid;
use serde_json::json;

type Result<T> = std::result::Result<T, StitchError>;

fn source_leaf(key: &str, field_ids: &[u32], value: serde_json::Value) -> ResultNode {
    ResultNode::leaf()
        .path(ResultPath::root().segment(key))
        .alias(Some(key.to_string()))
        .field_ids(field_ids.iter().copied().map(fid))
        .is_null(value.is_null())
        .completed_value(value)
        .build()
}

fn source_list(key: &str, field_ids: &[u32], values: &[serde_json::Value]) -> ResultNode {
    let path = ResultPath::root().segment(key);
    let elements = values
        .iter()
        .enumerate()
        .map(|(idx, value)| ResultNode::leaf()
            .path(path.index(idx))
            .alias(Some(key.to_string()))
            .field_ids(field_ids.iter().copied().map(fid))
            .completed_value(value.clone())
            .build())
        .collect();
    ResultNode::list()
        .path(path)
        .alias(Some(key.to_string()))
        .field_ids(field_ids.iter().copied().map(fid))
        .children(elements)
        .build()
}

#[test]
fn scalar_sources_merge_into_one_mapping() -> Result<()> {
    let primary = source_leaf("a", &[1], json!("x"));
    let secondary = source_leaf("b", &[2], json!(7));

    let merged = merge_hydration_nodes(&[primary.clone(), secondary], &primary)?;

    assert_eq!(merged.completed_value(), Some(&json!({"a": "x", "b": 7})));
    assert_eq!(merged.path(), primary.path());
    Ok(())
}

#[test]
fn source_at_the_primary_path_replaces_the_primary() -> Result<()> {
    let primary = source_leaf("a", &[1, 9], json!("x"));
    let split_source = source_leaf("a", &[1], json!("x"));

    let merged = merge_hydration_nodes(&[split_source], &primary)?;

    assert_eq!(merged.field_ids(), &[fid(1)]);
    Ok(())
}

#[test]
fn list_sources_merge_per_index() -> Result<()> {
    let primary = source_list("ids", &[1, 2], &[json!("A"), json!("B")]);
    let secondary = source_list("roles", &[3], &[json!("owner")]);

    let merged = merge_hydration_nodes(&[primary.clone(), secondary], &primary)?;

    assert_eq!(merged.field_ids(), &[fid(1)]);
    assert_eq!(
        merged.children().iter().map(|element| element.completed_value().cloned()).collect::<Vec<_>>(),
        vec![
            Some(json!({"ids": "A", "roles": "owner"})),
            Some(json!({"ids": "B", "roles": null})),
        ],
    );
    Ok(())
}

#[test]
fn null_source_under_a_list_primary_is_an_error() {
    let primary = source_list("ids", &[1], &[json!("A")]);
    let null_source = source_leaf("roles", &[2], serde_json::Value::Null);

    let err = merge_hydration_nodes(&[primary.clone(), null_source], &primary).unwrap_err();

    assert_eq!(err, StitchError::HydrationSourceShapeMismatch {
        expected_shape: "a list of values".to_string(),
        path: ResultPath::root().segment("roles"),
        source_key: "roles".to_string(),
    });
}

#[test]
fn mismatched_shapes_are_an_error() {
    let primary = source_leaf("id", &[1], json!("x"));
    let list_source = source_list("ids", &[2], &[json!("A")]);

    let err = merge_hydration_nodes(&[primary.clone(), list_source], &primary).unwrap_err();

    assert_eq!(err, StitchError::HydrationSourceShapeMismatch {
        expected_shape: "a single value".to_string(),
        path: ResultPath::root().segment("ids"),
        source_key: "ids".to_string(),
    });
}

#[test]
fn object_sources_merge_down_their_first_child_chain() -> Result<()> {
    let path = ResultPath::root().segment("owner");
    let primary = ResultNode::object()
        .path(path.clone())
        .field_id(fid(1))
        .add_child(source_leaf("id", &[2], json!("U1")))
        .add_child(source_leaf("extra", &[3], json!("ignored")))
        .build();

    let merged = merge_hydration_nodes(std::slice::from_ref(&primary), &primary)?;

    assert_eq!(merged.children().len(), 1);
    assert_eq!(merged.children()[0].completed_value(), Some(&json!({"owner": "U1"})));
    Ok(())
}
