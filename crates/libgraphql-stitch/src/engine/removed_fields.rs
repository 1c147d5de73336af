use crate::normalized::NormalizedField;
use crate::normalized::NormalizedQuery;
use crate::result::ResultCounter;
use crate::result::ResultNode;
use crate::StitchError;
use crate::transformation::RemovedField;
use crate::transformation::TransformationMetadata;

type Result<T> = std::result::Result<T, StitchError>;

/// Appends a null leaf for every field the overall query expects under
/// `node` but that was removed from the underlying query.
///
/// `normalized_field` is resolved from the node when not supplied.
pub(crate) fn add_removed_children(
    node: ResultNode,
    normalized_field: Option<&NormalizedField>,
    normalized_query: &NormalizedQuery,
    metadata: &TransformationMetadata,
    counter: &mut ResultCounter,
) -> Result<ResultNode> {
    let normalized_field = match normalized_field {
        Some(normalized_field) => normalized_field,
        None => normalized_query.field_for_result_node(&node)?,
    };

    let removed_fields = metadata.removed_fields_for_parent(normalized_field.id());
    if removed_fields.is_empty() {
        return Ok(node);
    }

    let mut new_children = Vec::with_capacity(removed_fields.len());
    for removed_field in removed_fields {
        new_children.push(removed_field_result(&node, removed_field, normalized_query)?);
        counter.increment_node_count();
    }
    log::debug!(
        "reconstructed {} removed field(s) under `{}`",
        new_children.len(),
        node.path(),
    );
    Ok(node.with_added_children(new_children))
}

fn removed_field_result(
    parent: &ResultNode,
    removed_field: &RemovedField,
    normalized_query: &NormalizedQuery,
) -> Result<ResultNode> {
    let normalized_field = normalized_query
        .field(removed_field.normalized_field)
        .ok_or(StitchError::UnknownNormalizedField {
            id: removed_field.normalized_field,
        })?;

    Ok(ResultNode::leaf()
        .path(parent.path().segment(normalized_field.result_key()))
        .alias(normalized_field.alias().map(str::to_string))
        .field_ids(normalized_field.field_ids().iter().copied())
        .object_type(normalized_field.object_type())
        .field_definition(normalized_field.field_definition().clone())
        .completed_value(serde_json::Value::Null)
        .is_null(true)
        .error(removed_field.error.clone())
        .build())
}
