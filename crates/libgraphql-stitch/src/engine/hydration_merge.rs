use crate::result::ResultNode;
use crate::StitchError;

type Result<T> = std::result::Result<T, StitchError>;

type ValuesByKey = serde_json::Map<String, serde_json::Value>;

/// Merges the values of a hydration's source nodes into its primary node.
///
/// Each source contributes its value under its value key. A scalar-sourced
/// primary receives the whole mapping, a list-sourced primary receives one
/// mapping per element built from the elements at the same index of every
/// source (missing elements contribute `null`). Objects receive their
/// mapping on the leaf at the end of their first-child chain.
///
/// The source whose path equals the primary's path replaces the primary, so
/// the merged node only carries the field identifiers kept by the split.
pub(crate) fn merge_hydration_nodes(
    sources: &[ResultNode],
    primary: &ResultNode,
) -> Result<ResultNode> {
    let is_list_source = primary.is_list();
    let mut values = ValuesByKey::new();
    let mut primary = primary;

    for source in sources {
        values.insert(source.value_key().to_string(), source.source_value());

        if source.path() == primary.path() {
            primary = source;
        }

        if source.is_list() != is_list_source {
            return Err(StitchError::HydrationSourceShapeMismatch {
                expected_shape:
                    if is_list_source {
                        "a list of values".to_string()
                    } else {
                        "a single value".to_string()
                    },
                path: source.path().clone(),
                source_key: source.value_key().to_string(),
            });
        }
    }

    log::debug!(
        "merging {} hydration source(s) into `{}`",
        sources.len(),
        primary.path(),
    );

    if is_list_source {
        Ok(merge_list_values(primary, &values))
    } else if primary.is_object() {
        Ok(merge_object_values(primary, values))
    } else {
        Ok(primary.with_completed_value(serde_json::Value::Object(values)))
    }
}

fn merge_list_values(primary: &ResultNode, values: &ValuesByKey) -> ResultNode {
    let elements = primary.children()
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            let element_values = values
                .iter()
                .map(|(key, value)| {
                    let element_value = value
                        .as_array()
                        .and_then(|values| values.get(idx))
                        .cloned()
                        .unwrap_or(serde_json::Value::Null);
                    (key.to_string(), element_value)
                })
                .collect::<ValuesByKey>();

            if element.is_object() {
                merge_object_values(element, element_values)
            } else {
                element.with_completed_value(serde_json::Value::Object(element_values))
            }
        })
        .collect();

    let mut builder = primary.to_builder().children(elements);
    if let Some(first_field_id) = primary.field_ids().first() {
        builder = builder.field_id(*first_field_id);
    }
    builder.build()
}

/// Only the first-child chain survives: by construction a hydration source
/// object selects exactly one field.
fn merge_object_values(node: &ResultNode, values: ValuesByKey) -> ResultNode {
    if node.is_leaf() || node.is_null() {
        return node.with_completed_value(serde_json::Value::Object(values));
    }
    match node.children().first() {
        Some(child) => node.with_children(vec![merge_object_values(child, values)]),
        None => node.clone(),
    }
}
