use crate::result::ResultCounter;
use crate::result::ResultNode;
use crate::schema::FieldCoordinate;
use crate::schema::FieldDefinition;
use crate::StitchError;
use crate::transformation::TypeRenames;
use crate::transformation::UnapplyEnvironment;

type Result<T> = std::result::Result<T, StitchError>;

/// Rewrites an untransformed node from underlying-schema terms into
/// overall-schema terms.
///
/// The node keeps its value, errors and children. Its path is re-rooted
/// under the environment's parent, and its declaring type and field
/// definition are swapped for their overall counterparts.
pub(crate) fn map_node(
    node: &ResultNode,
    env: &UnapplyEnvironment<'_>,
    counter: &mut ResultCounter,
) -> Result<ResultNode> {
    if node.is_root() {
        return Ok(node.clone());
    }

    let underlying_def = node.field_definition()
        .ok_or_else(|| StitchError::MissingFieldDefinition {
            path: node.path().clone(),
        })?;
    let underlying_type = node.object_type()
        .unwrap_or(underlying_def.parent_type_name());
    let overall_type = env.type_renames.overall_name(underlying_type);
    let overall_def = env.overall_schema
        .field_by_name(overall_type, underlying_def.name())
        .ok_or_else(|| StitchError::UnknownOverallField {
            coordinate: FieldCoordinate::new(overall_type, underlying_def.name()),
        })?;

    check_for_type_rename(overall_def, underlying_def, env.type_renames, counter, 0);

    let path = match node.path().last_segment() {
        Some(segment) => env.parent_path().with_segment(segment.clone()),
        None => node.path().clone(),
    };

    let mut builder = node.to_builder()
        .path(path)
        .object_type(overall_type)
        .field_definition(overall_def.clone());
    if let Some(value) = map_completed_value(node, underlying_def, env.type_renames) {
        builder = builder.completed_value(value);
    }

    Ok(builder.build())
}

/// `__typename` values name underlying types and must name overall types.
fn map_completed_value(
    node: &ResultNode,
    underlying_def: &FieldDefinition,
    type_renames: &TypeRenames,
) -> Option<serde_json::Value> {
    if underlying_def.name() != "__typename" {
        return None;
    }
    let type_name = node.completed_value()?.as_str()?;
    let overall_name = type_renames.overall_name(type_name);
    if overall_name == type_name {
        return None;
    }
    Some(serde_json::Value::String(overall_name.to_string()))
}

/// Counts a type rename when the overall field returns the renamed
/// counterpart of the underlying field's type.
///
/// A detected rename adds `1 + decrement`. Hydrations pass a negative
/// decrement: every element of a hydrated list is counted again when its
/// own hydrated value is stitched in.
pub(crate) fn check_for_type_rename(
    overall_def: &FieldDefinition,
    underlying_def: &FieldDefinition,
    type_renames: &TypeRenames,
    counter: &mut ResultCounter,
    decrement: i64,
) {
    let overall_type = overall_def.unwrapped_type_name();
    let underlying_type = underlying_def.unwrapped_type_name();
    if overall_type != underlying_type
        && type_renames.overall_name(underlying_type) == overall_type {
        log::trace!(
            "type rename `{underlying_type}` -> `{overall_type}` on `{}`",
            overall_def.coordinate(),
        );
        counter.increment_type_rename_count(1 + decrement);
    }
}
