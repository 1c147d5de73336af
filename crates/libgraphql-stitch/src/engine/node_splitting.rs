use crate::ids::FieldId;
use crate::ids::TransformationId;
use crate::result::ResultNode;
use crate::schema::FieldCoordinate;
use crate::StitchError;
use crate::transformation::FieldTransformation;
use crate::transformation::TransformationMetadata;
use crate::transformation::TransformationRegistry;
use indexmap::IndexMap;
use indexmap::IndexSet;

type Result<T> = std::result::Result<T, StitchError>;

/// A node split apart by the transformations its field identifiers carry.
#[derive(Debug, Default)]
pub(crate) struct SplitTree {
    /// The node restricted to field identifiers that take part in no
    /// transformation, if any are left.
    pub not_transformed: Option<ResultNode>,

    /// Per transformation definition, the nodes of the raw parent that take
    /// part in any transformation of that definition.
    pub transformed: IndexMap<FieldCoordinate, Vec<ResultNode>>,
}

/// The transformations rooted at `node`'s field identifiers and the field
/// identifiers that carry none.
///
/// List elements never carry transformations of their own: those are
/// resolved at the list node.
pub(crate) fn transformations_and_not_transformed_fields<'r>(
    node: &ResultNode,
    registry: &'r TransformationRegistry,
    metadata: &TransformationMetadata,
) -> Result<(Vec<&'r FieldTransformation>, Vec<FieldId>)> {
    let mut transformation_ids = IndexSet::new();
    let mut not_transformed = vec![];
    for field_id in node.field_ids() {
        if node.path().is_list_segment() {
            not_transformed.push(*field_id);
            continue;
        }

        let root_ids = metadata.root_transformation_ids(*field_id);
        if root_ids.is_empty() {
            not_transformed.push(*field_id);
            continue;
        }
        transformation_ids.extend(root_ids);
    }

    let transformations = transformation_ids
        .into_iter()
        .map(|transformation_id| registry.transformation(transformation_id))
        .collect::<Result<Vec<_>>>()?;
    Ok((transformations, not_transformed))
}

/// Splits `node` into its untransformed part and, per transformation
/// definition, the matching nodes gathered from `direct_parent`'s children.
///
/// Gathering happens at the raw parent because one transformation can be
/// spread over several sibling nodes (e.g. the source fields of a
/// hydration). Without a parent, `node` is its own only candidate.
pub(crate) fn split_tree_by_transformation_definition(
    node: &ResultNode,
    direct_parent: Option<&ResultNode>,
    registry: &TransformationRegistry,
    metadata: &TransformationMetadata,
) -> Result<SplitTree> {
    if node.is_root() {
        return Ok(SplitTree {
            not_transformed: Some(node.clone()),
            transformed: IndexMap::new(),
        });
    }

    let mut ids_by_definition: IndexMap<FieldCoordinate, IndexSet<TransformationId>> =
        IndexMap::new();
    for field_id in node.field_ids() {
        for transformation_id in metadata.root_transformation_ids(*field_id) {
            let transformation = registry.transformation(transformation_id)?;
            ids_by_definition
                .entry(transformation.definition().clone())
                .or_default()
                .insert(transformation_id);
        }
    }

    let candidates = match direct_parent {
        Some(parent) => parent.children(),
        None => std::slice::from_ref(node),
    };

    let mut transformed = IndexMap::new();
    for (definition, transformation_ids) in ids_by_definition {
        let nodes = candidates
            .iter()
            .filter_map(|candidate| nodes_with_transformation_ids(
                candidate,
                Some(&transformation_ids),
                metadata,
            ))
            .collect::<Vec<_>>();
        transformed.insert(definition, nodes);
    }

    Ok(SplitTree {
        not_transformed: nodes_with_transformation_ids(node, None, metadata),
        transformed,
    })
}

/// Copies the subtree of `node` keeping only field identifiers that take
/// part in any of `transformation_ids` (or, for `None`, in no
/// transformation at all). Nodes left without identifiers are dropped along
/// with their subtree.
pub(crate) fn nodes_with_transformation_ids(
    node: &ResultNode,
    transformation_ids: Option<&IndexSet<TransformationId>>,
    metadata: &TransformationMetadata,
) -> Option<ResultNode> {
    let field_ids = node.field_ids()
        .iter()
        .copied()
        .filter(|field_id| {
            let ids_for_field = metadata.transformation_ids(*field_id);
            match transformation_ids {
                None => ids_for_field.is_empty(),
                Some(wanted) => wanted.iter().any(|id| ids_for_field.contains(id)),
            }
        })
        .collect::<Vec<_>>();
    if field_ids.is_empty() && !node.is_root() {
        return None;
    }

    let children = node.children()
        .iter()
        .filter_map(|child| nodes_with_transformation_ids(child, transformation_ids, metadata))
        .collect();
    Some(node.to_builder().field_ids(field_ids).children(children).build())
}
