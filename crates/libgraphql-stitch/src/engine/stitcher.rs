use crate::engine::add_removed_children;
use crate::engine::check_for_type_rename;
use crate::engine::map_node;
use crate::engine::merge_hydration_nodes;
use crate::engine::nodes_with_transformation_ids;
use crate::engine::split_tree_by_transformation_definition;
use crate::engine::transformations_and_not_transformed_fields;
use crate::engine::HandleResult;
use crate::engine::SplitTree;
use crate::engine::StitchContext;
use crate::normalized::NormalizedField;
use crate::result::ResultCounter;
use crate::result::ResultNode;
use crate::schema::FieldCoordinate;
use crate::schema::Schema;
use crate::StitchError;
use crate::transformation::FieldTransformation;
use crate::transformation::HydrationTransformation;
use crate::transformation::TransformationMetadata;
use crate::transformation::TransformationRegistry;
use crate::transformation::TraversalControl;
use crate::transformation::TypeRenames;
use crate::transformation::UnapplyEnvironment;
use indexmap::IndexMap;
use indexmap::IndexSet;

type Result<T> = std::result::Result<T, StitchError>;

/// Settings fixed for the duration of one `convert`/`convert_children` call.
#[derive(Clone, Copy, Debug)]
struct Conversion<'c> {
    batched: bool,
    is_hydration_transformation: bool,
    normalized_root_field: Option<&'c NormalizedField>,
    only_children: bool,
}

/// Rewrites result trees returned by an underlying service into
/// overall-schema result trees.
///
/// Conversion walks the raw tree node by node. Untransformed nodes are
/// remapped to their overall field. Nodes that carry transformations are
/// unapplied, which may replace them with several sibling nodes. Fields
/// injected by the planner are dropped, and fields the planner removed are
/// reconstructed as null leaves.
///
/// A stitcher holds only shared references to read-only collaborators, so
/// one instance can convert independent trees concurrently.
#[derive(Clone, Copy, Debug)]
pub struct ServiceResultStitcher<'a> {
    context: &'a StitchContext,
    metadata: &'a TransformationMetadata,
    overall_schema: &'a Schema,
    registry: &'a TransformationRegistry,
    type_renames: &'a TypeRenames,
}
impl<'a> ServiceResultStitcher<'a> {
    pub fn new(
        overall_schema: &'a Schema,
        registry: &'a TransformationRegistry,
        metadata: &'a TransformationMetadata,
        type_renames: &'a TypeRenames,
        context: &'a StitchContext,
    ) -> Self {
        Self {
            context,
            metadata,
            overall_schema,
            registry,
            type_renames,
        }
    }

    /// Converts a whole raw tree. Top-level children are placed under
    /// `correct_root`.
    pub fn convert(
        &self,
        tree: &ResultNode,
        correct_root: &ResultNode,
    ) -> Result<ResultNode> {
        self.convert_impl(tree, correct_root, Conversion {
            batched: false,
            is_hydration_transformation: false,
            normalized_root_field: None,
            only_children: false,
        })
    }

    /// Converts the children of `root`, leaving `root` itself as is.
    ///
    /// Used to re-enter conversion in the middle of a tree, e.g. for the
    /// result of a hydration call, where `normalized_root_field` is the
    /// overall field being hydrated.
    pub fn convert_children(
        &self,
        root: &ResultNode,
        normalized_root_field: Option<&NormalizedField>,
        correct_root: &ResultNode,
        is_hydration_transformation: bool,
        batched: bool,
    ) -> Result<ResultNode> {
        self.convert_impl(root, correct_root, Conversion {
            batched,
            is_hydration_transformation,
            normalized_root_field,
            only_children: true,
        })
    }

    fn convert_impl(
        &self,
        root: &ResultNode,
        correct_root: &ResultNode,
        conversion: Conversion<'_>,
    ) -> Result<ResultNode> {
        let mut counter = ResultCounter::new();

        let handle_result = self
            .convert_single_node(&conversion, root, None, None, true, &mut counter)?
            .ok_or(StitchError::RootDeleted)?;
        if !handle_result.siblings.is_empty() {
            return Err(StitchError::RootSiblings);
        }
        if handle_result.traversal == TraversalControl::Abort {
            return Ok(handle_result.changed_node.with_counters(counter.snapshot()));
        }

        let changed_node = handle_result.changed_node;
        let new_children = self.convert_children_of(
            &conversion,
            &changed_node,
            Some(correct_root),
            &mut counter,
        )?;
        let mut changed_node = changed_node.with_children(new_children);

        if changed_node.is_object() {
            let normalized_field =
                if conversion.only_children {
                    conversion.normalized_root_field
                } else {
                    None
                };
            changed_node = add_removed_children(
                changed_node,
                normalized_field,
                self.context.normalized_query(),
                self.metadata,
                &mut counter,
            )?;
        }

        Ok(changed_node.with_counters(counter.snapshot()))
    }

    fn convert_children_of(
        &self,
        conversion: &Conversion<'_>,
        node: &ResultNode,
        correct_parent: Option<&ResultNode>,
        counter: &mut ResultCounter,
    ) -> Result<Vec<ResultNode>> {
        let mut new_children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            let handle_result = self.convert_recursively(
                conversion,
                child,
                correct_parent,
                Some(node),
                counter,
            )?;
            if let Some(handle_result) = handle_result {
                new_children.push(handle_result.changed_node);
                new_children.extend(handle_result.siblings);
            }
        }
        Ok(new_children)
    }

    fn convert_recursively(
        &self,
        conversion: &Conversion<'_>,
        node: &ResultNode,
        correct_parent: Option<&ResultNode>,
        direct_parent: Option<&ResultNode>,
        counter: &mut ResultCounter,
    ) -> Result<Option<HandleResult>> {
        let Some(mut handle_result) = self.convert_single_node(
            conversion,
            node,
            correct_parent,
            direct_parent,
            false,
            counter,
        )? else {
            return Ok(None);
        };
        if handle_result.traversal == TraversalControl::Abort {
            return Ok(Some(handle_result));
        }

        let new_children = self.convert_children_of(
            conversion,
            &handle_result.changed_node,
            Some(&handle_result.changed_node),
            counter,
        )?;
        let mut changed_node = handle_result.changed_node.with_children(new_children);

        let parent_is_hydration_input =
            correct_parent.is_some_and(|parent| parent.is_hydration_input());
        if changed_node.is_object() && !parent_is_hydration_input {
            changed_node = add_removed_children(
                changed_node,
                None,
                self.context.normalized_query(),
                self.metadata,
                counter,
            )?;
        }

        handle_result.changed_node = changed_node;
        Ok(Some(handle_result))
    }

    /// Converts `node` itself. `Ok(None)` means the node is dropped.
    fn convert_single_node(
        &self,
        conversion: &Conversion<'_>,
        node: &ResultNode,
        correct_parent: Option<&ResultNode>,
        direct_parent: Option<&ResultNode>,
        is_root: bool,
        counter: &mut ResultCounter,
    ) -> Result<Option<HandleResult>> {
        counter.increment_node_count();

        if conversion.only_children && is_root {
            // A hydrated root may be typed differently than the field it
            // is hydrated into.
            if let (Some(normalized_field), Some(field_def)) =
                (conversion.normalized_root_field, node.field_definition()) {
                check_for_type_rename(
                    normalized_field.field_definition(),
                    field_def,
                    self.type_renames,
                    counter,
                    0,
                );
            }
            return Ok(Some(HandleResult::simple(node.clone())));
        }

        if node.is_root() {
            return Ok(Some(HandleResult::simple(node.clone())));
        }

        if node.is_leaf()
            && node.alias().is_some_and(|alias| self.context.is_artificial_field(alias)) {
            log::trace!("dropping artificial field at `{}`", node.path());
            counter.decrement_node_count();
            return Ok(None);
        }

        let (transformations, not_transformed_field_ids) =
            transformations_and_not_transformed_fields(node, self.registry, self.metadata)?;

        let env = UnapplyEnvironment {
            batched: conversion.batched,
            is_hydration_transformation: conversion.is_hydration_transformation,
            overall_schema: self.overall_schema,
            parent_node: correct_parent,
            type_renames: self.type_renames,
        };

        if transformations.is_empty() {
            log::trace!("mapping {} node at `{}`", node.kind(), node.path());
            let mapped = map_node(node, &env, counter)?;
            return Ok(Some(HandleResult::simple(mapped)));
        }

        log::debug!(
            "unapplying {} transformation(s) at `{}` ({} untransformed field id(s))",
            transformations.len(),
            node.path(),
            not_transformed_field_ids.len(),
        );
        match transformations[0] {
            FieldTransformation::Hydration(hydration) => self.unapply_hydration(
                node,
                direct_parent,
                &transformations,
                hydration,
                &env,
                counter,
            ),

            FieldTransformation::Rename(_) => self.unapply_field_rename(
                conversion,
                node,
                direct_parent,
                &transformations,
                &env,
                counter,
            ).map(Some),
        }
    }

    fn unapply_field_rename(
        &self,
        conversion: &Conversion<'_>,
        node: &ResultNode,
        direct_parent: Option<&ResultNode>,
        transformations: &[&FieldTransformation],
        env: &UnapplyEnvironment<'_>,
        counter: &mut ResultCounter,
    ) -> Result<HandleResult> {
        let mut transformations_by_definition: IndexMap<&FieldCoordinate, Vec<&FieldTransformation>> =
            IndexMap::new();
        for &transformation in transformations {
            transformations_by_definition
                .entry(transformation.definition())
                .or_default()
                .push(transformation);
        }

        let SplitTree { not_transformed, transformed } =
            split_tree_by_transformation_definition(
                node,
                direct_parent,
                self.registry,
                self.metadata,
            )?;

        let empty_group = |coordinate: &FieldCoordinate| StitchError::EmptyTransformationGroup {
            coordinate: coordinate.clone(),
            path: node.path().clone(),
        };

        let mut unapply_results = Vec::with_capacity(transformed.len());
        for (definition, transformed_nodes) in &transformed {
            let group = transformations_by_definition
                .get(definition)
                .filter(|group| !group.is_empty())
                .ok_or_else(|| empty_group(definition))?;

            // Aliases of one overall field share a definition but each is
            // reported under its own result key.
            for (result_key, alias_group) in group_by_result_key(group) {
                let alias_ids = alias_group
                    .iter()
                    .map(|transformation| transformation.id())
                    .collect::<IndexSet<_>>();
                let alias_nodes = transformed_nodes
                    .iter()
                    .filter_map(|transformed_node| nodes_with_transformation_ids(
                        transformed_node,
                        Some(&alias_ids),
                        self.metadata,
                    ))
                    .collect::<Vec<_>>();
                let first_node = alias_nodes
                    .first()
                    .ok_or_else(|| empty_group(definition))?;
                let transformation = alias_group[0];

                let merged_node;
                let result_node =
                    if transformation.is_hydration() {
                        merged_node = merge_hydration_nodes(&alias_nodes, first_node)?;
                        &merged_node
                    } else {
                        first_node
                    };

                log::trace!("unapplying `{definition}` as `{result_key}` at `{}`", node.path());
                let unapply_result = transformation.unapply(result_node, &alias_group, env)?;

                // Children of a renamed field never see the underlying type,
                // so nothing is pre-paid for them.
                if let (Some(overall_def), Some(underlying_def)) =
                    (unapply_result.node.field_definition(), node.field_definition()) {
                    check_for_type_rename(overall_def, underlying_def, env.type_renames, counter, 0);
                }

                unapply_results.push(unapply_result);
            }
        }
        counter.increment_field_rename_count(unapply_results.len());

        let mut converted = Vec::with_capacity(unapply_results.len() + 1);
        if let Some(not_transformed) = not_transformed {
            let mapped = map_node(&not_transformed, env, counter)?;
            converted.push(self.convert_children(
                &mapped,
                None,
                &mapped,
                conversion.is_hydration_transformation,
                conversion.batched,
            )?);
        }

        for unapply_result in unapply_results {
            converted.push(match unapply_result.traversal {
                TraversalControl::Abort => unapply_result.node,
                TraversalControl::Continue => self.convert_children(
                    &unapply_result.node,
                    None,
                    &unapply_result.node,
                    conversion.is_hydration_transformation,
                    conversion.batched,
                )?,
            });
        }

        for converted_node in &converted {
            counter.increment_node_count_by(converted_node.total_node_count());
            counter.increment_field_rename_count(converted_node.total_field_rename_count());
            counter.increment_type_rename_count(converted_node.total_type_rename_count());
        }
        // `node` itself was counted on the way in and is replaced by the
        // converted nodes.
        counter.decrement_node_count();

        let mut converted = converted.into_iter();
        let changed_node = converted
            .next()
            .ok_or_else(|| empty_group(&node_coordinate(node)))?;
        Ok(HandleResult::with_siblings(
            changed_node,
            converted.collect(),
            TraversalControl::Abort,
        ))
    }

    fn unapply_hydration(
        &self,
        node: &ResultNode,
        direct_parent: Option<&ResultNode>,
        transformations: &[&FieldTransformation],
        hydration: &HydrationTransformation,
        env: &UnapplyEnvironment<'_>,
        counter: &mut ResultCounter,
    ) -> Result<Option<HandleResult>> {
        let transformation_id = hydration.id();
        let primary_field_id = self.registry
            .field_id(transformation_id)
            .ok_or(StitchError::UnknownTransformation { transformation_id })?;

        // Secondary source fields were already merged into the primary one.
        if !node.field_ids().contains(&primary_field_id) {
            log::trace!("dropping hydration source node at `{}`", node.path());
            counter.decrement_node_count();
            return Ok(None);
        }

        let SplitTree { not_transformed, transformed } =
            split_tree_by_transformation_definition(
                node,
                direct_parent,
                self.registry,
                self.metadata,
            )?;
        if transformed.len() != 1 {
            return Err(StitchError::UnexpectedHydrationSourceGroups {
                count: transformed.len(),
                path: node.path().clone(),
            });
        }
        let Some((definition, sources)) = transformed.into_iter().next() else {
            return Err(StitchError::UnexpectedHydrationSourceGroups {
                count: 0,
                path: node.path().clone(),
            });
        };
        if sources.is_empty() {
            return Err(StitchError::EmptyTransformationGroup {
                coordinate: definition,
                path: node.path().clone(),
            });
        }

        let merged_node = merge_hydration_nodes(&sources, node)?;
        let unapply_result = hydration.unapply(&merged_node, transformations, env)?;

        // Each element of a hydrated list is counted again once its own
        // hydration result is stitched in: /foo, /foo[0], /foo[1], /foo[2]
        // leave the count at -2, -1, 0, 1.
        let decrement =
            if unapply_result.node.is_list() {
                -(unapply_result.node.children().len() as i64)
            } else {
                -1
            };
        if let (Some(overall_def), Some(underlying_def)) =
            (unapply_result.node.field_definition(), node.field_definition()) {
            check_for_type_rename(
                overall_def,
                underlying_def,
                env.type_renames,
                counter,
                decrement,
            );
        }

        match not_transformed {
            Some(not_transformed) => {
                let changed_node = map_node(&not_transformed, env, counter)?;
                counter.increment_node_count_by(unapply_result.node.total_node_count());
                Ok(Some(HandleResult::with_siblings(
                    changed_node,
                    vec![unapply_result.node],
                    TraversalControl::Continue,
                )))
            },

            None => {
                if unapply_result.traversal == TraversalControl::Abort {
                    counter.increment_node_count_by(unapply_result.node.total_node_count());
                    counter.decrement_node_count();
                }
                Ok(Some(HandleResult::with_siblings(
                    unapply_result.node,
                    vec![],
                    unapply_result.traversal,
                )))
            },
        }
    }
}

fn node_coordinate(node: &ResultNode) -> FieldCoordinate {
    match node.field_definition() {
        Some(field_def) => field_def.coordinate(),
        None => FieldCoordinate::new(node.object_type().unwrap_or_default(), ""),
    }
}

/// Splits one definition group into its aliases, keeping first-seen order.
fn group_by_result_key<'t>(
    group: &[&'t FieldTransformation],
) -> IndexMap<&'t str, Vec<&'t FieldTransformation>> {
    let mut by_result_key: IndexMap<&str, Vec<&FieldTransformation>> = IndexMap::new();
    for &transformation in group {
        by_result_key
            .entry(transformation.result_key())
            .or_default()
            .push(transformation);
    }
    by_result_key
}
