mod handle_result;
mod hydration_merge;
mod node_splitting;
mod removed_fields;
mod result_node_mapper;
mod stitch_context;
mod stitcher;

pub use handle_result::HandleResult;
pub(crate) use hydration_merge::merge_hydration_nodes;
pub(crate) use node_splitting::nodes_with_transformation_ids;
pub(crate) use node_splitting::split_tree_by_transformation_definition;
pub(crate) use node_splitting::transformations_and_not_transformed_fields;
pub(crate) use node_splitting::SplitTree;
pub(crate) use removed_fields::add_removed_children;
pub(crate) use result_node_mapper::check_for_type_rename;
pub(crate) use result_node_mapper::map_node;
pub use stitch_context::DEFAULT_ARTIFICIAL_FIELD_MARKER;
pub use stitch_context::StitchContext;
pub use stitch_context::StitchContextBuilder;
pub use stitcher::ServiceResultStitcher;

#[cfg(test)]
mod tests;
