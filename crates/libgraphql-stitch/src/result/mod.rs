mod complexity;
mod graphql_error;
mod result_counter;
mod result_node;
mod result_path;

pub use complexity::ResultComplexityAggregator;
pub use complexity::RESULT_COMPLEXITY_EXTENSION;
pub use graphql_error::GraphQLError;
pub use result_counter::ResultCounter;
pub use result_counter::ResultCounters;
pub use result_node::FieldIds;
pub use result_node::ResultNode;
pub use result_node::ResultNodeBuilder;
pub use result_node::ResultNodeKind;
pub use result_node::ResultNodeVariant;
pub use result_node::RootInfo;
pub use result_path::PathSegment;
pub use result_path::ResultPath;

#[cfg(test)]
mod tests;
