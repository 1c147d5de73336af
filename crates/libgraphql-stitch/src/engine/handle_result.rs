use crate::result::ResultNode;
use crate::transformation::TraversalControl;

/// The outcome of converting one node.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleResult {
    pub changed_node: ResultNode,

    /// Already-converted nodes to splice in right after `changed_node`. The
    /// caller never descends into these.
    pub siblings: Vec<ResultNode>,
    pub traversal: TraversalControl,
}
impl HandleResult {
    /// A replacement that still needs its children converted.
    pub fn simple(changed_node: ResultNode) -> Self {
        Self {
            changed_node,
            siblings: vec![],
            traversal: TraversalControl::Continue,
        }
    }

    pub fn with_siblings(
        changed_node: ResultNode,
        siblings: Vec<ResultNode>,
        traversal: TraversalControl,
    ) -> Self {
        Self {
            changed_node,
            siblings,
            traversal,
        }
    }
}
