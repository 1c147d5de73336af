use crate::result::ResultNode;
use crate::result::ResultPath;
use crate::schema::Schema;
use crate::transformation::TypeRenames;

/// Whether the caller must still descend into the children of a node
/// produced by an unapply.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraversalControl {
    Continue,
    Abort,
}

/// The context an unapply runs in.
#[derive(Clone, Copy, Debug)]
pub struct UnapplyEnvironment<'a> {
    pub batched: bool,
    pub is_hydration_transformation: bool,
    pub overall_schema: &'a Schema,

    /// The parent node in the overall result. This differs from the raw
    /// parent in the underlying tree whenever the raw parent was split.
    pub parent_node: Option<&'a ResultNode>,
    pub type_renames: &'a TypeRenames,
}
impl UnapplyEnvironment<'_> {
    pub fn parent_path(&self) -> ResultPath {
        self.parent_node
            .map(|parent| parent.path().clone())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnapplyResult {
    pub node: ResultNode,
    pub traversal: TraversalControl,
}
