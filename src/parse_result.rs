use crate::tree::TreeNode;

/// The outcome of converting a flat list `L` into a forest of [`TreeNode<V>`].
///
/// Records whose parent could not be found among the other records are not
/// errors; they are returned untouched in `parent_node_not_found_list`, a list
/// of the same kind as the input, so the caller can decide what to do with them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseResult<L, V> {
    /// The resolved trees, one per root record.
    pub tree_nodes: Vec<TreeNode<V>>,
    /// The records whose parent was not found.
    pub parent_node_not_found_list: L,
}

impl<L, V> ParseResult<L, V> {
    /// Splits the result into the forest and the residual list.
    pub fn into_parts(self) -> (Vec<TreeNode<V>>, L) {
        (self.tree_nodes, self.parent_node_not_found_list)
    }
}
