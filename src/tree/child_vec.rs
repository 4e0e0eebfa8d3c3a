//! An index-based forest store where each node keeps an ordered vector of its
//! children's ids.
//!
//! Used while a forest is assembled from records whose parents are looked up
//! by key: the nodes can be linked by id before any owned [`TreeNode`] exists,
//! and [`ChildVecStore::into_trees`] then moves the values into owned trees.

use super::TreeNode;

/// Identifier of a node within a [`ChildVecStore`].
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TreeNodeId(pub(crate) usize);

/// A node of the store: its data, if any, and its children in order.
///
/// A dataless node only exists to keep ids aligned; it never makes it into a tree.
#[derive(Clone, Debug)]
struct CVNode<V> {
    data: Option<V>,
    children: Vec<TreeNodeId>,
}

/// Children must be added after their parent, i.e. a child's id is always
/// greater than its parent's id.
#[derive(Clone, Debug)]
pub(crate) struct ChildVecStore<V> {
    nodes: Vec<CVNode<V>>,
}

impl<V> ChildVecStore<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        ChildVecStore {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Adds a node without a parent.
    pub(crate) fn add_node(&mut self, data: V) -> TreeNodeId {
        self.push(Some(data))
    }

    /// Adds a placeholder node. It and its whole subtree are discarded by
    /// [`into_trees`](Self::into_trees).
    pub(crate) fn add_dataless_node(&mut self) -> TreeNodeId {
        self.push(None)
    }

    fn push(&mut self, data: Option<V>) -> TreeNodeId {
        let node_id = TreeNodeId(self.nodes.len());
        self.nodes.push(CVNode {
            data,
            children: Vec::new(),
        });
        node_id
    }

    /// Appends `child` as the last child of `parent`.
    pub(crate) fn add_child(&mut self, parent: TreeNodeId, child: TreeNodeId) {
        debug_assert!(parent < child, "children are added after their parent");
        self.nodes[parent.0].children.push(child);
    }

    /// Moves the data into owned trees, one per id in `roots`, in that order.
    ///
    /// Nodes are assembled from the highest id down, so every child tree is
    /// complete before its parent takes it.
    pub(crate) fn into_trees(self, roots: &[TreeNodeId]) -> Vec<TreeNode<V>> {
        let mut built: Vec<Option<TreeNode<V>>> = Vec::with_capacity(self.nodes.len());
        built.resize_with(self.nodes.len(), || None);

        for (i, node) in self.nodes.into_iter().enumerate().rev() {
            let children: Vec<_> = node
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            built[i] = node.data.map(|data| TreeNode::new(data, children));
        }

        roots
            .iter()
            .filter_map(|root| built.get_mut(root.0).and_then(Option::take))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use similar_asserts::assert_eq;

    use super::ChildVecStore;
    use crate::tree::TreeNode;

    #[test]
    fn assembles_forest_in_root_order() {
        let mut store = ChildVecStore::with_capacity(5);
        let a = store.add_node("a");
        let b = store.add_node("b");
        let a1 = store.add_node("a1");
        let a2 = store.add_node("a2");
        let a11 = store.add_node("a11");
        store.add_child(a, a1);
        store.add_child(a, a2);
        store.add_child(a1, a11);

        let trees = store.into_trees(&[b, a]);
        assert_eq!(
            trees,
            vec![
                TreeNode::leaf("b"),
                TreeNode::new(
                    "a",
                    vec![
                        TreeNode::new("a1", vec![TreeNode::leaf("a11")]),
                        TreeNode::leaf("a2")
                    ]
                ),
            ]
        );
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut store = ChildVecStore::with_capacity(4);
        let root = store.add_node(0);
        let late = store.add_node(2);
        let early = store.add_node(1);
        store.add_child(root, early);
        store.add_child(root, late);

        assert_eq!(
            store.into_trees(&[root]),
            vec![TreeNode::new(0, vec![TreeNode::leaf(1), TreeNode::leaf(2)])]
        );
    }

    #[test]
    fn dataless_subtrees_are_discarded() {
        let mut store = ChildVecStore::with_capacity(4);
        let root = store.add_node(0);
        let hole = store.add_dataless_node();
        let below_hole = store.add_node(2);
        let kept = store.add_node(3);
        store.add_child(hole, below_hole);
        store.add_child(root, kept);

        let trees = store.into_trees(&[root, hole]);
        assert_eq!(trees, vec![TreeNode::new(0, vec![TreeNode::leaf(3)])]);
    }
}
