//! Defines [`TreeNode`], an owned multi-way tree, and its traversal and transform algebra.
//!
//! A tree is a value together with an ordered list of owned child trees. Every
//! node owns its children exclusively, so a `TreeNode` can never share subtrees
//! or contain cycles.
//!
//! Locations inside a tree are described by *indices*: the sequence of
//! zero-based child positions leading from the root to a node. The root has
//! empty indices, `[1, 0]` is the first child of the second child of the root.
//!
//! All traversals are pre-order depth-first searches driven by an explicit
//! [`Stack`], so arbitrarily deep trees can be processed without exhausting the
//! call stack. Equality, hashing, cloning and dropping follow the same rule.
//!
//! *   [`traverse`]: the traversal stack and pre-order iterators.
//! *   [`transform`]: fold, map, filter, find, flat-map and friends.
//! *   [`debug_print`]: box-drawing rendering of a tree.
//! *   `child_vec`: an id-linked store used to assemble forests from flat records.

use std::hash::{Hash, Hasher};
use std::mem;

use derive_more::{Deref, DerefMut};

pub(crate) mod child_vec;
pub mod debug_print;
pub mod transform;
pub mod traverse;

use traverse::{PreorderIndicesIter, PreorderIter, Stack};

/// A node of a multi-way tree holding a `value` and an ordered list of children.
///
/// Two trees are equal when their values and their child lists are recursively
/// equal, child order included.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<T> {
    pub(crate) value: T,
    pub(crate) children: ChildList<T>,
}

/// The children of a [`TreeNode`].
///
/// Dropping a child list tears the subtrees down with an explicit stack.
#[derive(Deref, DerefMut)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub(crate) struct ChildList<T>(Vec<TreeNode<T>>);

impl<T> Default for ChildList<T> {
    fn default() -> Self {
        ChildList(Vec::new())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ChildList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> Drop for ChildList<T> {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.0);
        while let Some(node) = pending.pop() {
            let TreeNode { mut children, .. } = node;
            pending.append(&mut children.0);
        }
    }
}

impl<T> TreeNode<T> {
    /// Creates a node with the given children.
    pub fn new(value: T, children: Vec<TreeNode<T>>) -> Self {
        TreeNode {
            value,
            children: ChildList(children),
        }
    }

    /// Creates a node without children.
    pub fn leaf(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn children(&self) -> &[TreeNode<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends `child` as the last child of this node.
    pub fn push_child(&mut self, child: TreeNode<T>) {
        self.children.push(child);
    }

    /// Builder-style [`push_child`](Self::push_child).
    pub fn with_child(mut self, child: TreeNode<T>) -> Self {
        self.push_child(child);
        self
    }

    /// Returns the node at `indices`, or `None` if any index is out of bounds.
    ///
    /// Empty indices resolve to `self`.
    pub fn get(&self, indices: &[usize]) -> Option<&TreeNode<T>> {
        let mut current = self;
        for &index in indices {
            current = current.children.get(index)?;
        }
        Some(current)
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut TreeNode<T>> {
        let mut current = self;
        for &index in indices {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }

    /// Returns a pre-order DFS iterator over the nodes of this tree.
    pub fn iter_preorder(&self) -> PreorderIter<'_, T> {
        PreorderIter::new(self)
    }

    /// Returns a pre-order DFS iterator over the nodes of this tree and their indices.
    pub fn iter_preorder_with_indices(&self) -> PreorderIndicesIter<'_, T> {
        PreorderIndicesIter::new(self)
    }
}

impl<T> From<T> for TreeNode<T> {
    fn from(value: T) -> Self {
        TreeNode::leaf(value)
    }
}

/// Deep copy. The copy shares no node with the original.
impl<T: Clone> Clone for TreeNode<T> {
    fn clone(&self) -> Self {
        self.map_node_bottom_up(|node, _| node.value.clone())
    }
}

impl<T: PartialEq> PartialEq for TreeNode<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = Stack::new();
        stack.push((self, other));
        while let Some((a, b)) = stack.pop() {
            if a.value != b.value || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

impl<T: Eq> Eq for TreeNode<T> {}

impl<T: Hash> Hash for TreeNode<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.iter_preorder() {
            node.value.hash(state);
            node.children.len().hash(state);
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::TreeNode;

    fn sample() -> TreeNode<i32> {
        TreeNode::new(
            1,
            vec![
                TreeNode::new(11, vec![TreeNode::leaf(111)]),
                TreeNode::leaf(12),
                TreeNode::leaf(13),
            ],
        )
    }

    fn hash_of<T: Hash>(t: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        t.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn leaf_has_no_children() {
        assert_eq!(TreeNode::leaf(1), TreeNode::new(1, vec![]));
        assert!(TreeNode::leaf(1).is_leaf());
        assert_eq!(TreeNode::from(1), TreeNode::leaf(1));
    }

    #[test]
    fn builder_appends_in_order() {
        let tree = TreeNode::leaf(1)
            .with_child(TreeNode::leaf(11).with_child(TreeNode::leaf(111)))
            .with_child(TreeNode::leaf(12))
            .with_child(TreeNode::leaf(13));
        assert_eq!(tree, sample());
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = TreeNode::new(1, vec![TreeNode::leaf(2), TreeNode::leaf(3)]);
        let b = TreeNode::new(1, vec![TreeNode::leaf(3), TreeNode::leaf(2)]);
        let c = TreeNode::new(1, vec![TreeNode::leaf(2)]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
        assert_eq!(hash_of(&a), hash_of(&a.clone()));
    }

    #[test]
    fn same_values_different_shape_are_not_equal() {
        // 1[2[3]] and 1[2, 3] visit the same values in the same order.
        let deep = TreeNode::new(1, vec![TreeNode::new(2, vec![TreeNode::leaf(3)])]);
        let wide = TreeNode::new(1, vec![TreeNode::leaf(2), TreeNode::leaf(3)]);
        assert_ne!(deep, wide);
        assert_ne!(hash_of(&deep), hash_of(&wide));
    }

    #[test]
    fn get_resolves_indices() {
        let tree = sample();
        assert_eq!(tree.get(&[]), Some(&tree));
        assert_eq!(tree.get(&[0]).map(TreeNode::value), Some(&11));
        assert_eq!(tree.get(&[0, 0]).map(TreeNode::value), Some(&111));
        assert_eq!(tree.get(&[2]).map(TreeNode::value), Some(&13));
        assert_eq!(tree.get(&[3]), None);
        assert_eq!(tree.get(&[0, 0, 0]), None);
        assert_eq!(tree.get(&[1, 0]), None);
    }

    #[test]
    fn get_mut_appends_below() {
        let mut tree = sample();
        tree.get_mut(&[1]).unwrap().push_child(TreeNode::leaf(121));
        assert_eq!(tree.get(&[1, 0]).map(TreeNode::value), Some(&121));
        assert!(tree.get_mut(&[5]).is_none());
    }

    #[test]
    fn clone_is_deep() {
        let tree = sample();
        let mut copy = tree.clone();
        assert_eq!(copy, tree);

        copy.get_mut(&[0]).unwrap().push_child(TreeNode::leaf(112));
        assert_ne!(copy, tree);
        assert_eq!(tree.get(&[0]).unwrap().children().len(), 1);
    }

    #[test]
    fn deep_tree_is_stack_safe() {
        let depth = 100_000;
        let mut chain = TreeNode::leaf(depth);
        for value in (0..depth).rev() {
            chain = TreeNode::new(value, vec![chain]);
        }

        let copy = chain.clone();
        assert!(copy == chain);
        assert_eq!(hash_of(&copy), hash_of(&chain));
        assert_eq!(chain.iter_preorder().count(), depth + 1);
        drop(copy);
        drop(chain);
    }
}
