//! The fold-based transform algebra of [`TreeNode`].
//!
//! Every operation here is a pre-order, left-to-right depth-first traversal
//! built on [`TreeNode::fold_with_indices`]. Transforms that produce a new tree
//! of the same shape locate the parent of each visited node in the tree being
//! built through the visited node's indices, which stay valid because the shape
//! does not change.

use std::mem;

use super::traverse::{child_indices, Stack};
use super::TreeNode;

/// A value paired with the indices of the node holding it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueWithIndices<T> {
    pub indices: Vec<usize>,
    pub value: T,
}

/// A value paired with the zero-based depth of the node holding it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueWithLevel<T> {
    pub level: usize,
    pub value: T,
}

impl<T> TreeNode<T> {
    /// Accumulates a value starting with `initial` and applying `operation` to the
    /// accumulator, each node and the node's indices, in pre-order.
    pub fn fold_with_indices<'a, S, F>(&'a self, initial: S, mut operation: F) -> S
    where
        F: FnMut(S, &'a TreeNode<T>, &[usize]) -> S,
    {
        self.iter_preorder_with_indices()
            .fold(initial, |acc, (node, indices)| operation(acc, node, &indices))
    }

    /// Accumulates a value starting with `initial` and applying `operation` to the
    /// accumulator and each node, in pre-order.
    pub fn fold_node<'a, S, F>(&'a self, initial: S, mut operation: F) -> S
    where
        F: FnMut(S, &'a TreeNode<T>) -> S,
    {
        self.fold_with_indices(initial, |acc, node, _| operation(acc, node))
    }

    /// Accumulates a value starting with `initial` and applying `operation` to the
    /// accumulator and each value, in pre-order.
    pub fn fold<'a, S, F>(&'a self, initial: S, mut operation: F) -> S
    where
        F: FnMut(S, &'a T) -> S,
    {
        self.fold_node(initial, |acc, node| operation(acc, &node.value))
    }

    /// Builds a tree of the same shape whose values are `transform(node, indices)`.
    fn map_with_indices<S, F>(&self, mut transform: F) -> TreeNode<S>
    where
        F: FnMut(&TreeNode<T>, &[usize]) -> S,
    {
        let initial = TreeNode::leaf(transform(self, &[]));
        self.fold_with_indices(initial, |mut acc, node, indices| {
            if let Some((_, parent)) = indices.split_last() {
                let mapped = TreeNode::leaf(transform(node, indices));
                if let Some(parent) = acc.get_mut(parent) {
                    parent.push_child(mapped);
                }
            }
            acc
        })
    }

    /// Returns a tree of the same shape containing `transform` applied to every node.
    pub fn map_node<S, F>(&self, mut transform: F) -> TreeNode<S>
    where
        F: FnMut(&TreeNode<T>) -> S,
    {
        self.map_with_indices(|node, _| transform(node))
    }

    /// Returns a tree of the same shape containing `transform` applied to every value.
    pub fn map<S, F>(&self, mut transform: F) -> TreeNode<S>
    where
        F: FnMut(&T) -> S,
    {
        self.map_node(|node| transform(&node.value))
    }

    /// Builds a tree of the same shape bottom-up: `transform` receives each node
    /// together with its children's already transformed subtrees.
    pub fn map_node_bottom_up<S, F>(&self, mut transform: F) -> TreeNode<S>
    where
        F: FnMut(&TreeNode<T>, &[TreeNode<S>]) -> S,
    {
        let mut stack = Stack::new();
        stack.extend(self.children.iter().rev().map(|child| (child, false)));
        let mut transformed: Vec<TreeNode<S>> = Vec::new();

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                // The children were finished left to right just before their parent.
                let children = transformed.split_off(transformed.len() - node.children.len());
                let value = transform(node, &children);
                transformed.push(TreeNode::new(value, children));
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }

        // Only the finished children of the start node are left.
        let value = transform(self, &transformed);
        TreeNode::new(value, transformed)
    }

    /// Calls `action` on every node, in pre-order.
    pub fn for_each_node<F>(&self, mut action: F)
    where
        F: FnMut(&TreeNode<T>),
    {
        self.fold_node((), |(), node| action(node));
    }

    /// Calls `action` on every value, in pre-order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&T),
    {
        self.for_each_node(|node| action(&node.value));
    }

    /// Returns a tree holding only the nodes matching `predicate`, or `None` if
    /// the root does not match.
    ///
    /// A node that does not match is dropped together with its subtree. A
    /// matching node is attached to the node found at its parent's indices in
    /// the tree built so far. When an earlier sibling of the node's parent (or of
    /// any further ancestor) was dropped, those indices no longer resolve and the
    /// node is dropped as well, even though it matches.
    pub fn filter_node<F>(&self, mut predicate: F) -> Option<TreeNode<T>>
    where
        F: FnMut(&TreeNode<T>) -> bool,
        T: Clone,
    {
        if !predicate(self) {
            return None;
        }
        let initial = TreeNode::leaf(self.value.clone());
        let filtered = self.fold_with_indices(initial, |mut acc, node, indices| {
            let Some((_, parent)) = indices.split_last() else {
                return acc;
            };
            if predicate(node) {
                if let Some(parent) = acc.get_mut(parent) {
                    parent.push_child(TreeNode::leaf(node.value.clone()));
                }
            }
            acc
        });
        Some(filtered)
    }

    /// Returns a tree holding only the values matching `predicate`, or `None` if
    /// the root value does not match. See [`filter_node`](Self::filter_node).
    pub fn filter<F>(&self, mut predicate: F) -> Option<TreeNode<T>>
    where
        F: FnMut(&T) -> bool,
        T: Clone,
    {
        self.filter_node(|node| predicate(&node.value))
    }

    /// Returns every node matching `predicate`, in pre-order.
    pub fn find_node<F>(&self, mut predicate: F) -> Vec<&TreeNode<T>>
    where
        F: FnMut(&TreeNode<T>) -> bool,
    {
        self.fold_node(Vec::new(), |mut found, node| {
            if predicate(node) {
                found.push(node);
            }
            found
        })
    }

    /// Returns every node whose value matches `predicate`, in pre-order.
    pub fn find<F>(&self, mut predicate: F) -> Vec<&TreeNode<T>>
    where
        F: FnMut(&T) -> bool,
    {
        self.find_node(|node| predicate(&node.value))
    }

    /// Maps every node to a tree with `transform` and flattens the result one level.
    ///
    /// Each node takes the value of its transformed tree. The transformed tree's
    /// own children are placed before the node's mapped children when `prepend`
    /// is true and after them otherwise.
    pub fn flat_map_node<S, F>(&self, prepend: bool, transform: F) -> TreeNode<S>
    where
        F: FnMut(&TreeNode<T>) -> TreeNode<S>,
    {
        self.map_node(transform).flatten(prepend)
    }

    /// Value counterpart of [`flat_map_node`](Self::flat_map_node).
    pub fn flat_map<S, F>(&self, prepend: bool, mut transform: F) -> TreeNode<S>
    where
        F: FnMut(&T) -> TreeNode<S>,
    {
        self.flat_map_node(prepend, |node| transform(&node.value))
    }

    /// Returns a tree of the same shape pairing every value with its indices.
    pub fn with_indices(&self) -> TreeNode<ValueWithIndices<T>>
    where
        T: Clone,
    {
        self.map_with_indices(|node, indices| ValueWithIndices {
            indices: indices.to_vec(),
            value: node.value.clone(),
        })
    }

    /// Returns a tree of the same shape pairing every value with its zero-based level.
    pub fn with_level(&self) -> TreeNode<ValueWithLevel<T>>
    where
        T: Clone,
    {
        self.map_with_indices(|node, indices| ValueWithLevel {
            level: indices.len(),
            value: node.value.clone(),
        })
    }

    /// Flattens the tree into its values, in pre-order.
    pub fn to_flat_list(&self) -> Vec<&T> {
        self.fold(Vec::new(), |mut values, value| {
            values.push(value);
            values
        })
    }

    /// Flattens the tree into its nodes, in pre-order.
    pub fn to_flat_list_node(&self) -> Vec<&TreeNode<T>> {
        self.fold_node(Vec::new(), |mut nodes, node| {
            nodes.push(node);
            nodes
        })
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.fold_node(0, |count, _| count + 1)
    }
}

impl<T> TreeNode<TreeNode<T>> {
    /// Flattens a tree of trees into a single tree.
    ///
    /// The inner tree of every node becomes that node. The node's own flattened
    /// children are appended after the inner tree's children when `prepend` is
    /// true, so the inner children come first, and inserted before them otherwise.
    pub fn flatten(self, prepend: bool) -> TreeNode<T> {
        let TreeNode {
            value: mut result,
            mut children,
        } = self;

        let mut stack = Stack::new();
        let offset = if prepend { result.children.len() } else { 0 };
        for (index, child) in mem::take(&mut children.0).into_iter().enumerate().rev() {
            stack.push((child, vec![index + offset]));
        }

        while let Some((node, indices)) = stack.pop() {
            let TreeNode {
                value: inner,
                mut children,
            } = node;
            let offset = if prepend { inner.children.len() } else { 0 };

            if let Some((&position, parent)) = indices.split_last() {
                if let Some(parent) = result.get_mut(parent) {
                    let position = position.min(parent.children.len());
                    parent.children.insert(position, inner);
                }
            }

            for (index, child) in mem::take(&mut children.0).into_iter().enumerate().rev() {
                stack.push((child, child_indices(&indices, index + offset)));
            }
        }

        result
    }
}
