//! Explicit-stack traversal helpers shared by every tree algorithm in the crate.
//!
//! Nothing in here recurses, so traversal depth is bounded by heap memory and
//! not by the size of the call stack.

use super::TreeNode;

/// A LIFO stack used to drive depth-first traversals without recursion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stack<E> {
    items: Vec<E>,
}

impl<E> Default for Stack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Stack<E> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Pushes `item` on top of the stack.
    pub fn push(&mut self, item: E) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed item.
    pub fn pop(&mut self) -> Option<E> {
        self.items.pop()
    }

    /// Returns the most recently pushed item without removing it.
    pub fn peek(&self) -> Option<&E> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<E> Extend<E> for Stack<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// A pre-order DFS iterator over the nodes of a tree.
#[derive(Clone)]
pub struct PreorderIter<'a, T> {
    stack: Stack<&'a TreeNode<T>>,
}

impl<'a, T> PreorderIter<'a, T> {
    pub fn new(start: &'a TreeNode<T>) -> Self {
        let mut stack = Stack::new();
        stack.push(start);
        PreorderIter { stack }
    }
}

impl<'a, T> Iterator for PreorderIter<'a, T> {
    type Item = &'a TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so that the first child is popped next.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A pre-order DFS iterator yielding every node together with its indices,
/// the child positions leading from the start node to it.
///
/// The start node has empty indices.
#[derive(Clone)]
pub struct PreorderIndicesIter<'a, T> {
    stack: Stack<(&'a TreeNode<T>, Vec<usize>)>,
}

impl<'a, T> PreorderIndicesIter<'a, T> {
    pub fn new(start: &'a TreeNode<T>) -> Self {
        let mut stack = Stack::new();
        stack.push((start, Vec::new()));
        PreorderIndicesIter { stack }
    }
}

impl<'a, T> Iterator for PreorderIndicesIter<'a, T> {
    type Item = (&'a TreeNode<T>, Vec<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, indices) = self.stack.pop()?;
        for (index, child) in node.children.iter().enumerate().rev() {
            self.stack.push((child, child_indices(&indices, index)));
        }
        Some((node, indices))
    }
}

/// Indices of the `index`-th child of the node located at `parent`.
pub(crate) fn child_indices(parent: &[usize], index: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity(parent.len() + 1);
    indices.extend_from_slice(parent);
    indices.push(index);
    indices
}
