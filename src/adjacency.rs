//! The adjacency-list representation of a forest: one `(parent id, self id, value)`
//! record per node.
//!
//! A record without a parent id is a root. [`AdjacencyList::into_tree_nodes`]
//! links records by matching parent ids against self ids and
//! [`AdjacencyList::from_tree_node`] goes the other way.

use std::fmt;
use std::hash::Hash;
use std::mem;

use derive_more::Deref;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::error::TreeError;
use crate::parse_result::ParseResult;
use crate::tree::traverse::{child_indices, Stack};
use crate::tree::TreeNode;

/// One record of an [`AdjacencyList`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyListItem<ID, V> {
    pub parent_node_id: Option<ID>,
    pub self_node_id: Option<ID>,
    pub value: V,
}

impl<ID, V> AdjacencyListItem<ID, V> {
    pub fn new(parent_node_id: Option<ID>, self_node_id: Option<ID>, value: V) -> Self {
        AdjacencyListItem {
            parent_node_id,
            self_node_id,
            value,
        }
    }

    /// Whether the record has no parent, i.e. is a root candidate.
    pub fn is_root(&self) -> bool {
        self.parent_node_id.is_none()
    }
}

/// A list of [`AdjacencyListItem`]s in which every `(parent id, self id)` pair is unique.
///
/// The order of the records does not affect the conversion to trees but is
/// kept for iteration. Equality, hashing and `Debug` are those of the
/// underlying sequence.
#[derive(Clone, PartialEq, Eq, Hash, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct AdjacencyList<ID, V> {
    items: Vec<AdjacencyListItem<ID, V>>,
}

/// [`ParseResult`] of an [`AdjacencyList`].
pub type AdjacencyListParseResult<ID, V> = ParseResult<AdjacencyList<ID, V>, V>;

impl<ID, V> AdjacencyList<ID, V> {
    pub fn items(&self) -> &[AdjacencyListItem<ID, V>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<AdjacencyListItem<ID, V>> {
        self.items
    }
}

impl<ID: Eq + Hash, V> AdjacencyList<ID, V> {
    /// Creates a list, failing if a `(parent id, self id)` pair occurs twice.
    pub fn new(items: Vec<AdjacencyListItem<ID, V>>) -> Result<Self, TreeError> {
        let has_duplicate = items
            .iter()
            .map(|item| (item.parent_node_id.as_ref(), item.self_node_id.as_ref()))
            .duplicates()
            .next()
            .is_some();
        if has_duplicate {
            return Err(TreeError::DuplicateAdjacencyPair);
        }
        Ok(AdjacencyList { items })
    }

    /// Creates a list from `(parent id, value)` pairs, taking each self id from
    /// its value with `get_self_node_id`.
    pub fn from_pairs<F, I>(mut get_self_node_id: F, pairs: I) -> Result<Self, TreeError>
    where
        F: FnMut(&V) -> ID,
        I: IntoIterator<Item = (Option<ID>, V)>,
    {
        let items = pairs
            .into_iter()
            .map(|(parent_node_id, value)| {
                let self_node_id = get_self_node_id(&value);
                AdjacencyListItem::new(parent_node_id, Some(self_node_id), value)
            })
            .collect();
        Self::new(items)
    }

    /// Converts the tree into records, in pre-order.
    ///
    /// The parent id of each record is `get_self_node_id` applied to the value of
    /// the node's parent, absent for the root. Fails if `get_self_node_id`
    /// yields the same `(parent id, self id)` pair for two nodes.
    pub fn from_tree_node<F>(get_self_node_id: F, tree_node: &TreeNode<V>) -> Result<Self, TreeError>
    where
        F: FnMut(&V) -> ID,
        ID: Clone,
        V: Clone,
    {
        Self::from_tree_nodes(get_self_node_id, std::slice::from_ref(tree_node))
    }

    /// [`from_tree_node`](Self::from_tree_node) for a forest, trees in order.
    pub fn from_tree_nodes<F>(
        mut get_self_node_id: F,
        tree_nodes: &[TreeNode<V>],
    ) -> Result<Self, TreeError>
    where
        F: FnMut(&V) -> ID,
        ID: Clone,
        V: Clone,
    {
        let mut items = Vec::new();
        // Ids of the nodes on the path from the root to the last visited node.
        let mut ancestor_ids: Vec<ID> = Vec::new();
        for tree_node in tree_nodes {
            ancestor_ids.clear();
            items = tree_node.fold_with_indices(items, |mut items, node, indices| {
                ancestor_ids.truncate(indices.len());
                let parent_node_id = ancestor_ids.last().cloned();
                let self_node_id = get_self_node_id(node.value());
                ancestor_ids.push(self_node_id.clone());
                items.push(AdjacencyListItem::new(
                    parent_node_id,
                    Some(self_node_id),
                    node.value().clone(),
                ));
                items
            });
        }
        Self::new(items)
    }
}

impl<ID: Clone + Eq + Hash, V> AdjacencyList<ID, V> {
    /// Converts the list into a forest, moving the values into the trees.
    ///
    /// Every record without a parent id becomes the root of one tree, in list
    /// order; every other record is attached below the record whose self id
    /// equals its parent id, children in list order. Records whose parent id
    /// matches no reachable record end up in the residual list.
    pub fn into_tree_nodes(self) -> AdjacencyListParseResult<ID, V> {
        let mut children_by_parent: IndexMap<Option<ID>, Vec<AdjacencyListItem<ID, V>>> =
            IndexMap::new();
        for item in self.items {
            children_by_parent
                .entry(item.parent_node_id.clone())
                .or_default()
                .push(item);
        }

        let roots = children_by_parent
            .get_mut(&None)
            .map(mem::take)
            .unwrap_or_default();

        let mut tree_nodes = Vec::with_capacity(roots.len());
        for root in roots {
            let mut tree: Option<TreeNode<V>> = None;
            let mut stack = Stack::new();
            stack.push((root, Vec::new()));

            while let Some((item, indices)) = stack.pop() {
                // Taking the group means a self id is expanded at most once.
                let children = children_by_parent
                    .get_mut(&item.self_node_id)
                    .map(mem::take)
                    .unwrap_or_default();

                let node = TreeNode::leaf(item.value);
                match indices.split_last() {
                    None => tree = Some(node),
                    Some((_, parent)) => {
                        if let Some(parent) = tree.as_mut().and_then(|tree| tree.get_mut(parent)) {
                            parent.push_child(node);
                        }
                    }
                }

                for (index, child) in children.into_iter().enumerate().rev() {
                    stack.push((child, child_indices(&indices, index)));
                }
            }

            tree_nodes.extend(tree);
        }

        let parent_node_not_found: Vec<_> = children_by_parent.into_values().flatten().collect();
        log::debug!(
            "adjacency list converted into {} trees, {} records without parent",
            tree_nodes.len(),
            parent_node_not_found.len()
        );

        ParseResult {
            tree_nodes,
            // A subset of a valid list keeps its pairs unique.
            parent_node_not_found_list: AdjacencyList {
                items: parent_node_not_found,
            },
        }
    }

    /// Borrowing counterpart of [`into_tree_nodes`](Self::into_tree_nodes).
    pub fn to_tree_nodes(&self) -> AdjacencyListParseResult<ID, V>
    where
        V: Clone,
    {
        self.clone().into_tree_nodes()
    }
}

impl<ID, V> Default for AdjacencyList<ID, V> {
    fn default() -> Self {
        AdjacencyList { items: Vec::new() }
    }
}

impl<ID: fmt::Debug, V: fmt::Debug> fmt::Debug for AdjacencyList<ID, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.items.fmt(f)
    }
}

impl<ID: Eq + Hash, V> TryFrom<Vec<AdjacencyListItem<ID, V>>> for AdjacencyList<ID, V> {
    type Error = TreeError;

    fn try_from(items: Vec<AdjacencyListItem<ID, V>>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<ID, V> From<AdjacencyList<ID, V>> for Vec<AdjacencyListItem<ID, V>> {
    fn from(list: AdjacencyList<ID, V>) -> Self {
        list.items
    }
}

impl<ID, V> IntoIterator for AdjacencyList<ID, V> {
    type Item = AdjacencyListItem<ID, V>;
    type IntoIter = std::vec::IntoIter<AdjacencyListItem<ID, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, ID, V> IntoIterator for &'a AdjacencyList<ID, V> {
    type Item = &'a AdjacencyListItem<ID, V>;
    type IntoIter = std::slice::Iter<'a, AdjacencyListItem<ID, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de, ID, V> serde::Deserialize<'de> for AdjacencyList<ID, V>
where
    ID: serde::Deserialize<'de> + Eq + Hash,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<AdjacencyListItem<ID, V>>::deserialize(deserializer)?;
        Self::new(items).map_err(serde::de::Error::custom)
    }
}
