//! The path-enumeration representation of a forest: one record per node holding
//! the ids of all its ancestors followed by its own id.
//!
//! Parents are found by path containment: the parent of a record is the record
//! whose path is its own path minus the last id.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;
use derive_more::Deref;
use itertools::Itertools;

use crate::error::TreeError;
use crate::parse_result::ParseResult;
use crate::tree::child_vec::{ChildVecStore, TreeNodeId};
use crate::tree::TreeNode;

/// One record of a [`PathEnumerationList`]. The path is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathEnumerationListItem<ID, V> {
    path: Vec<ID>,
    value: V,
}

impl<ID, V> PathEnumerationListItem<ID, V> {
    /// Creates a record, failing if `path` is empty.
    pub fn new(path: Vec<ID>, value: V) -> Result<Self, TreeError> {
        if path.is_empty() {
            return Err(TreeError::EmptyPath);
        }
        Ok(PathEnumerationListItem { path, value })
    }

    /// The ids from the root down to this record, this record's id last.
    pub fn path(&self) -> &[ID] {
        &self.path
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (Vec<ID>, V) {
        (self.path, self.value)
    }

    /// Zero-based depth; roots are at level 0.
    pub fn level(&self) -> usize {
        self.path.len() - 1
    }

    /// The path of the parent record, empty for a root.
    pub fn parent_node_path(&self) -> &[ID] {
        &self.path[..self.level()]
    }

    /// The id of the parent record, `None` for a root.
    pub fn parent_node_id(&self) -> Option<&ID> {
        self.parent_node_path().last()
    }

    /// The id of this record, the last element of the path.
    pub fn self_node_id(&self) -> &ID {
        &self.path[self.level()]
    }
}

/// A list of [`PathEnumerationListItem`]s in which every path is unique.
///
/// Equality, hashing and `Debug` are those of the underlying sequence.
#[derive(Clone, PartialEq, Eq, Hash, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PathEnumerationList<ID, V> {
    items: Vec<PathEnumerationListItem<ID, V>>,
}

/// [`ParseResult`] of a [`PathEnumerationList`].
pub type PathEnumerationListParseResult<ID, V> = ParseResult<PathEnumerationList<ID, V>, V>;

/// Where a record goes in the forest being built.
#[derive(Clone, Copy, Debug)]
enum Placement {
    Root,
    Child(TreeNodeId),
    ParentNotFound,
}

impl<ID, V> PathEnumerationList<ID, V> {
    pub fn items(&self) -> &[PathEnumerationListItem<ID, V>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PathEnumerationListItem<ID, V>> {
        self.items
    }
}

impl<ID: Eq + Hash, V> PathEnumerationList<ID, V> {
    /// Creates a list, failing if a path occurs twice.
    pub fn new(items: Vec<PathEnumerationListItem<ID, V>>) -> Result<Self, TreeError> {
        let has_duplicate = items
            .iter()
            .map(PathEnumerationListItem::path)
            .duplicates()
            .next()
            .is_some();
        if has_duplicate {
            return Err(TreeError::DuplicatePath);
        }
        Ok(PathEnumerationList { items })
    }

    /// Creates a list from `(path, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (Vec<ID>, V)>,
    {
        let items = pairs
            .into_iter()
            .map(|(path, value)| PathEnumerationListItem::new(path, value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(items)
    }

    /// Converts the tree into records, in pre-order.
    ///
    /// The path of each record is `get_node_id` applied to the values of the
    /// node's ancestors, root first, followed by the node's own id. Fails if
    /// `get_node_id` yields the same path for two nodes.
    pub fn from_tree_node<F>(get_node_id: F, tree_node: &TreeNode<V>) -> Result<Self, TreeError>
    where
        F: FnMut(&V) -> ID,
        ID: Clone,
        V: Clone,
    {
        Self::from_tree_nodes(get_node_id, std::slice::from_ref(tree_node))
    }

    /// [`from_tree_node`](Self::from_tree_node) for a forest, trees in order.
    pub fn from_tree_nodes<F>(mut get_node_id: F, tree_nodes: &[TreeNode<V>]) -> Result<Self, TreeError>
    where
        F: FnMut(&V) -> ID,
        ID: Clone,
        V: Clone,
    {
        let mut items = Vec::new();
        // Pre-order visits every ancestor right before its subtree, so the
        // first `indices.len()` ids on this stack are the current node's ancestors.
        let mut ancestor_ids: Vec<ID> = Vec::new();
        for tree_node in tree_nodes {
            ancestor_ids.clear();
            items = tree_node.fold_with_indices(items, |mut items, node, indices| {
                ancestor_ids.truncate(indices.len());
                ancestor_ids.push(get_node_id(node.value()));
                items.push(PathEnumerationListItem {
                    path: ancestor_ids.clone(),
                    value: node.value().clone(),
                });
                items
            });
        }
        Self::new(items)
    }

    /// Converts the list into a forest, moving the values into the trees.
    ///
    /// Records are placed shallowest first, so a parent is always placed before
    /// its children. Roots and children keep their relative list order. A
    /// record whose parent path matches no record goes to the residual list;
    /// its own descendants still find it as their parent and are dropped with it.
    pub fn into_tree_nodes(self) -> PathEnumerationListParseResult<ID, V> {
        let mut items = self.items;
        items.sort_by_key(PathEnumerationListItem::level);

        let mut placements = Vec::with_capacity(items.len());
        {
            let mut node_by_path: AHashMap<&[ID], TreeNodeId> =
                AHashMap::with_capacity(items.len());
            for (position, item) in items.iter().enumerate() {
                let placement = if item.level() == 0 {
                    Placement::Root
                } else {
                    match node_by_path.get(item.parent_node_path()) {
                        Some(&parent) => Placement::Child(parent),
                        None => Placement::ParentNotFound,
                    }
                };
                node_by_path.insert(item.path(), TreeNodeId(position));
                placements.push(placement);
            }
        }

        let mut store = ChildVecStore::with_capacity(items.len());
        let mut roots = Vec::new();
        let mut parent_node_not_found = Vec::new();
        for (item, placement) in items.into_iter().zip(placements) {
            match placement {
                Placement::Root => roots.push(store.add_node(item.value)),
                Placement::Child(parent) => {
                    let child = store.add_node(item.value);
                    store.add_child(parent, child);
                }
                Placement::ParentNotFound => {
                    store.add_dataless_node();
                    parent_node_not_found.push(item);
                }
            }
        }

        let tree_nodes = store.into_trees(&roots);
        log::debug!(
            "path enumeration list converted into {} trees, {} records without parent",
            tree_nodes.len(),
            parent_node_not_found.len()
        );

        ParseResult {
            tree_nodes,
            // A subset of a valid list keeps its paths unique.
            parent_node_not_found_list: PathEnumerationList {
                items: parent_node_not_found,
            },
        }
    }

    /// Borrowing counterpart of [`into_tree_nodes`](Self::into_tree_nodes).
    pub fn to_tree_nodes(&self) -> PathEnumerationListParseResult<ID, V>
    where
        ID: Clone,
        V: Clone,
    {
        self.clone().into_tree_nodes()
    }
}

impl<ID, V> Default for PathEnumerationList<ID, V> {
    fn default() -> Self {
        PathEnumerationList { items: Vec::new() }
    }
}

impl<ID: fmt::Debug, V: fmt::Debug> fmt::Debug for PathEnumerationList<ID, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.items.fmt(f)
    }
}

impl<ID: Eq + Hash, V> TryFrom<Vec<PathEnumerationListItem<ID, V>>> for PathEnumerationList<ID, V> {
    type Error = TreeError;

    fn try_from(items: Vec<PathEnumerationListItem<ID, V>>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<ID, V> From<PathEnumerationList<ID, V>> for Vec<PathEnumerationListItem<ID, V>> {
    fn from(list: PathEnumerationList<ID, V>) -> Self {
        list.items
    }
}

impl<ID, V> IntoIterator for PathEnumerationList<ID, V> {
    type Item = PathEnumerationListItem<ID, V>;
    type IntoIter = std::vec::IntoIter<PathEnumerationListItem<ID, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, ID, V> IntoIterator for &'a PathEnumerationList<ID, V> {
    type Item = &'a PathEnumerationListItem<ID, V>;
    type IntoIter = std::slice::Iter<'a, PathEnumerationListItem<ID, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de, ID, V> serde::Deserialize<'de> for PathEnumerationListItem<ID, V>
where
    ID: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Repr<ID, V> {
            path: Vec<ID>,
            value: V,
        }

        let Repr { path, value } = Repr::deserialize(deserializer)?;
        Self::new(path, value).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de, ID, V> serde::Deserialize<'de> for PathEnumerationList<ID, V>
where
    ID: serde::Deserialize<'de> + Eq + Hash,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<PathEnumerationListItem<ID, V>>::deserialize(deserializer)?;
        Self::new(items).map_err(serde::de::Error::custom)
    }
}
