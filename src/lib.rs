//! # Multitree
//!
//! Multitree is a library for multi-way trees and for the two flat
//! representations hierarchies are usually stored in:
//!
//! *   [`TreeNode`]: an owned tree with a pre-order fold/map/filter/find algebra.
//! *   [`AdjacencyList`]: one `(parent id, self id, value)` record per node.
//! *   [`PathEnumerationList`]: one `(ancestor ids + self id, value)` record per node.
//!
//! Both flat lists convert into a forest of [`TreeNode`]s, returning the records
//! whose parent could not be found alongside the trees in a [`ParseResult`],
//! and can be rebuilt from a tree given a function extracting an id from a value.
//!
//! ```
//! use multitree::{AdjacencyList, TreeNode};
//!
//! let list = AdjacencyList::from_pairs(
//!     |value: &i32| *value,
//!     [(None, 1), (Some(1), 11), (Some(11), 111), (Some(1), 12), (Some(2), 21)],
//! )
//! .unwrap();
//!
//! let result = list.into_tree_nodes();
//! assert_eq!(result.tree_nodes[0].to_flat_list(), vec![&1, &11, &111, &12]);
//! assert_eq!(result.parent_node_not_found_list.len(), 1);
//!
//! let doubled: TreeNode<i32> = result.tree_nodes[0].map(|v| v * 2);
//! assert_eq!(doubled.to_formatted_string(), "2\n├── 22\n│   └── 222\n└── 24");
//! ```
//!
//! Every traversal runs on an explicit stack, so trees of any depth can be
//! processed without overflowing the call stack.

pub mod adjacency;
pub mod error;
pub mod parse_result;
pub mod path_enumeration;
pub mod tree;

pub use adjacency::{AdjacencyList, AdjacencyListItem, AdjacencyListParseResult};
pub use error::TreeError;
pub use parse_result::ParseResult;
pub use path_enumeration::{
    PathEnumerationList, PathEnumerationListItem, PathEnumerationListParseResult,
};
pub use tree::debug_print::FormatStyle;
pub use tree::transform::{ValueWithIndices, ValueWithLevel};
pub use tree::traverse::Stack;
pub use tree::TreeNode;
