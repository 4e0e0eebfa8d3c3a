use multitree::{AdjacencyList, PathEnumerationList, TreeNode};
use proptest::prelude::*;
use proptest::sample::Index;
use similar_asserts::assert_eq;

/// Builds a tree whose node values are `0..=parents.len()`, node `i + 1`
/// becoming the last child of an earlier node picked by `parents[i]`.
fn tree_from_parent_choices(parents: &[Index]) -> TreeNode<usize> {
    let mut tree = TreeNode::leaf(0);
    let mut locations: Vec<Vec<usize>> = vec![vec![]];

    for (i, choice) in parents.iter().enumerate() {
        let value = i + 1;
        let parent_location = locations[choice.index(locations.len())].clone();
        let parent = tree
            .get_mut(&parent_location)
            .expect("locations always point into the tree");
        let mut location = parent_location;
        location.push(parent.children().len());
        parent.push_child(TreeNode::leaf(value));
        locations.push(location);
    }
    tree
}

fn arb_tree() -> impl Strategy<Value = TreeNode<usize>> {
    prop::collection::vec(any::<Index>(), 0..64).prop_map(|parents| tree_from_parent_choices(&parents))
}

proptest! {
    #[test]
    fn adjacency_list_round_trip(tree in arb_tree()) {
        let list = AdjacencyList::from_tree_node(|v: &usize| *v, &tree).unwrap();
        prop_assert_eq!(list.len(), tree.size());

        let result = list.into_tree_nodes();
        prop_assert_eq!(&result.tree_nodes, &vec![tree]);
        prop_assert!(result.parent_node_not_found_list.is_empty());
    }

    #[test]
    fn path_enumeration_list_round_trip(tree in arb_tree()) {
        let list = PathEnumerationList::from_tree_node(|v: &usize| *v, &tree).unwrap();
        prop_assert_eq!(list.len(), tree.size());
        for (item, with_level) in list.iter().zip(tree.with_level().to_flat_list()) {
            prop_assert_eq!(item.level(), with_level.level);
        }

        let result = list.into_tree_nodes();
        prop_assert_eq!(&result.tree_nodes, &vec![tree]);
        prop_assert!(result.parent_node_not_found_list.is_empty());
    }

    #[test]
    fn record_order_keeps_every_node(tree in arb_tree(), shift in any::<Index>()) {
        let mut expected: Vec<usize> = tree.to_flat_list().into_iter().copied().collect();
        expected.sort_unstable();

        let mut items = AdjacencyList::from_tree_node(|v: &usize| *v, &tree).unwrap().into_items();
        let len = items.len();
        items.rotate_left(shift.index(len));
        let result = AdjacencyList::new(items).unwrap().into_tree_nodes();
        prop_assert_eq!(result.tree_nodes.len(), 1);
        let mut values: Vec<usize> = result.tree_nodes[0].to_flat_list().into_iter().copied().collect();
        values.sort_unstable();
        prop_assert_eq!(&values, &expected);

        let mut items = PathEnumerationList::from_tree_node(|v: &usize| *v, &tree).unwrap().into_items();
        items.reverse();
        let result = PathEnumerationList::new(items).unwrap().into_tree_nodes();
        prop_assert_eq!(result.tree_nodes.len(), 1);
        let mut values: Vec<usize> = result.tree_nodes[0].to_flat_list().into_iter().copied().collect();
        values.sort_unstable();
        prop_assert_eq!(&values, &expected);
    }

    #[test]
    fn map_preserves_shape(tree in arb_tree()) {
        let mapped = tree.map(|v| v * 2);
        prop_assert_eq!(mapped.size(), tree.size());

        let indices: Vec<_> = tree.with_indices().to_flat_list().into_iter().map(|v| v.indices.clone()).collect();
        let mapped_indices: Vec<_> = mapped.with_indices().to_flat_list().into_iter().map(|v| v.indices.clone()).collect();
        prop_assert_eq!(indices, mapped_indices);
    }

    #[test]
    fn filter_accepting_everything_is_identity(tree in arb_tree()) {
        prop_assert_eq!(tree.filter(|_| true), Some(tree.clone()));
    }
}

#[test]
fn forest_round_trip() {
    let forest = vec![
        TreeNode::new(1, vec![TreeNode::leaf(11), TreeNode::leaf(12)]),
        TreeNode::new(2, vec![TreeNode::new(21, vec![TreeNode::leaf(211)])]),
    ];

    let adjacency = AdjacencyList::from_tree_nodes(|v: &i32| *v, &forest).unwrap();
    assert_eq!(adjacency.to_tree_nodes().tree_nodes, forest);

    let paths = PathEnumerationList::from_tree_nodes(|v: &i32| *v, &forest).unwrap();
    assert_eq!(paths.to_tree_nodes().tree_nodes, forest);
}

#[test]
fn deep_chain_through_both_lists() {
    let depth: usize = 3_000;
    let list = AdjacencyList::from_pairs(
        |v: &usize| *v,
        (0..depth).map(|v| (v.checked_sub(1), v)),
    )
    .unwrap();

    let result = list.into_tree_nodes();
    assert_eq!(result.tree_nodes.len(), 1);
    let chain = &result.tree_nodes[0];
    assert_eq!(chain.size(), depth);
    assert_eq!(chain.with_level().to_flat_list().last().map(|v| v.level), Some(depth - 1));

    let paths = PathEnumerationList::from_tree_node(|v: &usize| *v, chain).unwrap();
    assert_eq!(paths.last().map(|item| item.level()), Some(depth - 1));
    assert_eq!(&paths.into_tree_nodes().tree_nodes[0], chain);
}
