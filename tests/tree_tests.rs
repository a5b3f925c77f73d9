use jwick::ParseError;
use jwick::model::Tree;
use jwick::parse_newick_str;
use jwick::parser::NewickParser;

// ============= Root Handling =============
#[test]
fn test_set_root_only_once() {
    let mut tree = Tree::new();
    let first = tree.alloc_node(0);
    let second = tree.alloc_node(0);

    assert!(!tree.is_root_set());
    tree.set_root(first).unwrap();
    assert!(tree.is_root_set());
    assert_eq!(tree.root_index(), first);

    assert_eq!(tree.set_root(second), Err(ParseError::AlreadyParsed));
}

#[test]
#[should_panic(expected = "tree has no root")]
fn test_root_index_without_root_panics() {
    let tree = Tree::new();
    tree.root_index();
}

#[test]
#[should_panic(expected = "tree has no root")]
fn test_root_without_root_panics() {
    let tree = Tree::new();
    tree.root();
}

#[test]
fn test_default_tree_is_empty_and_parsable() {
    let mut tree = Tree::default();
    assert!(!tree.is_root_set());
    assert_eq!(tree.num_nodes(), 0);

    NewickParser::new_plain().parse_into(&mut tree, "(A,B)").unwrap();
    assert_eq!(tree.total_node_count(), 3);
}

// ============= Traversal =============
#[test]
fn test_pre_order_visits_parents_first() {
    let tree = parse_newick_str("(A,(B,C))").unwrap();
    let labels: Vec<&str> = tree.pre_order().map(|n| n.label()).collect();
    assert_eq!(labels, ["", "A", "", "B", "C"]);
}

#[test]
fn test_post_order_visits_children_first() {
    let tree = parse_newick_str("(A,(B,C))").unwrap();
    let labels: Vec<&str> = tree.post_order().map(|n| n.label()).collect();
    assert_eq!(labels, ["A", "B", "C", "", ""]);
}

#[test]
fn test_traversal_is_restartable() {
    let tree = parse_newick_str("(A,(B,C))").unwrap();
    let first: Vec<usize> = tree.pre_order().map(|n| n.index()).collect();
    let second: Vec<usize> = tree.pre_order().map(|n| n.index()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn test_subtree_iteration() {
    let tree = parse_newick_str("(A,(B,C))").unwrap();
    let inner = tree.root().children()[1];
    let labels: Vec<&str> = tree.subtree(inner).map(|n| n.label()).collect();
    assert_eq!(labels, ["", "B", "C"]);
}

#[test]
fn test_traversal_on_empty_tree() {
    let tree = Tree::new();
    assert_eq!(tree.pre_order().count(), 0);
    assert_eq!(tree.post_order().count(), 0);
}

// ============= Sorting =============
#[test]
fn test_sort_children_ascending_moves_leaf_first() {
    // Top-level children are a 3-node subtree and a single leaf.
    let mut tree = parse_newick_str("((B,C),A)").unwrap();
    let root = tree.root_index();
    tree.sort_children_of(root, false);

    let first = tree.root().children()[0];
    let second = tree.root().children()[1];
    assert_eq!(tree[first].label(), "A");
    assert_eq!(tree[first].n_subtree_nodes(), 1);
    assert_eq!(tree[second].n_subtree_nodes(), 3);
}

#[test]
fn test_sort_children_descending() {
    let mut tree = parse_newick_str("(A,(B,C))").unwrap();
    let root = tree.root_index();
    tree.sort_children_of(root, true);

    let first = tree.root().children()[0];
    assert_eq!(tree[first].n_subtree_nodes(), 3);
}

#[test]
fn test_sort_is_stable_among_equal_counts() {
    let mut tree = parse_newick_str("(A,B,(C,D))").unwrap();
    let root = tree.root_index();

    tree.sort_children_of(root, false);
    let labels: Vec<&str> = tree
        .root()
        .children()
        .iter()
        .map(|&c| tree[c].label())
        .collect();
    assert_eq!(labels, ["A", "B", ""]);

    tree.sort_children_of(root, true);
    let labels: Vec<&str> = tree
        .root()
        .children()
        .iter()
        .map(|&c| tree[c].label())
        .collect();
    // The group moves to the front; A and B keep their relative order.
    assert_eq!(labels, ["", "A", "B"]);
}

#[test]
fn test_whole_tree_sort_recurses_everywhere() {
    let mut tree = parse_newick_str("(((D,E),F),A)").unwrap();
    tree.sort(false);

    // Every node's children must now be ascending by subtree size.
    for node in tree.pre_order() {
        let counts: Vec<usize> = node
            .children()
            .iter()
            .map(|&c| tree[c].n_subtree_nodes())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }
    // The leaf A now precedes the 5-node subtree at the top level.
    assert_eq!(tree[tree.root().children()[0]].label(), "A");
}

// ============= Counts =============
#[test]
fn test_counts() {
    let tree = parse_newick_str("(A,(B,C))").unwrap();
    assert_eq!(tree.total_node_count(), 5);
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_leaves(), 3);
}
