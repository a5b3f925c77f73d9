use jwick::model::{NodeIndex, Tree};
use jwick::{parse_jplace_str, parse_newick_str};

/// root -> (a:1, g:0.5), g -> (b:2, c:0.25)
fn tree_with_branch_lengths() -> (Tree, [NodeIndex; 5]) {
    let mut tree = Tree::new();
    let root = tree.alloc_node(0);
    tree.set_root(root).unwrap();
    let a = tree.alloc_node(0);
    let g = tree.alloc_node(0);
    let b = tree.alloc_node(0);
    let c = tree.alloc_node(0);
    tree.add_child(root, a);
    tree.add_child(root, g);
    tree.add_child(g, b);
    tree.add_child(g, c);
    tree[a].payload_mut().branch_length = 1.0;
    tree[g].payload_mut().branch_length = 0.5;
    tree[b].payload_mut().branch_length = 2.0;
    tree[c].payload_mut().branch_length = 0.25;
    (tree, [root, a, g, b, c])
}

// ============= Horizontal Placement =============
#[test]
fn test_leaves_get_consecutive_positions() {
    let mut tree = parse_newick_str("(A,(B,C))").unwrap();
    let placed = tree.place_nodes();
    assert_eq!(placed, 3);
    assert_eq!(placed, tree.num_leaves());

    let root = tree.root_index();
    let a = tree[root].children()[0];
    let inner = tree[root].children()[1];
    let b = tree[inner].children()[0];
    let c = tree[inner].children()[1];

    assert_eq!(tree[a].h_pos(), Some(0.0));
    assert_eq!(tree[b].h_pos(), Some(1.0));
    assert_eq!(tree[c].h_pos(), Some(2.0));
    // Internal nodes sit midway between their outermost children.
    assert_eq!(tree[inner].h_pos(), Some(1.5));
    assert_eq!(tree[root].h_pos(), Some(0.75));
}

#[test]
fn test_single_node_tree_placement() {
    let mut tree = parse_newick_str("").unwrap();
    assert_eq!(tree.place_nodes(), 1);
    assert_eq!(tree.root().h_pos(), Some(0.0));
    assert_eq!(tree.root().v_pos(), Some(0.0));
}

// ============= Vertical Placement =============
#[test]
fn test_vertical_positions_accumulate_branch_lengths() {
    let (mut tree, [root, a, g, b, c]) = tree_with_branch_lengths();
    tree.place_nodes();

    assert_eq!(tree[root].v_pos(), Some(0.0));
    assert_eq!(tree[a].v_pos(), Some(1.0));
    assert_eq!(tree[g].v_pos(), Some(0.5));
    assert_eq!(tree[b].v_pos(), Some(2.5));
    assert_eq!(tree[c].v_pos(), Some(0.75));
}

#[test]
fn test_root_branch_length_is_excluded() {
    let mut tree = parse_jplace_str("(A:1{1},B:2{2}):7{0}").unwrap();
    tree.place_nodes();

    // The root's own annotated length does not shift the layout.
    assert_eq!(tree.root().v_pos(), Some(0.0));
    let a = tree.root().children()[0];
    let b = tree.root().children()[1];
    assert_eq!(tree[a].v_pos(), Some(1.0));
    assert_eq!(tree[b].v_pos(), Some(2.0));
}

#[test]
fn test_placement_is_idempotent() {
    let mut tree = parse_jplace_str("(A:1{1},B:2{2}):0{0}").unwrap();
    tree.place_nodes();
    let first: Vec<(Option<f64>, Option<f64>)> =
        tree.pre_order().map(|n| (n.h_pos(), n.v_pos())).collect();
    tree.place_nodes();
    let second: Vec<(Option<f64>, Option<f64>)> =
        tree.pre_order().map(|n| (n.h_pos(), n.v_pos())).collect();
    assert_eq!(first, second);
}

#[test]
fn test_replacement_after_sort_tracks_new_child_order() {
    let mut tree = parse_newick_str("((A,B),C)").unwrap();
    tree.place_nodes();
    assert_eq!(tree.root().h_pos(), Some(1.25));

    // Leaf C moves before the (A,B) group; re-running the passes follows
    // the new order.
    tree.sort(false);
    tree.place_nodes();
    let root = tree.root_index();
    let c = tree[root].children()[0];
    let g = tree[root].children()[1];
    assert_eq!(tree[c].h_pos(), Some(0.0));
    assert_eq!(tree[g].h_pos(), Some(1.5));
    assert_eq!(tree.root().h_pos(), Some(0.75));
}

// ============= Aggregate Queries =============
#[test]
fn test_aggregates_are_none_before_placement() {
    let tree = parse_newick_str("(A,(B,C))").unwrap();
    let root = tree.root_index();

    assert_eq!(tree.child_hmin(root), None);
    assert_eq!(tree.child_hmax(root), None);
    assert_eq!(tree.subtree_hmin(root), None);
    assert_eq!(tree.subtree_vmax(root), None);
    assert_eq!(tree.child_vmin(root), None);
    assert_eq!(tree.hmin(), None);
    assert_eq!(tree.vmax(), None);
}

#[test]
fn test_horizontal_aggregates() {
    let (mut tree, [root, a, g, b, c]) = tree_with_branch_lengths();
    tree.place_nodes();

    // h: a=0, b=1, c=2, g=1.5, root=0.75
    assert_eq!(tree.child_hmin(root), Some(0.0));
    assert_eq!(tree.child_hmax(root), Some(1.5));
    assert_eq!(tree.subtree_hmin(root), Some(0.0));
    assert_eq!(tree.subtree_hmax(root), Some(2.0));
    assert_eq!(tree.subtree_hmin(g), Some(1.0));
    assert_eq!(tree.subtree_hmax(g), Some(2.0));
    // Leaves report their own position.
    assert_eq!(tree.child_hmin(a), Some(0.0));
    assert_eq!(tree.child_hmax(b), Some(1.0));
    assert_eq!(tree.subtree_hmin(c), Some(2.0));

    assert_eq!(tree.hmin(), Some(0.0));
    assert_eq!(tree.hmax(), Some(2.0));
}

#[test]
fn test_vertical_aggregates() {
    let (mut tree, [root, a, g, b, _c]) = tree_with_branch_lengths();
    tree.place_nodes();

    // v: root=0, a=1, g=0.5, b=2.5, c=0.75
    assert_eq!(tree.child_vmin(root), Some(0.5));
    assert_eq!(tree.child_vmax(root), Some(1.0));
    assert_eq!(tree.subtree_vmax(root), Some(2.5));
    assert_eq!(tree.subtree_vmin(g), Some(0.5));
    assert_eq!(tree.subtree_vmax(g), Some(2.5));
    // Direct-children extremes are undefined for leaves.
    assert_eq!(tree.child_vmin(a), None);
    assert_eq!(tree.child_vmax(b), None);

    assert_eq!(tree.vmin(), Some(0.0));
    assert_eq!(tree.vmax(), Some(2.5));
}

#[test]
fn test_tree_extremes_without_root() {
    let tree = Tree::new();
    assert_eq!(tree.hmin(), None);
    assert_eq!(tree.hmax(), None);
    assert_eq!(tree.vmin(), None);
    assert_eq!(tree.vmax(), None);
}
