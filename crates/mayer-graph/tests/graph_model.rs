use mayer_core::errors::MayerError;
use mayer_core::{EdgeId, NodeKind};
use mayer_graph::{Coefficient, EdgeTable, Graph, Node};

#[test]
fn edge_ids_follow_rings() {
    let table = EdgeTable::new(4);
    assert_eq!(table.capacity(), 6);
    assert_eq!(table.edge_id(0, 1), Some(EdgeId::from_raw(0)));
    assert_eq!(table.edge_id(1, 2), Some(EdgeId::from_raw(1)));
    assert_eq!(table.edge_id(2, 3), Some(EdgeId::from_raw(2)));
    assert_eq!(table.edge_id(3, 0), Some(EdgeId::from_raw(3)));
    assert_eq!(table.edge_id(0, 2), Some(EdgeId::from_raw(4)));
    assert_eq!(table.edge_id(3, 1), Some(EdgeId::from_raw(5)));
    assert_eq!(table.edge_id(2, 2), None);
    for raw in 0..6 {
        let (from, to) = table.endpoints(EdgeId::from_raw(raw)).unwrap();
        assert!(from < to);
        assert_eq!(table.edge_id(from, to), Some(EdgeId::from_raw(raw)));
    }
}

#[test]
fn edges_are_symmetric() {
    let mut graph = Graph::new(5, 0).unwrap();
    graph.put_edge(3, 1).unwrap();
    assert!(graph.has_edge(1, 3));
    assert!(graph.has_edge(3, 1));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.out_degree(1), 1);
    assert_eq!(graph.out_node(3, 0), Some(1));
    graph.delete_edge(1, 3).unwrap();
    assert!(!graph.has_edge(3, 1));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn self_loops_and_unknown_nodes_are_rejected() {
    let mut graph = Graph::new(3, 1).unwrap();
    assert_eq!(graph.put_edge(1, 1).unwrap_err().code(), "self-loop");
    match graph.put_edge(0, 3).unwrap_err() {
        MayerError::Graph(info) => {
            assert_eq!(info.code, "unknown-node");
            assert_eq!(info.context.get("node"), Some(&"3".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn node_count_is_bounded() {
    assert_eq!(Graph::new(129, 0).unwrap_err().code(), "too-many-nodes");
    assert!(Graph::new(128, 0).is_ok());
}

#[test]
fn roots_come_first() {
    let graph = Graph::new(4, 2).unwrap();
    assert_eq!(graph.root_count(), 2);
    assert_eq!(graph.field_count(), 2);
    assert_eq!(graph.node(1).unwrap().kind(), NodeKind::Root);
    assert_eq!(graph.node(2).unwrap().kind(), NodeKind::Field);
    assert_eq!(Graph::new(2, 3).unwrap_err().code(), "root-count");
}

#[test]
fn edge_colors_are_tracked() {
    let mut graph = Graph::new(3, 0).unwrap();
    graph.put_colored_edge(0, 2, 'B').unwrap();
    assert_eq!(graph.edge_color(2, 0), Some('B'));
    assert_eq!(graph.edge_color(0, 1), None);
    assert_eq!(graph.set_edge_color(0, 1, 'C').unwrap_err().code(), "missing-edge");
    graph.set_edge_color(0, 2, 'C').unwrap();
    assert_eq!(graph.edges()[0].color, 'C');
}

#[test]
fn factors_require_matching_length() {
    let mut graph = Graph::new(2, 0).unwrap();
    graph.set_num_factors(2);
    graph.add_factors(&[1, -2]).unwrap();
    graph.add_factors(&[1, 1]).unwrap();
    assert_eq!(graph.factors(), &[2, -1]);
    assert_eq!(graph.add_factors(&[1]).unwrap_err().code(), "factor-length");
}

#[test]
fn display_lists_coefficient_nodes_and_edges() {
    let mut graph = Graph::new(3, 1).unwrap();
    graph.put_edge(0, 1).unwrap();
    graph.put_colored_edge(0, 2, 'B').unwrap();
    graph.set_coefficient(Coefficient::new(-1, 2).unwrap());
    assert_eq!(graph.to_string(), "-1/2 :: [0RA, 1FA, 2FA] :: {(0,1)A, (0,2)B}");
}

#[test]
fn relabel_moves_nodes_and_edges() {
    let mut nodes = vec![Node::root(0), Node::field(1), Node::field(2)];
    nodes[2] = Node::new(2, NodeKind::Field, 'B');
    let mut graph = Graph::from_nodes(nodes).unwrap();
    graph.put_colored_edge(0, 2, 'C').unwrap();

    let moved = graph.relabel(&[2, 0, 1]).unwrap();
    assert!(moved.node(2).unwrap().is_root());
    assert_eq!(moved.node(1).unwrap().color(), 'B');
    assert_eq!(moved.edge_color(2, 1), Some('C'));
    assert_eq!(moved.edge_count(), 1);

    assert_eq!(
        graph.relabel(&[0, 0, 1]).unwrap_err().code(),
        "invalid-permutation"
    );
}

#[test]
fn ordering_is_total_and_consistent_with_equality() {
    let mut a = Graph::new(3, 0).unwrap();
    let mut b = Graph::new(3, 0).unwrap();
    assert_eq!(a, b);
    a.put_edge(0, 1).unwrap();
    assert!(a > b);
    b.put_edge(1, 2).unwrap();
    assert!(a < b);
    let four = Graph::new(4, 0).unwrap();
    assert!(four > b);

    let mut recolored = a.clone();
    recolored.set_edge_color(0, 1, 'B').unwrap();
    assert_ne!(recolored, a);
    // factors do not take part in equality
    let mut factored = a.clone();
    factored.set_num_factors(1);
    assert_eq!(factored, a);
}

#[test]
fn signature_summarises_structure() {
    let mut graph = Graph::new(4, 1).unwrap();
    graph.put_edge(0, 1).unwrap();
    graph.put_colored_edge(1, 2, 'B').unwrap();
    assert_eq!(graph.signature(), "/CC2/R1/FA:0:1:1:2/EA1B1");
}

#[test]
fn coefficient_arithmetic_reduces() {
    let half = Coefficient::new(1, 2).unwrap();
    let third = Coefficient::new(-2, -6).unwrap();
    assert_eq!(third.to_string(), "1/3");
    assert_eq!(half.add(&third).to_string(), "5/6");
    assert_eq!(half.multiply(&third).to_string(), "1/6");
    assert_eq!(half.divide(&third).to_string(), "3/2");
    assert_eq!(half.negate().to_string(), "-1/2");
    assert!(half.divide(&Coefficient::zero()).has_overflow());
    assert_eq!(Coefficient::new(1, 0).unwrap_err().code(), "zero-denominator");

    let huge = Coefficient::new(i64::MAX, 1).unwrap();
    let product = huge.multiply(&huge);
    assert!(product.has_overflow());
    assert!(product.add(&Coefficient::one()).has_overflow());
}
