use mayer_core::rng::RngHandle;
use mayer_graph::{
    collect_events, gen_random, graph_from_bytes, graph_to_bytes, has_articulation_point,
    is_biconnected, is_connected, random_permutation, Biconnected, BreadthFirst, DepthFirst,
    Graph, NodeSet, TraversalEvent,
};
use proptest::prelude::*;

fn visits(events: &[TraversalEvent]) -> Vec<usize> {
    let mut nodes: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            TraversalEvent::VisitedNode(node) => Some(*node),
            _ => None,
        })
        .collect();
    nodes.sort_unstable();
    nodes
}

fn check_blocks(graph: &Graph) {
    let report = Biconnected.blocks(graph);
    for node in 0..graph.node_count() {
        let memberships = report.blocks.iter().filter(|b| b.contains(node)).count();
        assert!(memberships >= 1);
        assert_eq!(
            report.articulation_points.contains(node),
            memberships > 1,
            "node {node} in {memberships} blocks"
        );
    }
    let covered: NodeSet = report.blocks.iter().fold(NodeSet::empty(), |acc, b| acc.union(b));
    assert_eq!(covered, NodeSet::full(graph.node_count()));
}

proptest! {
    #[test]
    fn traversals_visit_each_node_once(seed in any::<u64>(), nodes in 1usize..12, p in 0.0f64..1.0) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random(nodes, 0, p, &mut rng).unwrap();
        let expected: Vec<usize> = (0..nodes).collect();
        prop_assert_eq!(visits(&collect_events(&BreadthFirst, &graph)), expected.clone());
        prop_assert_eq!(visits(&collect_events(&DepthFirst, &graph)), expected);
        check_blocks(&graph);
    }

    #[test]
    fn properties_survive_relabeling(seed in any::<u64>(), nodes in 1usize..10, p in 0.2f64..0.8) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random(nodes, 1, p, &mut rng).unwrap();
        let permutation = random_permutation(nodes, &mut rng);
        let moved = graph.relabel(&permutation).unwrap();
        prop_assert_eq!(moved.edge_count(), graph.edge_count());
        prop_assert_eq!(is_connected(&moved), is_connected(&graph));
        prop_assert_eq!(is_biconnected(&moved), is_biconnected(&graph));
        prop_assert_eq!(has_articulation_point(&moved), has_articulation_point(&graph));
        prop_assert_eq!(moved.signature(), graph.signature());

        let restored = graph_from_bytes(&graph_to_bytes(&moved).unwrap()).unwrap();
        prop_assert_eq!(restored, moved);
    }
}
