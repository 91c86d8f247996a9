use mayer_graph::{
    collect_events, gen_path, BreadthFirst, DepthFirst, Graph, NodeSet, Traversal,
    TraversalError, TraversalEvent,
};
use TraversalEvent::*;

fn visited(events: &[TraversalEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            VisitedNode(node) => Some(*node),
            _ => None,
        })
        .collect()
}

fn branch() -> Graph {
    let mut graph = Graph::new(4, 0).unwrap();
    graph.put_edge(0, 1).unwrap();
    graph.put_edge(0, 2).unwrap();
    graph.put_edge(1, 3).unwrap();
    graph
}

#[test]
fn breadth_first_visits_by_layer() {
    assert_eq!(visited(&collect_events(&BreadthFirst, &branch())), vec![0, 1, 2, 3]);
}

#[test]
fn depth_first_descends_before_siblings() {
    assert_eq!(visited(&collect_events(&DepthFirst, &branch())), vec![0, 1, 3, 2]);
}

#[test]
fn components_are_bracketed() {
    let mut graph = Graph::new(4, 0).unwrap();
    graph.put_edge(0, 1).unwrap();
    graph.put_edge(2, 3).unwrap();
    let events = collect_events(&BreadthFirst, &graph);
    assert_eq!(
        events,
        vec![
            StartComponent { seed: 0 },
            VisitedNode(0),
            VisitedNode(1),
            EndComponent { seed: 0 },
            StartComponent { seed: 2 },
            VisitedNode(2),
            VisitedNode(3),
            EndComponent { seed: 2 },
        ]
    );
    assert_eq!(DepthFirst.traverse_all(&graph, &mut |_| {}), 2);
}

#[test]
fn empty_graph_reports_error() {
    let graph = Graph::new(0, 0).unwrap();
    let events = collect_events(&DepthFirst, &graph);
    assert_eq!(events, vec![Error(TraversalError::EmptyGraph)]);
    assert_eq!(BreadthFirst.traverse_all(&graph, &mut |_| {}), 0);
}

#[test]
fn out_of_range_root_reports_error() {
    let graph = gen_path(3, 0).unwrap();
    let mut seen = NodeSet::empty();
    let mut events = Vec::new();
    let reached = DepthFirst.traverse_component(&graph, 5, &mut seen, &mut |e| events.push(e));
    assert_eq!(reached, 0);
    assert_eq!(
        events,
        vec![Error(TraversalError::RootOutOfRange {
            root: 5,
            node_count: 3
        })]
    );
    let err: mayer_core::MayerError = TraversalError::EmptyGraph.into();
    assert_eq!(err.code(), "empty-graph");
}

#[test]
fn component_traversal_respects_seen_set() {
    let graph = gen_path(5, 0).unwrap();
    let mut seen = NodeSet::empty();
    let reached = BreadthFirst.traverse_component(&graph, 2, &mut seen, &mut |_| {});
    assert_eq!(reached, 5);
    assert_eq!(seen, NodeSet::full(5));
    assert_eq!(
        BreadthFirst.traverse_component(&graph, 0, &mut seen, &mut |_| {}),
        0
    );
}
