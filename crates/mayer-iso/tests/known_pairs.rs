use mayer_core::NodeKind;
use mayer_graph::{gen_cycle, gen_path, Graph, Node};
use mayer_iso::{IsomorphismEngine, Strategy};

fn engines() -> Vec<IsomorphismEngine> {
    Strategy::ALL.into_iter().map(IsomorphismEngine::new).collect()
}

fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new(node_count, 0).unwrap();
    for &(a, b) in edges {
        graph.put_edge(a, b).unwrap();
    }
    graph
}

fn assert_valid_mapping(first: &Graph, second: &Graph, mapping: &[usize]) {
    assert_eq!(mapping.len(), first.node_count());
    for a in 0..first.node_count() {
        assert_eq!(first.node(a).unwrap().kind(), second.node(mapping[a]).unwrap().kind());
        assert_eq!(first.node(a).unwrap().color(), second.node(mapping[a]).unwrap().color());
        for b in 0..first.node_count() {
            assert_eq!(first.edge_color(a, b), second.edge_color(mapping[a], mapping[b]));
        }
    }
}

#[test]
fn every_diagram_matches_itself() {
    let graphs = [
        Graph::new(0, 0).unwrap(),
        Graph::new(1, 1).unwrap(),
        gen_cycle(6, 2).unwrap(),
        from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 4)]),
    ];
    for engine in engines() {
        for graph in &graphs {
            let mapping = engine.find_mapping(graph, graph).unwrap();
            assert_valid_mapping(graph, graph, &mapping);
        }
    }
}

#[test]
fn same_degrees_different_structure() {
    // two triangles against a hexagon: every node has degree 2
    let triangles = from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    let hexagon = gen_cycle(6, 0).unwrap();
    for engine in engines() {
        assert!(!engine.check_isomorphic(&triangles, &hexagon), "{}", engine.strategy());
        assert!(!engine.check_isomorphic(&hexagon, &triangles), "{}", engine.strategy());
    }
}

#[test]
fn equal_degree_sequences_with_distinct_shapes() {
    // degree sequence (1,1,2,2,2,2) for both
    let path = gen_path(6, 0).unwrap();
    let long_tail = from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 0), (4, 5)]);
    for engine in engines() {
        assert!(!engine.check_isomorphic(&path, &long_tail));
    }
}

#[test]
fn paths_in_any_order_match() {
    let forward = gen_path(5, 0).unwrap();
    let shuffled = from_edges(5, &[(3, 0), (0, 4), (4, 1), (1, 2)]);
    for engine in engines() {
        let mapping = engine.find_mapping(&forward, &shuffled).unwrap();
        assert_valid_mapping(&forward, &shuffled, &mapping);
    }
}

#[test]
fn roots_only_map_to_roots() {
    // path 0-1-2 with root at an end versus root in the middle
    let end = gen_path(3, 1).unwrap();
    let mut middle = Graph::new(3, 1).unwrap();
    middle.put_edge(1, 0).unwrap();
    middle.put_edge(0, 2).unwrap();
    for engine in engines() {
        assert!(!engine.check_isomorphic(&end, &middle));
    }
}

#[test]
fn node_and_edge_colors_must_agree() {
    let mut plain = gen_cycle(4, 0).unwrap();
    let mut other = gen_cycle(4, 0).unwrap();
    plain.set_edge_color(0, 1, 'B').unwrap();
    other.set_edge_color(2, 3, 'B').unwrap();
    for engine in engines() {
        assert!(engine.check_isomorphic(&plain, &other));
    }
    other.set_edge_color(0, 1, 'B').unwrap();
    for engine in engines() {
        assert!(!engine.check_isomorphic(&plain, &other));
    }

    let nodes = |colored: usize| {
        (0..3)
            .map(|id| Node::new(id, NodeKind::Field, if id == colored { 'B' } else { 'A' }))
            .collect::<Vec<_>>()
    };
    let mut left = Graph::from_nodes(nodes(0)).unwrap();
    let mut right = Graph::from_nodes(nodes(2)).unwrap();
    left.put_edge(0, 1).unwrap();
    right.put_edge(2, 1).unwrap();
    for engine in engines() {
        let mapping = engine.find_mapping(&left, &right).unwrap();
        assert_eq!(mapping[0], 2);
    }
}

#[test]
fn coefficients_do_not_matter() {
    let mut weighted = gen_cycle(5, 0).unwrap();
    weighted.set_coefficient(mayer_graph::Coefficient::new(-7, 3).unwrap());
    let plain = gen_cycle(5, 0).unwrap();
    assert!(IsomorphismEngine::default().check_isomorphic(&weighted, &plain));
}

#[test]
fn strategy_names_are_kebab_case() {
    assert_eq!(serde_json::to_string(&Strategy::Vf2).unwrap(), "\"vf2\"");
    let parsed: Strategy = serde_json::from_str("\"ullmann\"").unwrap();
    assert_eq!(parsed, Strategy::Ullmann);
    assert_eq!(IsomorphismEngine::default().strategy(), Strategy::Vf2);
}
