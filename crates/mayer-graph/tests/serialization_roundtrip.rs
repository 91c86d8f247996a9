use mayer_core::rng::RngHandle;
use mayer_graph::{
    gen_random, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    structural_hash, Coefficient, Graph,
};

fn decorated() -> Graph {
    let mut rng = RngHandle::from_seed(11);
    let mut graph = gen_random(7, 2, 0.5, &mut rng).unwrap();
    graph.put_colored_edge(0, 6, 'B').unwrap();
    graph.set_node_color(3, 'C').unwrap();
    graph.set_coefficient(Coefficient::new(-3, 4).unwrap());
    graph.set_num_factors(2);
    graph.add_factors(&[1, 2]).unwrap();
    graph
}

#[test]
fn json_roundtrip_preserves_everything() {
    let graph = decorated();
    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(restored.factors(), graph.factors());
    assert_eq!(restored.to_string(), graph.to_string());
    assert_eq!(structural_hash(&restored), structural_hash(&graph));
}

#[test]
fn bytes_roundtrip_preserves_everything() {
    let graph = decorated();
    let restored = graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(structural_hash(&restored), structural_hash(&graph));
}

#[test]
fn newer_major_schema_is_rejected() {
    let json = graph_to_json(&decorated()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["schema_version"]["major"] = serde_json::json!(2);
    let err = graph_from_json(&value.to_string()).unwrap_err();
    assert_eq!(err.code(), "schema-version");
}

#[test]
fn malformed_payloads_are_serde_errors() {
    assert_eq!(graph_from_json("{").unwrap_err().code(), "deserialize-json");
    assert_eq!(graph_from_bytes(&[1, 2, 3]).unwrap_err().code(), "deserialize-bytes");
}

#[test]
fn store_size_must_match_node_count() {
    let json = graph_to_json(&Graph::new(3, 0).unwrap()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["store"] = serde_json::json!("0000");
    let err = graph_from_json(&value.to_string()).unwrap_err();
    assert_eq!(err.code(), "store-size");
}

#[test]
fn hash_distinguishes_colors() {
    let mut graph = Graph::new(3, 0).unwrap();
    graph.put_edge(0, 1).unwrap();
    let plain = structural_hash(&graph);
    graph.set_edge_color(0, 1, 'B').unwrap();
    assert_ne!(plain, structural_hash(&graph));
}

#[test]
fn samples_depend_only_on_seed_and_index() {
    let short = mayer_graph::sample_diagrams(3, 6, 1, 0.5, 42).unwrap();
    let long = mayer_graph::sample_diagrams(5, 6, 1, 0.5, 42).unwrap();
    assert_eq!(short[..], long[..3]);
    let hashes: Vec<String> = long.iter().map(structural_hash).collect();
    let again: Vec<String> = mayer_graph::sample_diagrams(5, 6, 1, 0.5, 42)
        .unwrap()
        .iter()
        .map(structural_hash)
        .collect();
    assert_eq!(hashes, again);
}

fn with_coefficient(numerator: i64, denominator: i64) -> String {
    let json = graph_to_json(&decorated()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["coefficient"]["numerator"] = serde_json::json!(numerator);
    value["coefficient"]["denominator"] = serde_json::json!(denominator);
    value.to_string()
}

#[test]
fn restored_coefficients_are_normalized() {
    let negative = graph_from_json(&with_coefficient(1, -2)).unwrap();
    assert_eq!(*negative.coefficient(), Coefficient::new(-1, 2).unwrap());
    assert_eq!(negative.coefficient().denominator(), 2);
    assert!(*negative.coefficient() < Coefficient::zero());

    let unreduced = graph_from_json(&with_coefficient(6, 8)).unwrap();
    assert_eq!(unreduced.coefficient().numerator(), 3);
    assert_eq!(unreduced.coefficient().denominator(), 4);
}

#[test]
fn zero_denominator_is_rejected() {
    let err = graph_from_json(&with_coefficient(1, 0)).unwrap_err();
    assert_eq!(err.code(), "deserialize-json");
}

#[test]
fn binary_store_is_packed_words() {
    let store = mayer_graph::Bitmap::from_words(300, &[5, 0, 0, 0, 1 << 40]);
    let bytes = bincode::serialize(&store).unwrap();
    // bit size, word count, five words
    assert_eq!(bytes.len(), 8 + 8 + 5 * 8);
    let restored: mayer_graph::Bitmap = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored, store);

    let json = serde_json::to_string(&store).unwrap();
    assert_eq!(json, format!("\"{store}\""));
}

#[test]
fn packed_store_must_match_its_size() {
    let short = bincode::serialize(&(130u64, vec![1u64, 2])).unwrap();
    assert!(bincode::deserialize::<mayer_graph::Bitmap>(&short).is_err());
    let stray = bincode::serialize(&(3u64, vec![0b1000u64])).unwrap();
    assert!(bincode::deserialize::<mayer_graph::Bitmap>(&stray).is_err());

    let mut large = Graph::new(30, 0).unwrap();
    large.put_edge(0, 29).unwrap();
    let restored = graph_from_bytes(&graph_to_bytes(&large).unwrap()).unwrap();
    assert_eq!(restored, large);
}
