use mayer_core::{edge_capacity, EdgeId, NodeKind, SchemaVersion};

#[test]
fn edge_capacity_matches_pair_count() {
    assert_eq!(edge_capacity(0), 0);
    assert_eq!(edge_capacity(1), 0);
    assert_eq!(edge_capacity(2), 1);
    assert_eq!(edge_capacity(5), 10);
    assert_eq!(edge_capacity(128), 8128);
}

#[test]
fn edge_ids_round_trip_raw() {
    let id = EdgeId::from_raw(17);
    assert_eq!(id.as_raw(), 17);
    assert_eq!(id.index(), 17);
}

#[test]
fn node_kind_tags_and_order() {
    assert_eq!(NodeKind::Root.tag(), 'R');
    assert_eq!(NodeKind::Field.tag(), 'F');
    assert!(NodeKind::Root < NodeKind::Field);
}

#[test]
fn schema_compatibility() {
    let current = SchemaVersion::new(1, 2, 0);
    assert!(current.is_compatible_with(&SchemaVersion::new(1, 1, 5)));
    assert!(!current.is_compatible_with(&SchemaVersion::new(2, 0, 0)));
    assert!(!current.is_compatible_with(&SchemaVersion::new(1, 3, 0)));
}
