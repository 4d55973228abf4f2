use lamprey::store::StoreKind;
use lamprey::{Backend, EdgeData, EdgeDataFactory, Error};

#[test]
fn default_factory_builds_directed_sparse_doubles() {
    let factory = EdgeDataFactory::default();
    assert_eq!(factory.backend, Backend::Sparse);
    assert!(!factory.symmetric);
    assert_eq!(factory.def_elem, 0.0);
    assert_eq!(factory.kind, StoreKind::Double);

    let g = factory.create(4);
    assert_eq!(g.backend_name(), "sparse");
    assert_eq!(g.size(), 4);
    assert!(!g.is_symmetric());
}

#[test]
fn json_config_selects_backend_and_parameters() {
    let factory = EdgeDataFactory::from_json(
        r#"{"backend":"dense","symmetric":true,"defElem":-1.0,"kind":"int"}"#,
    )
    .unwrap();
    assert_eq!(
        factory,
        EdgeDataFactory::dense()
            .with_symmetric(true)
            .with_def_elem(-1.0)
            .with_kind(StoreKind::Int)
    );

    let mut g = factory.create(3);
    assert_eq!(g.backend_name(), "dense");
    assert_eq!(g.get(0, 2).unwrap(), -1.0);
    g.set(2, 0, 4.6).unwrap();
    assert_eq!(g.get(0, 2).unwrap(), 4.0);
}

#[test]
fn missing_json_fields_fall_back_to_defaults() {
    let factory = EdgeDataFactory::from_json(r#"{"symmetric":true}"#).unwrap();
    assert_eq!(factory.backend, Backend::Sparse);
    assert!(factory.symmetric);
    assert_eq!(factory.kind, StoreKind::Double);
}

#[test]
fn invalid_json_is_a_config_error() {
    assert!(matches!(
        EdgeDataFactory::from_json(r#"{"backend":"octree"}"#),
        Err(Error::Config { .. })
    ));
    assert!(matches!(
        EdgeDataFactory::from_json("not json"),
        Err(Error::Config { .. })
    ));
}

#[test]
fn config_round_trips_through_json() {
    let factory = EdgeDataFactory::dense().with_kind(StoreKind::Bit);
    let json = serde_json::to_string(&factory).unwrap();
    assert!(json.contains(r#""backend":"dense""#));
    assert!(json.contains(r#""kind":"bit""#));
    assert_eq!(EdgeDataFactory::from_json(&json).unwrap(), factory);
}

#[test]
fn proto_keeps_backend_and_parameters() {
    let g = EdgeDataFactory::dense()
        .with_symmetric(true)
        .with_def_elem(2.0)
        .create(2);
    let sibling = g.proto(5);
    assert_eq!(sibling.backend_name(), "dense");
    assert!(sibling.is_symmetric());
    assert_eq!(sibling.def_elem(), 2.0);
    assert_eq!(sibling.size(), 5);
    assert_eq!(sibling.non_def_count(), 0);
}
