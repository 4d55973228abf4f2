use lamprey::{ConstantEdges, EdgeData, Entry, Error};

#[test]
fn every_position_reads_the_constant() {
    let g = ConstantEdges::new(3, 2.5);
    assert_eq!(g.get(0, 2).unwrap(), 2.5);
    assert_eq!(g.get(1, 1).unwrap(), 2.5);
    assert!(g.is_symmetric());
    assert_eq!(g.conn_vertexes(1).unwrap(), vec![0, 1, 2]);
    assert_eq!(g.power(1).unwrap(), 7.5);
}

#[test]
fn iteration_covers_each_unordered_pair_once() {
    let g = ConstantEdges::new(3, 1.0);
    assert_eq!(g.non_def_count(), 6);
    assert_eq!(g.non_def_iter().count(), 6);
    assert_eq!(g.total(), 6.0);
    assert_eq!(g.non_def_iter().next(), Some(Entry::new(0, 0, 1.0)));
}

#[test]
fn constant_equal_to_the_default_is_an_empty_graph() {
    let g = ConstantEdges::with_def_elem(4, 0.0, 0.0);
    assert_eq!(g.non_def_count(), 0);
    assert!(g.conn_vertexes(2).unwrap().is_empty());
    assert!(!g.conn(0, 1).unwrap());
}

#[test]
fn empty_negative_constant_totals_positive_zero() {
    let g = ConstantEdges::new(0, -2.0);
    assert_eq!(g.total().to_bits(), 0.0f64.to_bits());
}

#[test]
fn mutation_is_unsupported() {
    let mut g = ConstantEdges::new(2, 1.0);
    assert!(matches!(
        g.set(0, 1, 3.0),
        Err(Error::Unsupported { op: "set", backend: "constant" })
    ));
    assert!(matches!(g.clear(), Err(Error::Unsupported { .. })));
    assert!(matches!(
        g.write_wire(&mut Vec::<u8>::new()),
        Err(Error::Unsupported { .. })
    ));
    assert_eq!(g.get(0, 1).unwrap(), 1.0);
}

#[test]
fn out_of_range_reads_fail() {
    let g = ConstantEdges::new(2, 1.0);
    assert!(matches!(
        g.get(2, 0),
        Err(Error::VertexOutOfRange { vertex: 2, size: 2 })
    ));
}

#[test]
fn proto_keeps_the_constant() {
    let g = ConstantEdges::new(2, 4.0);
    let bigger = g.proto(5);
    assert_eq!(bigger.size(), 5);
    assert_eq!(bigger.get(4, 3).unwrap(), 4.0);
}
