use lamprey::store::StoreKind;
use lamprey::{EdgeData, Entry, Error, SparseEdges};

fn symmetric(size: usize) -> SparseEdges {
    SparseEdges::new(size, true, 0.0, StoreKind::Double)
}

fn directed(size: usize) -> SparseEdges {
    SparseEdges::new(size, false, 0.0, StoreKind::Double)
}

#[test]
fn symmetric_edges_read_back_from_both_ends() {
    let mut g = symmetric(4);
    g.set(0, 3, 1.0).unwrap();
    g.set(1, 2, 2.0).unwrap();

    assert_eq!(g.get(3, 0).unwrap(), 1.0);
    assert_eq!(g.get(2, 1).unwrap(), 2.0);
    assert_eq!(g.get(0, 3).unwrap(), 1.0);
    assert_eq!(g.non_def_count(), 2);
    assert_eq!(g.total(), 3.0);
    assert_eq!(g.power(0).unwrap(), 1.0);
    assert_eq!(g.power(3).unwrap(), 1.0);
}

#[test]
fn symmetric_writes_from_either_orientation_are_the_same_edge() {
    let mut g = symmetric(5);
    g.set(4, 1, 3.0).unwrap();
    assert_eq!(g.get(1, 4).unwrap(), 3.0);
    assert_eq!(g.set(1, 4, 6.0).unwrap(), 3.0);
    assert_eq!(g.get(4, 1).unwrap(), 6.0);
    assert_eq!(g.non_def_count(), 1);
    assert_eq!(
        g.non_def_iter().collect::<Vec<_>>(),
        vec![Entry::new(1, 4, 6.0)]
    );
}

#[test]
fn reflexive_edges_are_stored_and_counted_once() {
    let mut g = symmetric(3);
    g.set(2, 2, 5.0).unwrap();
    g.set(2, 0, 1.0).unwrap();

    assert_eq!(g.conn_vertexes(2).unwrap(), vec![0, 2]);
    assert_eq!(g.power(2).unwrap(), 6.0);
    assert_eq!(g.non_def_count(), 2);
    assert_eq!(g.total(), 6.0);
}

#[test]
fn power_matches_the_sum_over_connected_vertexes() {
    let mut g = symmetric(6);
    for (a, b, w) in [(0, 1, 1.0), (0, 2, 2.0), (1, 2, 3.0), (3, 0, 4.0), (5, 5, 0.5)] {
        g.set(a, b, w).unwrap();
    }
    for v in 0..6 {
        let manual: f64 = g
            .conn_vertexes(v)
            .unwrap()
            .into_iter()
            .map(|o| g.weight(v, o).unwrap())
            .sum();
        assert_eq!(g.power(v).unwrap(), manual, "vertex {v}");
    }
}

#[test]
fn writing_the_default_removes_the_edge() {
    let mut g = symmetric(4);
    g.set(0, 3, 1.0).unwrap();
    g.set(1, 2, 2.0).unwrap();

    assert_eq!(g.set(3, 0, 0.0).unwrap(), 1.0);
    assert_eq!(g.get(0, 3).unwrap(), 0.0);
    assert!(!g.conn(3, 0).unwrap());
    assert!(g.conn_vertexes(0).unwrap().is_empty());
    assert_eq!(g.non_def_count(), 1);
    assert_eq!(g.get(2, 1).unwrap(), 2.0);
}

#[test]
fn removing_an_absent_edge_is_a_no_op() {
    let mut g = directed(3);
    assert_eq!(g.set(0, 1, 0.0).unwrap(), 0.0);
    assert_eq!(g.non_def_count(), 0);
}

#[test]
fn rows_stay_sorted_regardless_of_insertion_order() {
    let mut g = directed(8);
    for into in [5, 1, 7, 0, 3] {
        g.set(2, into, into as f64 + 10.0).unwrap();
    }
    assert_eq!(g.conn_vertexes(2).unwrap(), vec![0, 1, 3, 5, 7]);
    for into in [0, 1, 3, 5, 7] {
        assert_eq!(g.get(2, into).unwrap(), into as f64 + 10.0);
    }
}

#[test]
fn row_capacity_doubles_on_growth_and_shrinks_on_removal() {
    let mut g = directed(10);
    g.set(1, 0, 9.0).unwrap();
    g.set(9, 9, 8.0).unwrap();

    for into in 1..=8 {
        g.set(0, into, 1.0).unwrap();
    }
    assert_eq!(g.row_capacity(0).unwrap(), 8);

    for into in 1..=7 {
        g.set(0, into, 0.0).unwrap();
    }
    assert_eq!(g.row_capacity(0).unwrap(), 2);
    assert_eq!(g.conn_vertexes(0).unwrap(), vec![8]);

    g.set(0, 8, 0.0).unwrap();
    assert_eq!(g.row_capacity(0).unwrap(), 0);

    assert_eq!(g.get(1, 0).unwrap(), 9.0);
    assert_eq!(g.get(9, 9).unwrap(), 8.0);
    assert_eq!(g.non_def_count(), 2);
}

#[test]
fn later_rows_survive_structural_edits_of_earlier_rows() {
    let mut g = directed(5);
    for v in 0..5 {
        g.set(v, (v + 1) % 5, v as f64 + 1.0).unwrap();
    }
    for into in 0..5 {
        g.set(0, into, 2.0).unwrap();
    }
    for into in 0..5 {
        g.set(0, into, 0.0).unwrap();
    }
    for v in 1..5 {
        assert_eq!(g.get(v, (v + 1) % 5).unwrap(), v as f64 + 1.0);
    }
    assert_eq!(g.non_def_count(), 4);
}

#[test]
fn compactify_drops_spare_capacity_only() {
    let mut g = directed(3);
    for into in 0..3 {
        g.set(0, into, 1.0).unwrap();
    }
    g.set(2, 1, 4.0).unwrap();
    assert_eq!(g.row_capacity(0).unwrap(), 4);

    g.compactify().unwrap();
    assert_eq!(g.row_capacity(0).unwrap(), 3);
    assert_eq!(g.row_capacity(1).unwrap(), 0);
    assert_eq!(g.row_capacity(2).unwrap(), 1);
    assert_eq!(g.get(2, 1).unwrap(), 4.0);
    assert_eq!(g.conn_vertexes(0).unwrap(), vec![0, 1, 2]);
}

#[test]
fn out_of_range_vertices_are_rejected() {
    let mut g = symmetric(4);
    assert!(matches!(
        g.get(4, 0),
        Err(Error::VertexOutOfRange { vertex: 4, size: 4 })
    ));
    assert!(g.set(0, 7, 1.0).is_err());
    assert!(g.conn_vertexes(4).is_err());
    assert!(g.power(9).is_err());
}

#[test]
fn writes_past_the_declared_size_do_not_grow_the_graph() {
    let mut g = directed(2);
    assert!(g.set(2, 0, 1.0).is_err());
    assert_eq!(g.size(), 2);

    g.resize(4).unwrap();
    g.set(3, 0, 1.0).unwrap();
    assert_eq!(g.get(3, 0).unwrap(), 1.0);
    assert!(g.resize(1).is_err());
}

#[test]
fn values_are_coerced_to_the_data_kind() {
    let mut g = SparseEdges::new(3, false, 0.0, StoreKind::Int);
    g.set(0, 1, 2.7).unwrap();
    assert_eq!(g.get(0, 1).unwrap(), 2.0);

    // 0.4 truncates to the default and therefore stores nothing.
    g.set(0, 2, 0.4).unwrap();
    assert!(!g.conn(0, 2).unwrap());
    assert_eq!(g.non_def_count(), 1);
}

#[test]
fn bit_kind_holds_plain_connectivity() {
    let mut g = SparseEdges::new(3, true, 0.0, StoreKind::Bit);
    g.set(0, 2, 5.0).unwrap();
    assert_eq!(g.get(2, 0).unwrap(), 1.0);
    assert_eq!(g.power(0).unwrap(), 1.0);
}

#[test]
fn visit_non_def_pushes_entries_in_order() {
    let mut g = directed(3);
    g.set(2, 0, 1.0).unwrap();
    g.set(0, 2, 2.0).unwrap();
    g.set(0, 1, 3.0).unwrap();

    let mut seen = Vec::new();
    g.visit_non_def(&mut |e| seen.push((e.from, e.into)));
    assert_eq!(seen, vec![(0, 1), (0, 2), (2, 0)]);
}

#[test]
fn clear_and_proto_produce_empty_graphs() {
    let mut g = symmetric(4);
    g.set(0, 1, 1.0).unwrap();

    let sibling = g.proto(6);
    assert_eq!(sibling.size(), 6);
    assert!(sibling.is_symmetric());
    assert_eq!(sibling.non_def_count(), 0);

    g.clear().unwrap();
    assert_eq!(g.non_def_count(), 0);
    assert_eq!(g.get(1, 0).unwrap(), 0.0);
    g.set(2, 3, 1.0).unwrap();
    assert_eq!(g.get(3, 2).unwrap(), 1.0);
}

#[test]
fn non_zero_default_element_marks_missing_edges() {
    let mut g = SparseEdges::new(3, false, f64::INFINITY, StoreKind::Double);
    assert_eq!(g.get(0, 1).unwrap(), f64::INFINITY);
    g.set(0, 1, 0.0).unwrap();
    assert!(g.conn(0, 1).unwrap());
    assert_eq!(g.weight(0, 1).unwrap(), 0.0);
    assert_eq!(g.weight(1, 0).unwrap(), 0.0);
    assert_eq!(g.non_def_count(), 1);
}
