use lamprey::paths::floyd_warshall;
use lamprey::{DegreeStats, DistanceStats, EdgeData, EdgeDataFactory};

fn path_graph() -> Box<dyn EdgeData> {
    let mut g = EdgeDataFactory::sparse().with_symmetric(true).create(3);
    g.set(0, 1, 1.0).unwrap();
    g.set(1, 2, 1.0).unwrap();
    g
}

#[test]
fn distance_stats_of_a_path() {
    let routes = floyd_warshall(path_graph().as_ref(), None).unwrap();
    let stats = DistanceStats::of(&routes);
    assert_eq!(stats.reachable_pairs, 6);
    assert!((stats.mean_distance - 8.0 / 6.0).abs() < 1e-12);
    assert_eq!(stats.diameter, 2.0);
    assert!((stats.efficiency - 5.0 / 6.0).abs() < 1e-12);
}

#[test]
fn unreachable_pairs_lower_efficiency_only() {
    let mut g = EdgeDataFactory::dense().create(3);
    g.set(0, 1, 2.0).unwrap();
    let routes = floyd_warshall(g.as_ref(), None).unwrap();
    let stats = DistanceStats::of(&routes);
    assert_eq!(stats.reachable_pairs, 1);
    assert_eq!(stats.mean_distance, 2.0);
    assert_eq!(stats.diameter, 2.0);
    assert!((stats.efficiency - 0.5 / 6.0).abs() < 1e-12);
}

#[test]
fn distance_stats_serialize_camel_case() {
    let routes = floyd_warshall(path_graph().as_ref(), None).unwrap();
    let json = serde_json::to_value(DistanceStats::of(&routes)).unwrap();
    assert_eq!(json["reachablePairs"], 6);
    assert_eq!(json["diameter"], 2.0);
}

#[test]
fn degree_stats_of_a_path() {
    let stats = DegreeStats::of(path_graph().as_ref()).unwrap();
    assert_eq!(stats.min, 1);
    assert_eq!(stats.max, 2);
    assert!((stats.mean - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.histogram.get(&1), Some(&2));
    assert_eq!(stats.histogram.get(&2), Some(&1));
    assert_eq!(stats.histogram.len(), 2);
}

#[test]
fn degree_stats_of_an_empty_graph() {
    let g = EdgeDataFactory::sparse().create(0);
    let stats = DegreeStats::of(g.as_ref()).unwrap();
    assert_eq!(stats.min, 0);
    assert_eq!(stats.max, 0);
    assert_eq!(stats.mean, 0.0);
    assert!(stats.histogram.is_empty());
}
