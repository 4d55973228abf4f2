//! Summary metrics over graphs and their shortest-path routes.

use crate::edges::EdgeData;
use crate::error::Result;
use crate::routes::Routes;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceStats {
    /// Ordered pairs `(i, j)`, `i != j`, with a finite distance.
    pub reachable_pairs: usize,
    /// Mean over reachable pairs; `0.0` when there are none.
    pub mean_distance: f64,
    /// Longest finite distance.
    pub diameter: f64,
    /// Mean of `1 / d` over all ordered pairs `i != j`; unreachable pairs contribute zero.
    pub efficiency: f64,
}

impl DistanceStats {
    pub fn of(routes: &Routes) -> Self {
        let n = routes.size();
        let dist = routes.distances();
        let mut reachable_pairs = 0usize;
        let mut sum = 0.0;
        let mut diameter: f64 = 0.0;
        let mut inverse_sum = 0.0;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = dist[i * n + j];
                if !d.is_finite() {
                    continue;
                }
                reachable_pairs += 1;
                sum += d;
                diameter = diameter.max(d);
                if d > 0.0 {
                    inverse_sum += 1.0 / d;
                }
            }
        }

        let ordered_pairs = n * n.saturating_sub(1);
        Self {
            reachable_pairs,
            mean_distance: if reachable_pairs == 0 {
                0.0
            } else {
                sum / reachable_pairs as f64
            },
            diameter,
            efficiency: if ordered_pairs == 0 {
                0.0
            } else {
                inverse_sum / ordered_pairs as f64
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// Degree to number of vertices with that degree.
    pub histogram: HashMap<usize, usize>,
}

impl DegreeStats {
    /// Degrees count connected vertices, so a reflexive edge adds one.
    pub fn of(edges: &dyn EdgeData) -> Result<Self> {
        let n = edges.size();
        let mut histogram: HashMap<usize, usize> = HashMap::default();
        let mut min = usize::MAX;
        let mut max = 0;
        let mut sum = 0usize;
        for vertex in 0..n {
            let degree = edges.conn_vertexes(vertex)?.len();
            *histogram.entry(degree).or_insert(0) += 1;
            min = min.min(degree);
            max = max.max(degree);
            sum += degree;
        }

        Ok(Self {
            min: if n == 0 { 0 } else { min },
            max,
            mean: if n == 0 { 0.0 } else { sum as f64 / n as f64 },
            histogram,
        })
    }
}
