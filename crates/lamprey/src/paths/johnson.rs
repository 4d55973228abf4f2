use super::{timing_enabled, weight_source};
use crate::edges::EdgeData;
use crate::error::{Error, Result};
use crate::routes::Routes;
use lamprey_store::{DoubleStore, Elem, IntStore, Search, Store};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JohnsonOptions {
    /// Reject negative edge lengths up front. Dijkstra's settled distances are only correct for
    /// non-negative lengths.
    pub check_weights: bool,
}

impl Default for JohnsonOptions {
    fn default() -> Self {
        Self {
            check_weights: true,
        }
    }
}

/// All-pairs distances by one Dijkstra run per source. Distance only: the returned routes carry
/// no predecessor information.
pub fn johnson(conn: &dyn EdgeData, dist: Option<&dyn EdgeData>) -> Result<Routes> {
    johnson_with_options(conn, dist, &JohnsonOptions::default())
}

pub fn johnson_with_options(
    conn: &dyn EdgeData,
    dist: Option<&dyn EdgeData>,
    opts: &JohnsonOptions,
) -> Result<Routes> {
    let weights = weight_source(conn, dist)?;
    let n = conn.size();

    let timing_enabled = timing_enabled();
    let total_start = timing_enabled.then(std::time::Instant::now);

    let adjacency_start = timing_enabled.then(std::time::Instant::now);
    let mut out: Vec<Vec<(usize, f64)>> = Vec::with_capacity(n);
    for from in 0..n {
        let mut row = Vec::new();
        for into in conn.conn_vertexes(from)? {
            let weight = weights.weight(from, into)?;
            if opts.check_weights && weight < 0.0 {
                return Err(Error::NegativeWeight { from, into, weight });
            }
            row.push((into, weight));
        }
        out.push(row);
    }
    let adjacency = adjacency_start.map(|s| s.elapsed());

    let search_start = timing_enabled.then(std::time::Instant::now);
    let mut all = vec![f64::INFINITY; n * n];
    let mut settled = vec![false; n];
    let mut frontier = Frontier::default();
    for source in 0..n {
        let row = &mut all[source * n..(source + 1) * n];
        settled.fill(false);
        row[source] = 0.0;
        frontier.push(0.0, source)?;

        while let Some((du, u)) = frontier.pop_min()? {
            settled[u] = true;
            for &(v, w) in &out[u] {
                if settled[v] {
                    continue;
                }
                let candidate = du + w;
                if candidate < row[v] {
                    if row[v].is_finite() {
                        frontier.remove(row[v], v)?;
                    }
                    row[v] = candidate;
                    frontier.push(candidate, v)?;
                }
            }
        }
    }
    let search = search_start.map(|s| s.elapsed());

    let reachable = all.iter().filter(|v| v.is_finite()).count();
    tracing::debug!(vertices = n, reachable, "johnson finished");

    if let Some(s) = total_start {
        eprintln!(
            "[lamprey-paths-timing] algo=johnson total={:?} adjacency={:?} search={:?} vertices={} reachable={}",
            s.elapsed(),
            adjacency.unwrap_or_default(),
            search.unwrap_or_default(),
            n,
            reachable,
        );
    }

    Ok(Routes::distance_only(n, all))
}

/// Priority queue kept as two parallel stores sorted by ascending distance.
///
/// Extraction takes index 0 and every update shifts the tail, so each operation is `O(queued)`.
#[derive(Debug, Default)]
struct Frontier {
    dists: DoubleStore,
    ids: IntStore,
}

impl Frontier {
    fn push(&mut self, dist: f64, vertex: usize) -> Result<()> {
        let len = self.dists.size();
        let at = match self.dists.b_search(0, len, Elem::Double(dist))? {
            Search::Found(pos) | Search::Vacant(pos) => pos,
        };
        self.dists.ins(at, at + 1, Elem::Double(dist))?;
        self.ids.ins(at, at + 1, Elem::Int(vertex as i32))?;
        Ok(())
    }

    fn pop_min(&mut self) -> Result<Option<(f64, usize)>> {
        if self.dists.is_empty() {
            return Ok(None);
        }
        let dist = self.dists.get_prim(0)?;
        let vertex = self.ids.get_prim(0)? as usize;
        self.dists.del(0, 1)?;
        self.ids.del(0, 1)?;
        Ok(Some((dist, vertex)))
    }

    /// Drops the queued `(dist, vertex)` entry.
    fn remove(&mut self, dist: f64, vertex: usize) -> Result<()> {
        let len = self.dists.size();
        let Search::Found(hit) = self.dists.b_search(0, len, Elem::Double(dist))? else {
            debug_assert!(false, "frontier has no entry at distance {dist}");
            return Ok(());
        };
        let dists = self.dists.as_slice();
        let ids = self.ids.as_slice();
        let mut lo = hit;
        while lo > 0 && dists[lo - 1] == dist {
            lo -= 1;
        }
        let found = (lo..len)
            .take_while(|&pos| dists[pos] == dist)
            .find(|&pos| ids[pos] as usize == vertex);
        match found {
            Some(pos) => {
                self.dists.del(pos, pos + 1)?;
                self.ids.del(pos, pos + 1)?;
            }
            None => debug_assert!(false, "vertex {vertex} not queued at distance {dist}"),
        }
        Ok(())
    }
}
