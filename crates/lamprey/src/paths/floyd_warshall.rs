use super::{timing_enabled, weight_source};
use crate::edges::EdgeData;
use crate::error::Result;
use crate::routes::Routes;

/// Floyd-Warshall with predecessor tracking.
///
/// Relaxation runs with the intermediate vertex outermost and only replaces a distance on strict
/// improvement, so among equally short paths the first one found is kept.
pub fn floyd_warshall(conn: &dyn EdgeData, dist: Option<&dyn EdgeData>) -> Result<Routes> {
    let weights = weight_source(conn, dist)?;
    let n = conn.size();

    let timing_enabled = timing_enabled();
    let total_start = timing_enabled.then(std::time::Instant::now);

    let init_start = timing_enabled.then(std::time::Instant::now);
    let mut d = vec![f64::INFINITY; n * n];
    let mut p: Vec<Option<usize>> = vec![None; n * n];
    for i in 0..n {
        for j in conn.conn_vertexes(i)? {
            d[i * n + j] = weights.weight(i, j)?;
            if i != j {
                p[i * n + j] = Some(i);
            }
        }
        d[i * n + i] = 0.0;
    }
    let init = init_start.map(|s| s.elapsed());

    let relax_start = timing_enabled.then(std::time::Instant::now);
    for k in 0..n {
        for i in 0..n {
            let dik = d[i * n + k];
            if dik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let via = dik + d[k * n + j];
                if via < d[i * n + j] {
                    d[i * n + j] = via;
                    p[i * n + j] = p[k * n + j];
                }
            }
        }
    }
    let relax = relax_start.map(|s| s.elapsed());

    let reachable = d.iter().filter(|v| v.is_finite()).count();
    tracing::debug!(vertices = n, reachable, "floyd-warshall finished");

    if let Some(s) = total_start {
        eprintln!(
            "[lamprey-paths-timing] algo=floyd_warshall total={:?} init={:?} relax={:?} vertices={} reachable={}",
            s.elapsed(),
            init.unwrap_or_default(),
            relax.unwrap_or_default(),
            n,
            reachable,
        );
    }

    Ok(Routes::with_paths(n, d, p))
}
