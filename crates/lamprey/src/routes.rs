//! Shortest-path results.
//!
//! A [`Routes`] matrix and every [`Route`] handed out from it share one immutable result table,
//! so a route stays valid for as long as any holder keeps it.

use crate::edges::check_vertex;
use crate::error::{Error, Result};
use std::sync::Arc;

#[derive(Debug)]
struct PathTable {
    size: usize,
    dist: Vec<f64>,
    /// `pred[from * size + into]` is the vertex before `into` on the path from `from`.
    pred: Option<Vec<Option<usize>>>,
}

/// A `size x size` matrix of route handles.
#[derive(Debug, Clone)]
pub struct Routes {
    table: Arc<PathTable>,
}

impl Routes {
    pub(crate) fn with_paths(size: usize, dist: Vec<f64>, pred: Vec<Option<usize>>) -> Self {
        debug_assert_eq!(dist.len(), size * size);
        debug_assert_eq!(pred.len(), size * size);
        Self {
            table: Arc::new(PathTable {
                size,
                dist,
                pred: Some(pred),
            }),
        }
    }

    pub(crate) fn distance_only(size: usize, dist: Vec<f64>) -> Self {
        debug_assert_eq!(dist.len(), size * size);
        Self {
            table: Arc::new(PathTable {
                size,
                dist,
                pred: None,
            }),
        }
    }

    pub fn size(&self) -> usize {
        self.table.size
    }

    /// Whether [`Route::path`] can reconstruct vertex sequences for these routes.
    pub fn supports_paths(&self) -> bool {
        self.table.pred.is_some()
    }

    /// Shortest distance, `f64::INFINITY` when `into` is unreachable.
    pub fn distance(&self, from: usize, into: usize) -> Result<f64> {
        self.check(from, into)?;
        Ok(self.table.dist[from * self.table.size + into])
    }

    pub fn route(&self, from: usize, into: usize) -> Result<Route> {
        self.check(from, into)?;
        Ok(Route {
            from,
            into,
            table: Arc::clone(&self.table),
        })
    }

    /// Every route in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Route> + '_ {
        let size = self.table.size;
        (0..size * size).map(move |cell| Route {
            from: cell / size,
            into: cell % size,
            table: Arc::clone(&self.table),
        })
    }

    /// Row-major distance matrix.
    pub fn distances(&self) -> &[f64] {
        &self.table.dist
    }

    fn check(&self, from: usize, into: usize) -> Result<()> {
        check_vertex(from, self.table.size)?;
        check_vertex(into, self.table.size)
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    from: usize,
    into: usize,
    table: Arc<PathTable>,
}

impl Route {
    pub fn source(&self) -> usize {
        self.from
    }

    pub fn target(&self) -> usize {
        self.into
    }

    pub fn distance(&self) -> f64 {
        self.table.dist[self.from * self.table.size + self.into]
    }

    pub fn is_reachable(&self) -> bool {
        self.distance().is_finite()
    }

    /// Vertex sequence from `from` to `into`, both ends included.
    ///
    /// Empty when `into` is unreachable or equals `from`. `None` when the routes were computed
    /// without predecessor tracking.
    pub fn path(&self) -> Result<Option<Vec<usize>>> {
        let Some(pred) = self.table.pred.as_ref() else {
            return Ok(None);
        };
        let size = self.table.size;
        let row = &pred[self.from * size..(self.from + 1) * size];
        if row[self.into].is_none() {
            return Ok(Some(Vec::new()));
        }

        let cycle = Error::PathCycle {
            from: self.from,
            into: self.into,
        };
        let mut path = vec![self.into];
        let mut cur = self.into;
        while cur != self.from {
            if path.len() > size {
                return Err(cycle);
            }
            let Some(prev) = row[cur] else {
                return Err(cycle);
            };
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        Ok(Some(path))
    }
}
