//! Weighted adjacency storage over vertices `0..size`.
//!
//! Every backend implements [`EdgeData`]. Unset positions read as the default element ("no
//! edge"). Symmetric graphs canonicalize writes to the `from <= into` orientation and iterate
//! each unordered pair once, in that orientation.

mod constant;
mod dense;
mod factory;
mod sparse;

pub use constant::ConstantEdges;
pub use dense::{DenseEdges, DenseStream};
pub use factory::{Backend, EdgeDataFactory};
pub use sparse::SparseEdges;

use crate::error::{Error, Result};
use std::fmt;
use std::io::Write;

/// A non-default position and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub from: usize,
    pub into: usize,
    pub elem: f64,
}

impl Entry {
    pub fn new(from: usize, into: usize, elem: f64) -> Self {
        Self { from, into, elem }
    }
}

pub trait EdgeData: fmt::Debug {
    /// Short backend name used in diagnostics.
    fn backend_name(&self) -> &'static str;

    fn size(&self) -> usize;

    fn is_symmetric(&self) -> bool;

    fn def_elem(&self) -> f64;

    fn get(&self, from: usize, into: usize) -> Result<f64>;

    /// Stores `elem` and returns the previous value. Writing the default element removes the edge.
    fn set(&mut self, from: usize, into: usize, elem: f64) -> Result<f64>;

    fn conn(&self, from: usize, into: usize) -> Result<bool> {
        Ok(!same_elem(self.get(from, into)?, self.def_elem()))
    }

    /// The stored value of a connected position, `0.0` otherwise.
    fn weight(&self, from: usize, into: usize) -> Result<f64> {
        let value = self.get(from, into)?;
        Ok(if same_elem(value, self.def_elem()) {
            0.0
        } else {
            value
        })
    }

    /// Ascending list of vertices connected to `vertex`.
    fn conn_vertexes(&self, vertex: usize) -> Result<Vec<usize>>;

    /// Sum of the weights incident to `vertex`; a mirrored or reflexive edge counts once.
    fn power(&self, vertex: usize) -> Result<f64> {
        let mut sum = 0.0;
        for other in self.conn_vertexes(vertex)? {
            sum += self.weight(vertex, other)?;
        }
        Ok(sum)
    }

    /// Non-default entries in ascending `(from, into)` order.
    fn non_def_iter(&self) -> Box<dyn Iterator<Item = Entry> + '_>;

    fn visit_non_def(&self, visitor: &mut dyn FnMut(Entry)) {
        for entry in self.non_def_iter() {
            visitor(entry);
        }
    }

    fn non_def_count(&self) -> usize;

    /// Sum of the non-default entries.
    fn total(&self) -> f64 {
        self.non_def_iter().fold(0.0, |sum, e| sum + e.elem)
    }

    /// Share of non-default positions present in both graphs, relative to the graph with more of
    /// them. Two empty graphs are fully similar.
    fn similarity(&self, other: &dyn EdgeData) -> Result<f64> {
        if self.size() != other.size() {
            return Err(Error::SizeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }

        let mut left = self.non_def_iter().peekable();
        let mut right = other.non_def_iter().peekable();
        let (mut left_count, mut right_count, mut both) = (0usize, 0usize, 0usize);
        loop {
            match (left.peek(), right.peek()) {
                (Some(l), Some(r)) => match (l.from, l.into).cmp(&(r.from, r.into)) {
                    std::cmp::Ordering::Less => {
                        left_count += 1;
                        left.next();
                    }
                    std::cmp::Ordering::Greater => {
                        right_count += 1;
                        right.next();
                    }
                    std::cmp::Ordering::Equal => {
                        left_count += 1;
                        right_count += 1;
                        both += 1;
                        left.next();
                        right.next();
                    }
                },
                (Some(_), None) => {
                    left_count += 1;
                    left.next();
                }
                (None, Some(_)) => {
                    right_count += 1;
                    right.next();
                }
                (None, None) => break,
            }
        }

        let larger = left_count.max(right_count);
        if larger == 0 {
            return Ok(1.0);
        }
        Ok(both as f64 / larger as f64)
    }

    fn clear(&mut self) -> Result<()>;

    /// An empty graph of the same backend and parameters with `size` vertices.
    fn proto(&self, size: usize) -> Box<dyn EdgeData>;

    /// Writes the wire encoding and returns the number of bytes written. Sparse backends compact
    /// themselves first.
    fn write_wire(&mut self, _w: &mut dyn Write) -> Result<u64> {
        Err(Error::Unsupported {
            op: "write_wire",
            backend: self.backend_name(),
        })
    }

    /// Replaces the contents with the non-default entries of `other`.
    fn assign(&mut self, other: &dyn EdgeData) -> Result<()> {
        if self.size() != other.size() {
            return Err(Error::SizeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        self.clear()?;
        for entry in other.non_def_iter() {
            self.set(entry.from, entry.into, entry.elem)?;
        }
        Ok(())
    }
}

/// Element equality where two NaNs are the same element.
pub(crate) fn same_elem(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub(crate) fn check_vertex(vertex: usize, size: usize) -> Result<()> {
    if vertex < size {
        Ok(())
    } else {
        Err(Error::VertexOutOfRange { vertex, size })
    }
}

/// Orientation a symmetric graph stores `(from, into)` under.
pub(crate) fn canonical(symmetric: bool, from: usize, into: usize) -> (usize, usize) {
    if symmetric && from > into {
        (into, from)
    } else {
        (from, into)
    }
}
